use std::path::Path;

use lightningcss::{
    bundler::{Bundler, FileProvider},
    printer::PrinterOptions,
    stylesheet::{MinifyOptions, ParserOptions},
};

use crate::{assets, config};

/// Bundles `css/main.css` (following `@import`s), minifies it, and writes the
/// single per-build stylesheet as `css/all.min.<hash8>.css`.
///
/// Returns the emitted path relative to the destination dir, or `None` when
/// the site has no stylesheet entry at all.
pub fn bundle_stylesheet(src_dir: &Path, dst_dir: &Path) -> anyhow::Result<Option<String>> {
    let entry = src_dir.join(config::CSS_DIR).join(config::CSS_ENTRY);
    if !entry.is_file() {
        log::warn!("no stylesheet entry at {}, skip", entry.display());
        return Ok(None);
    }

    let fs_provider = FileProvider::new();
    let mut bundler = Bundler::new(&fs_provider, None, ParserOptions::default());

    let mut stylesheet = bundler
        .bundle(&entry)
        .map_err(|e| anyhow::anyhow!("failed to bundle stylesheet: {:?}", e))?;

    stylesheet.minify(MinifyOptions::default())?;

    let res = stylesheet.to_css(PrinterOptions {
        minify: true,
        ..Default::default()
    })?;

    let rel_path = format!(
        "{}/all.min.{}.css",
        config::CSS_DIR,
        assets::content_hash8(res.code.as_bytes())
    );
    assets::write_file(&dst_dir.join(&rel_path), res.code.as_bytes())?;

    log::info!("emit stylesheet: {}", rel_path);
    Ok(Some(rel_path))
}
