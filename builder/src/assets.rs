use std::{
    collections::HashMap,
    fs,
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use flate2::{Compression, write::GzEncoder};
use sha2::{Digest as _, Sha256};

use crate::config;

/// First 8 hex digits of the SHA-256 of `content`, embedded in output
/// filenames for cache busting.
pub fn content_hash8(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    digest[..4].iter().map(|b| format!("{b:02x}")).collect()
}

/// Copies each requested bundle from `js/<name>.js` to
/// `js/<name>.<hash8>.js` and returns the mapping from bundle name to its
/// emitted path (relative to the destination dir).
///
/// A requested bundle with no source file is skipped with a warning; splitting
/// shared code into `vendor` is the external bundler's job, and a site that
/// never ran it simply has no vendor file.
pub fn copy_bundles(
    src_dir: &Path,
    dst_dir: &Path,
    bundle_names: &[String],
) -> anyhow::Result<HashMap<String, String>> {
    let mut emitted = HashMap::new();

    for name in bundle_names {
        let src_path = src_dir.join(config::JS_DIR).join(format!("{name}.js"));
        if !src_path.is_file() {
            log::warn!("bundle `{}` has no source file, skip", name);
            continue;
        }

        let content = fs::read(&src_path)
            .with_context(|| format!("failed to read bundle {}", src_path.display()))?;
        let rel_path = format!("{}/{}.{}.js", config::JS_DIR, name, content_hash8(&content));

        let dst_path = dst_dir.join(&rel_path);
        write_file(&dst_path, &content)?;

        log::info!("emit bundle: {} -> {}", name, rel_path);
        emitted.insert(name.clone(), rel_path);
    }

    Ok(emitted)
}

/// Copies image assets under hashed names. Only the accepted extension set is
/// emitted; anything else under `assets/images/` is skipped with a warning.
pub fn copy_images(src_dir: &Path, dst_dir: &Path, optimize: bool) -> anyhow::Result<()> {
    if optimize {
        // Recompression is delegated to external optimizers; the production
        // gate only decides whether they would run at all.
        log::info!("production build: image optimization pass enabled downstream");
    } else {
        log::info!("development build: image optimization pass disabled");
    }

    copy_hashed_tree(
        &src_dir.join(config::IMAGE_ASSETS_DIR),
        &dst_dir.join(config::IMAGE_ASSETS_DIR),
        &config::IMAGE_EXTENSIONS,
    )
}

/// Copies font assets (`woff woff2 ttf eot`) under hashed names.
pub fn copy_fonts(src_dir: &Path, dst_dir: &Path) -> anyhow::Result<()> {
    copy_hashed_tree(
        &src_dir.join(config::FONT_ASSETS_DIR),
        &dst_dir.join(config::FONT_ASSETS_DIR),
        &config::FONT_EXTENSIONS,
    )
}

/// Copies `assets/txt/**` verbatim, keeping every file's relative subpath.
pub fn copy_txt_assets(src_dir: &Path, dst_dir: &Path) -> anyhow::Result<()> {
    let from = src_dir.join(config::TXT_ASSETS_DIR);
    if !from.is_dir() {
        return Ok(());
    }

    copy_tree(&from, &dst_dir.join(config::TXT_ASSETS_DIR))
        .context("failed to copy text assets")
}

/// Writes a gzip sibling next to every emitted `.html`, `.css` and `.js`
/// file. Production-only post-processing.
pub fn gzip_outputs(dst_dir: &Path) -> anyhow::Result<()> {
    for path in walk_files(dst_dir)? {
        let ext = path.extension().and_then(|x| x.to_str());
        if !matches!(ext, Some("html" | "css" | "js")) {
            continue;
        }

        let content = fs::read(&path)?;

        let mut gz_path = path.clone().into_os_string();
        gz_path.push(".gz");

        let file = fs::File::create(&gz_path)?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(&content)?;
        encoder.finish()?;

        log::info!("gzip: {}", path.display());
    }

    Ok(())
}

fn copy_hashed_tree(from: &Path, to: &Path, extensions: &[&str]) -> anyhow::Result<()> {
    if !from.is_dir() {
        return Ok(());
    }

    for path in walk_files(from)? {
        let ext = path.extension().and_then(|x| x.to_str());
        let Some(ext) = ext.filter(|e| extensions.contains(e)) else {
            log::warn!("unrecognized asset extension, skip: {}", path.display());
            continue;
        };

        let content =
            fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let dst_path = to.join(format!("{}.{}", content_hash8(&content), ext));

        write_file(&dst_path, &content)?;
        log::info!("emit asset: {} -> {}", path.display(), dst_path.display());
    }

    Ok(())
}

fn copy_tree(from: &Path, to: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(from)? {
        let entry = entry?;

        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &to.join(entry.file_name()))?;
        } else {
            fs::create_dir_all(to)?;
            fs::copy(entry.path(), to.join(entry.file_name()))?;
        }
    }

    Ok(())
}

fn walk_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type()?.is_dir() {
            files.extend(walk_files(&path)?);
        } else {
            files.push(path);
        }
    }

    // read_dir order is platform dependent
    files.sort();
    Ok(files)
}

pub fn write_file(path: &Path, content: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash8_is_stable_hex() {
        let first = content_hash8(b"console.log('hi')");
        let second = content_hash8(b"console.log('hi')");

        assert_eq!(first, second);
        assert_eq!(first.len(), 8);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, content_hash8(b"console.log('bye')"));
    }

    #[test]
    fn bundles_get_hashed_names_and_missing_ones_are_skipped() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();

        let js_dir = src.path().join(config::JS_DIR);
        fs::create_dir_all(&js_dir).unwrap();
        fs::write(js_dir.join("main.js"), "window.x = 1;").unwrap();
        fs::write(js_dir.join("index.js"), "window.y = 2;").unwrap();

        let names = vec![
            "main".to_string(),
            "vendor".to_string(),
            "index".to_string(),
        ];
        let emitted = copy_bundles(src.path(), dst.path(), &names).unwrap();

        assert_eq!(emitted.len(), 2);
        assert!(!emitted.contains_key("vendor"));

        let main_rel = &emitted["main"];
        let expected = format!("js/main.{}.js", content_hash8(b"window.x = 1;"));
        assert_eq!(main_rel, &expected);
        assert!(dst.path().join(main_rel).is_file());
    }

    #[test]
    fn images_outside_accepted_set_are_skipped() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();

        let images = src.path().join(config::IMAGE_ASSETS_DIR);
        fs::create_dir_all(&images).unwrap();
        fs::write(images.join("logo.png"), [1, 2, 3]).unwrap();
        fs::write(images.join("notes.psd"), [4, 5, 6]).unwrap();

        copy_images(src.path(), dst.path(), false).unwrap();

        let out = walk_files(&dst.path().join(config::IMAGE_ASSETS_DIR)).unwrap();
        assert_eq!(out.len(), 1);
        let name = out[0].file_name().unwrap().to_str().unwrap();
        assert_eq!(name, format!("{}.png", content_hash8(&[1, 2, 3])));
    }

    #[test]
    fn txt_assets_keep_their_subpaths() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();

        let txt = src.path().join(config::TXT_ASSETS_DIR).join("legal");
        fs::create_dir_all(&txt).unwrap();
        fs::write(txt.join("terms.txt"), "terms").unwrap();

        copy_txt_assets(src.path(), dst.path()).unwrap();

        let copied = dst
            .path()
            .join(config::TXT_ASSETS_DIR)
            .join("legal/terms.txt");
        assert_eq!(fs::read_to_string(copied).unwrap(), "terms");
    }

    #[test]
    fn gzip_siblings_for_text_outputs_only() {
        let dst = tempfile::tempdir().unwrap();
        fs::write(dst.path().join("index.html"), "<html></html>").unwrap();
        fs::create_dir_all(dst.path().join("assets/images")).unwrap();
        fs::write(dst.path().join("assets/images/aabbccdd.png"), [0, 1]).unwrap();

        gzip_outputs(dst.path()).unwrap();

        assert!(dst.path().join("index.html.gz").is_file());
        assert!(!dst.path().join("assets/images/aabbccdd.png.gz").exists());
    }
}
