use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    assets,
    config::{self, Config},
    css,
    env::Mode,
    fragments::Fragments,
    pages, targets,
};

/// Drives one whole build: derives the page targets from the config, then
/// emits bundles, the stylesheet, pages, and static assets into a fresh
/// destination dir.
pub struct Builder {
    src_dir: PathBuf,
    dst_dir: PathBuf,
    config: Config,
    mode: Mode,
}

impl Builder {
    pub fn new(
        src_dir: impl Into<PathBuf>,
        dst_dir: impl Into<PathBuf>,
        mode: Mode,
    ) -> anyhow::Result<Self> {
        let src_dir = src_dir.into();
        let dst_dir = dst_dir.into();

        if dst_dir.try_exists()? {
            return Err(anyhow::anyhow!("output dir is not empty"));
        }

        let config_file = Path::new("config.yaml");
        log::info!("read config from: {}", config_file.display());
        let config = Config::from_file(src_dir.join(config_file))?;

        log::info!(
            "dev server binding (pass-through): {}:{} hot={} live_reload={}",
            config.dev_server.host,
            config.dev_server.port,
            config.dev_server.hot,
            config.dev_server.live_reload,
        );

        Ok(Self {
            src_dir,
            dst_dir,
            config,
            mode,
        })
    }

    pub fn build(self) -> anyhow::Result<()> {
        log::info!("build mode: {}", self.mode);
        log::info!("create dest dir: {}", self.dst_dir.display());
        fs::create_dir_all(&self.dst_dir)?;

        let fragments =
            Fragments::load(&self.src_dir).context("failed to load header/footer fragments")?;

        let targets = targets::generate(
            &self.config.pages,
            fragments.header.as_ref(),
            fragments.footer.as_ref(),
            &self.config.title,
        )
        .context("failed to generate page targets")?;

        let bundles = self.emit_bundles(&targets)?;

        log::info!("bundle stylesheet");
        let stylesheet = css::bundle_stylesheet(&self.src_dir, &self.dst_dir)?;

        for target in &targets {
            pages::emit_page(
                &self.src_dir,
                &self.dst_dir,
                target,
                stylesheet.as_deref(),
                &bundles,
                self.mode.is_production(),
            )?;
        }

        log::info!("copy static assets");
        assets::copy_images(&self.src_dir, &self.dst_dir, self.mode.is_production())?;
        assets::copy_fonts(&self.src_dir, &self.dst_dir)?;
        assets::copy_txt_assets(&self.src_dir, &self.dst_dir)?;

        if self.mode.is_production() {
            log::info!("compress outputs");
            assets::gzip_outputs(&self.dst_dir)?;
        }

        Ok(())
    }

    fn emit_bundles(
        &self,
        targets: &[targets::PageTarget<'_>],
    ) -> anyhow::Result<HashMap<String, String>> {
        // shared bundles once, then each page's own, keeping first-seen order
        let mut names: Vec<String> = config::SHARED_BUNDLES
            .iter()
            .map(|b| (*b).to_string())
            .collect();
        for target in targets {
            for bundle_ref in &target.bundle_refs {
                if !names.contains(bundle_ref) {
                    names.push(bundle_ref.clone());
                }
            }
        }

        assets::copy_bundles(&self.src_dir, &self.dst_dir, &names)
    }
}
