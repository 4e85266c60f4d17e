use std::{fs, io, path::Path};

use crate::{config, targets::Fragment};

/// Header and footer markup read from `template/` once per build.
///
/// A missing file is recorded as `None` rather than an error here; the target
/// generator is the one that decides an absent fragment is fatal.
#[derive(Debug, Clone)]
pub struct Fragments {
    pub header: Option<Fragment>,
    pub footer: Option<Fragment>,
}

impl Fragments {
    pub fn load(src_dir: impl AsRef<Path>) -> io::Result<Self> {
        let template_dir = src_dir.as_ref().join(config::TEMPLATE_DIR);

        Ok(Self {
            header: read_fragment(template_dir.join(config::HEADER_FILE))?,
            footer: read_fragment(template_dir.join(config::FOOTER_FILE))?,
        })
    }
}

fn read_fragment(path: impl AsRef<Path>) -> io::Result<Option<Fragment>> {
    let path = path.as_ref();

    match fs::read_to_string(path) {
        Ok(html) => Ok(Some(Fragment::new(html))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::warn!("fragment not found: {}", path.display());
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
