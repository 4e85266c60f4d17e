use std::{fs, net::Ipv4Addr, path::Path};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Shared `<title>` for every generated page.
    pub title: String,
    /// Ordered list of logical page names; one output page per entry.
    pub pages: Vec<String>,

    #[serde(default)]
    pub dev_server: DevServer,
}

pub const PAGES_DIR: &str = "pages";
pub const TEMPLATE_DIR: &str = "template";
pub const HEADER_FILE: &str = "header.html";
pub const FOOTER_FILE: &str = "footer.html";

pub const JS_DIR: &str = "js";
pub const CSS_DIR: &str = "css";
pub const CSS_ENTRY: &str = "main.css";
pub const TXT_ASSETS_DIR: &str = "assets/txt";
pub const IMAGE_ASSETS_DIR: &str = "assets/images";
pub const FONT_ASSETS_DIR: &str = "assets/fonts";

/// Bundles linked into every page, ahead of the page-specific one.
pub const SHARED_BUNDLES: [&str; 2] = ["main", "vendor"];

pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];
pub const FONT_EXTENSIONS: [&str; 4] = ["woff", "woff2", "ttf", "eot"];

/// Dev-server binding, handed through to the external server untouched.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DevServer {
    pub host: Ipv4Addr,
    pub port: u16,
    pub hot: bool,
    pub live_reload: bool,
    pub open: bool,
    pub compress: bool,
}

impl Default for DevServer {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::LOCALHOST,
            port: 9000,
            hot: false,
            live_reload: true,
            open: false,
            compress: true,
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file = fs::File::open(path)?;
        Ok(serde_yaml::from_reader(file)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn parses_full_config() {
        let yaml = "\
title: Custom template
pages: [index, about, contact]
dev_server:
  host: 192.168.1.104
  port: 9000
  hot: false
  live_reload: true
  open: true
  compress: true
";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.title, "Custom template");
        assert_eq!(config.pages, vec!["index", "about", "contact"]);
        assert_eq!(config.dev_server.host, Ipv4Addr::new(192, 168, 1, 104));
        assert_eq!(config.dev_server.port, 9000);
        assert!(!config.dev_server.hot);
        assert!(config.dev_server.live_reload);
    }

    #[test]
    fn dev_server_section_is_optional() {
        let yaml = "title: t\npages: [index]\n";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.dev_server.port, DevServer::default().port);
    }
}
