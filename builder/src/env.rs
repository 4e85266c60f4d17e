use std::{fmt, str::FromStr};

use envconfig::Envconfig;

/// Build-time environment, read once at startup.
#[derive(Clone, Envconfig)]
pub struct Env {
    /// Selects the build profile; gates compression post-processing.
    #[envconfig(from = "BUILD_MODE", default = "development")]
    pub mode: Mode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "unrecognized build mode `{other}`, expected `development` or `production`"
            )),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}
