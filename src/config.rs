//! Application configuration loaded from a TOML file.
//!
//! Every section is optional; an empty file (or no file at all) yields [`AppConfig::default`].
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8501"
//!
//! [branding]
//! company_name = "AL HAYAH REAL ESTATE INVESTMENT"
//! logo_path = "assets/logo.jpg"
//!
//! [fonts]
//! directory = "assets/fonts"
//!
//! [output]
//! directory = "reports"
//! file_prefix = "real_estate_report"
//!
//! [layout]
//! logo_width_mm = 80.0
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Environment variable overriding `[server] bind`.
pub const BIND_ENV_VAR: &str = "CALL_REPORT_BIND";

/// Company shown in the report header and footer.
pub const DEFAULT_COMPANY_NAME: &str = "AL HAYAH REAL ESTATE INVESTMENT";

const DEFAULT_BIND: &str = "127.0.0.1:8501";
const DEFAULT_LOGO_PATH: &str = "assets/logo.jpg";
const DEFAULT_FILE_PREFIX: &str = "real_estate_report";
const DEFAULT_LOGO_WIDTH_MM: f64 = 80.0;

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub branding: Branding,
    pub fonts: FontsConfig,
    pub output: OutputConfig,
    pub layout: LayoutConfig,
}

/// `[server]` section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_owned(),
        }
    }
}

/// Company identity printed on every report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    pub company_name: String,
    /// Logo image; a missing file is skipped when rendering.
    pub logo_path: Option<PathBuf>,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            company_name: DEFAULT_COMPANY_NAME.to_owned(),
            logo_path: Some(PathBuf::from(DEFAULT_LOGO_PATH)),
        }
    }
}

/// `[fonts]` section.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    /// Directory holding the four `Roboto-*.ttf` files; searched before the built-in locations.
    pub directory: Option<PathBuf>,
}

/// `[output]` section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the CLI writes reports into when no explicit output path is given.
    pub directory: PathBuf,
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_prefix: DEFAULT_FILE_PREFIX.to_owned(),
        }
    }
}

/// `[layout]` section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub logo_width_mm: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            logo_width_mm: DEFAULT_LOGO_WIDTH_MM,
        }
    }
}

impl AppConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(input: &str) -> Result<Self, ReportError> {
        toml::from_str(input).map_err(|source| ReportError::Config {
            path: None,
            source,
        })
    }

    /// Reads and parses the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ReportError::Io {
            context: format!("reading config file {}", path.display()),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ReportError::Config {
            path: Some(path.to_path_buf()),
            source,
        })?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Loads `path` when given, otherwise the defaults, then applies environment overrides.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ReportError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(bind) = env::var(BIND_ENV_VAR) {
            if !bind.trim().is_empty() {
                self.server.bind = bind.trim().to_owned();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = AppConfig::from_toml_str("").expect("parse empty config");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.branding.company_name, DEFAULT_COMPANY_NAME);
        assert_eq!(config.output.file_prefix, "real_estate_report");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [branding]
            company_name = "Nile Homes"

            [fonts]
            directory = "/opt/fonts"
            "#,
        )
        .expect("parse config");

        assert_eq!(config.branding.company_name, "Nile Homes");
        assert_eq!(
            config.branding.logo_path,
            Some(PathBuf::from("assets/logo.jpg"))
        );
        assert_eq!(config.fonts.directory, Some(PathBuf::from("/opt/fonts")));
        assert_eq!(config.server.bind, "127.0.0.1:8501");
    }

    #[test]
    fn malformed_config_is_reported() {
        let err = AppConfig::from_toml_str("[server]\nbind = 5").unwrap_err();
        assert!(matches!(err, ReportError::Config { path: None, .. }));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("call-report.toml");
        fs::write(&path, "[layout]\nlogo_width_mm = 60.0\n").expect("write config");

        let config = AppConfig::load(&path).expect("load config");
        assert_eq!(config.layout.logo_width_mm, 60.0);
    }
}
