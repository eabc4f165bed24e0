//! Client configuration loaded from `~/.config/tablesnap/config.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable that overrides [`Config::endpoint`].
pub const ENDPOINT_ENV: &str = "TABLESNAP_ENDPOINT";

/// Effective client configuration.
///
/// Every key is optional in the file; missing keys take the defaults
/// below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the extraction service (`/upload`, `/extract-table`).
    pub endpoint: String,
    /// Width of the preview viewport in pixels.
    pub viewport_width: u32,
    /// Height of the preview viewport before the first document is shown.
    pub viewport_height: u32,
    /// Offset of the canvas inside the viewport, in viewport pixels.
    pub canvas_offset_x: u32,
    pub canvas_offset_y: u32,
    /// JPEG quality (1-100) for the canvas snapshot sent to the backend.
    pub jpeg_quality: u8,
    pub connect_timeout_secs: u64,
    /// Table extraction runs OCR server-side and can be slow.
    pub timeout_secs: u64,
    /// Default workbook path for exports.
    pub export_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000".to_string(),
            viewport_width: 1000,
            viewport_height: 800,
            canvas_offset_x: 0,
            canvas_offset_y: 0,
            jpeg_quality: 92,
            connect_timeout_secs: 10,
            timeout_secs: 120,
            export_path: PathBuf::from("extracted_table.xlsx"),
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults when it does not exist.
    ///
    /// `TABLESNAP_ENDPOINT` overrides the endpoint from the file.
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)?;
                Self::from_toml(&content)
                    .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?
            }
            _ => Self::default(),
        };

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                config.endpoint = endpoint;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::Config(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.viewport_width == 0 {
            return Err(Error::Config("viewport_width must be positive".into()));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(Error::Config(format!(
                "jpeg_quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )));
        }
        url::Url::parse(&self.endpoint)?;
        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}

/// Return the path to the config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tablesnap").join("config.toml"))
}
