//! JSON file configuration adapter.
//!
//! Implements [`ConfigPort`].  The file is read once at startup; there is
//! no reload.  A missing path or missing file yields the compiled-in
//! defaults, so a stock install needs no config at all.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::FanConfig;

pub struct FileConfigAdapter {
    path: Option<PathBuf>,
}

impl FileConfigAdapter {
    /// Read from `path`, or use defaults when `None`.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl ConfigPort for FileConfigAdapter {
    fn load(&self) -> Result<FanConfig, ConfigError> {
        let Some(path) = &self.path else {
            info!("Config: no file given, using defaults");
            return Ok(FanConfig::default());
        };

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Config: {} not found, using defaults", path.display());
                return Ok(FanConfig::default());
            }
            Err(e) => {
                error!("Config: read {} failed: {}", path.display(), e);
                return Err(ConfigError::IoError);
            }
        };

        let cfg: FanConfig = serde_json::from_str(&text).map_err(|e| {
            error!("Config: {} is malformed: {}", path.display(), e);
            ConfigError::Corrupted
        })?;
        cfg.validate()?;
        info!("Config: loaded {}", path.display());
        Ok(cfg)
    }
}
