use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::error::Result;
use crate::notify::NotificationMode;

/// User preferences. Timer durations are intentionally not stored here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub notification: NotificationMode,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notification: NotificationMode::Bell,
            log_level: "info".to_string(),
        }
    }
}

pub trait ConfigStore {
    /// Missing files yield defaults; unreadable or malformed ones are errors
    fn try_load(&self) -> Result<Config>;
    fn save(&self, cfg: &Config) -> Result<()>;

    /// Like `try_load`, falling back to defaults on error
    fn load(&self) -> Config {
        self.try_load().unwrap_or_else(|err| {
            tracing::warn!(%err, "ignoring config");
            Config::default()
        })
    }
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn try_load(&self) -> Result<Config> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice::<Config>(&bytes)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
