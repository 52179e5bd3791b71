use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::{APP_DIR, DEFAULT_LOCKED_SUFFIX, DEFAULT_UNLOCKED_SUFFIX};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    pub lock: LockSection,
    pub paths: PathsSection,
    pub log: LogSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LockSection {
    pub compress: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PathsSection {
    pub locked_suffix: String,
    pub unlocked_suffix: String,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            locked_suffix: DEFAULT_LOCKED_SUFFIX.to_string(),
            unlocked_suffix: DEFAULT_UNLOCKED_SUFFIX.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LogSection {
    pub level: LogLevel,
}

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Raise the level by one step per `-v`, saturating at `Trace`.
    pub fn raised_by(self, steps: u8) -> Self {
        const ORDER: [LogLevel; 6] = [
            LogLevel::Off,
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];
        let raised = (self as usize + steps as usize).min(ORDER.len() - 1);
        ORDER[raised]
    }
}

impl DialogueConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.paths.locked_suffix.is_empty() {
            return Err(anyhow::anyhow!("[paths] locked_suffix cannot be empty"));
        }
        if self.paths.unlocked_suffix.is_empty() {
            return Err(anyhow::anyhow!("[paths] unlocked_suffix cannot be empty"));
        }
        if self.paths.locked_suffix == self.paths.unlocked_suffix {
            return Err(anyhow::anyhow!(
                "[paths] locked_suffix and unlocked_suffix must differ"
            ));
        }
        Ok(())
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

/// Resolve the config path from `--config` or the XDG default.
pub fn resolve_config_path(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_path(),
    }
}

/// Read the config at `path`. A missing file yields the defaults.
pub fn read_config(path: &Path) -> anyhow::Result<DialogueConfig> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(DialogueConfig::default())
        }
        Err(e) => {
            return Err(anyhow::anyhow!(
                "Failed to read config {}: {}",
                path.display(),
                e
            ))
        }
    };
    let config: DialogueConfig = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))?;
    Ok(config)
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join(APP_DIR));
        }
    }
    Ok(home_dir()?.join(".config").join(APP_DIR))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
