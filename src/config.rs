use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "marketboard.yaml";

/// Developer attribution shown in the side panel
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DeveloperInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub linkedin: String,
}

impl DeveloperInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.github.is_empty() && self.linkedin.is_empty()
    }
}

/// Dashboard configuration from marketboard.yaml
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_image")]
    pub image: PathBuf,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    #[serde(default)]
    pub developer: DeveloperInfo,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_image() -> PathBuf {
    PathBuf::from("Images.jpg")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("marketboard.log")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            image: default_image(),
            log_file: default_log_file(),
            developer: DeveloperInfo::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .context(format!("Failed to read config: {:?}", path.as_ref()))?;
        let config: AppConfig =
            serde_yaml::from_str(&content).context("Failed to parse config YAML")?;
        Ok(config)
    }

    /// Use the config file in the working directory when present, then the
    /// user config directory, else built-in defaults. A missing file is not
    /// an error; a malformed one is.
    pub fn discover() -> Result<Self> {
        let local = Path::new(CONFIG_FILE);
        if local.exists() {
            return Self::load(local);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("marketboard").join(CONFIG_FILE);
            if path.exists() {
                return Self::load(path);
            }
        }

        Ok(Self::default())
    }
}
