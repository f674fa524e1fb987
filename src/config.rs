use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::content;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub mode: String,
    pub paragraph_url: String,
    pub image_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: "text".to_string(),
            paragraph_url: content::DEFAULT_PARAGRAPH_URL.to_string(),
            image_url: content::DEFAULT_IMAGE_URL.to_string(),
        }
    }
}

impl From<&crate::app::App> for Config {
    fn from(app: &crate::app::App) -> Self {
        Self {
            mode: app.mode.to_string().to_lowercase(),
            paragraph_url: app.settings.paragraph_url.clone(),
            image_url: app.settings.image_url.clone(),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "tipsum") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("tipsum_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
