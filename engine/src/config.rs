use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

/// Where the per-monster files live and what the generated files are called.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    pub data_dir: PathBuf,
    pub combined_file: String,
    pub index_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            combined_file: "monsters.json".to_string(),
            index_file: "index.json".to_string(),
        }
    }
}

impl Config {
    /// Looked up in the working directory when no config path is given.
    pub const DEFAULT_FILE: &'static str = "bestiary.yaml";

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// An explicit path must exist; otherwise `bestiary.yaml` is used when
    /// present and the defaults when not.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(Self::DEFAULT_FILE);
                if default.is_file() {
                    Self::load(default)
                } else {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn combined_path(&self) -> PathBuf {
        self.data_dir.join(&self.combined_file)
    }

    pub fn index_path(&self) -> PathBuf {
        self.data_dir.join(&self.index_file)
    }

    /// File names the builders must not read back as monsters.
    pub fn generated_files(&self) -> [&str; 2] {
        [self.combined_file.as_str(), self.index_file.as_str()]
    }
}
