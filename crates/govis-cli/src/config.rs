//! Locating and reading the TOML configuration file.
//!
//! An explicit `--config` path must exist. Otherwise the first existing file
//! among [`search_paths`] is used, and without one the defaults apply.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use govis::{GovisError, config::AppConfig};

/// Config file looked up relative to the working directory.
const LOCAL_CONFIG: &str = "go-vis/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("configuration file {0} does not exist")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for GovisError {
    fn from(err: ConfigError) -> Self {
        GovisError::Config(err.to_string())
    }
}

/// Files tried, in order, when no explicit path is given: the local
/// `go-vis/config.toml`, then `config.toml` in the platform config directory.
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
    match ProjectDirs::from("com", "go-vis", "go-vis") {
        Some(dirs) => paths.push(dirs.config_dir().join("config.toml")),
        None => debug!("No platform config directory"),
    }
    paths
}

/// Loads the configuration for this run.
///
/// # Errors
///
/// Fails when the explicit file is missing or when the chosen file is not
/// valid TOML for [`AppConfig`].
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, GovisError> {
    let path = match explicit_path {
        Some(path) => path.as_ref().to_path_buf(),
        None => match search_paths().into_iter().find(|path| path.is_file()) {
            Some(path) => path,
            None => {
                debug!("No configuration file found, using defaults");
                return Ok(AppConfig::default());
            }
        },
    };

    info!(path = path.display().to_string(); "Loading configuration");
    read_config(&path)
}

fn read_config(path: &Path) -> Result<AppConfig, GovisError> {
    if !path.is_file() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|err| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
        .into()
    })
}
