use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const ICON_ID: &str = "tsclient";
pub const TOOLTIP: &str = "Terminal Server Client";

const APP_DIR: &str = "tsclient-tray";
const CONFIG_FILE: &str = "config.json";
const MRU_DIR: &str = ".tsclient";
const MRU_FILE: &str = "mru.tsc";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Command line of the remote-desktop client, split with shell rules.
    pub launcher: String,
    /// Flag placed before the profile path when launching a saved profile.
    pub profile_flag: String,
    /// Overrides `~/.tsclient/mru.tsc`.
    pub mru_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            launcher: "tsclient".to_string(),
            profile_flag: "-x".to_string(),
            mru_file: None,
        }
    }
}

impl Config {
    /// Loads the user config, falling back to defaults when it is absent or unusable.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            debug!("no config directory, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                warn!(error = %e, "ignoring config file");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// MRU file location: the configured override, else `~/.tsclient/mru.tsc`.
    pub fn mru_path(&self) -> Option<PathBuf> {
        self.mru_file.clone().or_else(default_mru_path)
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

pub fn default_mru_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(MRU_DIR).join(MRU_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"launcher": "/opt/tsclient/bin/tsclient"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.launcher, "/opt/tsclient/bin/tsclient");
        assert_eq!(config.profile_flag, "-x");
        assert_eq!(config.mru_file, None);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "launcher = tsclient").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn mru_override_wins() {
        let config = Config {
            mru_file: Some(PathBuf::from("/srv/profiles/mru.tsc")),
            ..Config::default()
        };
        assert_eq!(
            config.mru_path(),
            Some(PathBuf::from("/srv/profiles/mru.tsc"))
        );
    }

    #[test]
    fn default_mru_path_lives_under_dot_tsclient() {
        if let Some(path) = default_mru_path() {
            assert!(path.ends_with(".tsclient/mru.tsc"));
        }
    }
}
