use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the tray host while registering the icon or editing the popup menu.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("tray icon could not be created: {0}")]
    Tray(#[from] tray_icon::Error),

    #[error("menu operation failed: {0}")]
    Menu(#[from] tray_icon::menu::Error),

    #[error("icon bitmap rejected: {0}")]
    Icon(#[from] tray_icon::BadIcon),

    #[error("menu requested before the panel icon was registered")]
    IconNotRegistered,

    #[error("menu position {position} is out of range (menu has {len} items)")]
    OutOfRange { position: usize, len: usize },
}

/// Why a profile list could not be decoded from MRU text.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array, found {0}")]
    NotAnArray(&'static str),

    #[error("entry {index} is not a string")]
    NonStringEntry { index: usize },
}

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("no home directory to locate the MRU file")]
    NoHome,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("launcher command is empty")]
    EmptyCommand,

    #[error("launcher command could not be parsed: {0}")]
    Parse(#[from] shell_words::ParseError),

    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
