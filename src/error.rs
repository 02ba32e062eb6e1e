//! Error type shared by configuration, content loading, and terminal setup.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl FolioError {
    pub fn config(message: impl Into<String>) -> Self {
        FolioError::Config {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;
