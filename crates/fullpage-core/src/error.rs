use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Invalid engine setup: empty panel set, start index out of range, bad duration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Config file error: {0}")]
    ConfigFile(String),

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
