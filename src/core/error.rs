use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Roll out of range: {0} (expected 1..=20)")]
    RollOutOfRange(u8),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid ability tree: {0}")]
    InvalidAbilityTree(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
