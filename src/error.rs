use thiserror::Error;

#[derive(Error, Debug)]
pub enum MorphError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Invalid option format: '{option}'. {reason}")]
    InvalidOption { option: String, reason: String },

    #[error("Invalid payload file: {path} - {reason}")]
    InvalidPayload { path: String, reason: String },

    #[error("{0}")]
    EmptyPayload(String),

    #[error("Resource not found: {resource}")]
    ResourceNotFound { resource: String },

    #[error("Invalid configuration: {field} - {reason}")]
    InvalidConfig { field: String, reason: String },
}

pub type Result<T> = std::result::Result<T, MorphError>;

impl MorphError {
    pub fn invalid_option<S: Into<String>>(option: S, reason: S) -> Self {
        MorphError::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_payload<S: Into<String>>(path: S, reason: S) -> Self {
        MorphError::InvalidPayload {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn empty_payload() -> Self {
        MorphError::EmptyPayload("Specify at least one option to update".to_string())
    }

    pub fn resource_not_found<S: Into<String>>(resource: S) -> Self {
        MorphError::ResourceNotFound {
            resource: resource.into(),
        }
    }

    pub fn invalid_config<S: Into<String>>(field: S, reason: S) -> Self {
        MorphError::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
