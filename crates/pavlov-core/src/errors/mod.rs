//! Error taxonomy. Every fallible operation in the workspace returns [`PavlovResult`].

mod graph_error;
mod operant_error;

pub use graph_error::GraphError;
pub use operant_error::OperantError;

/// Result alias used across the workspace.
pub type PavlovResult<T> = Result<T, PavlovError>;

/// Root error type.
#[derive(Debug, thiserror::Error)]
pub enum PavlovError {
    /// A query referenced a variable outside the declared schema.
    #[error("unknown variable: {name}")]
    UnknownVariable { name: String },

    #[error("value {value:?} is not in the domain of {variable}")]
    UnknownValue { variable: String, value: String },

    #[error("assignment is missing schema variable {missing}")]
    IncompleteAssignment { missing: String },

    #[error("variable declared twice: {name}")]
    DuplicateVariable { name: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("operant error: {0}")]
    Operant(#[from] OperantError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PavlovError {
    pub fn unknown_variable(name: impl Into<String>) -> Self {
        Self::UnknownVariable { name: name.into() }
    }

    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}
