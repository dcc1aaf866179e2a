//! Error types for nested scope expansion

use thiserror::Error;

/// Errors raised while building a scope hierarchy or expanding a scope token.
///
/// Both variants are configuration errors: they abort loading and must be fixed
/// by the operator, never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScopeError {
    /// A scope name appears more than once in the hierarchy declaration
    #[error("Scope \"{0}\" is declared more than once in transform options.")]
    DuplicateScope(String),

    /// A bracketed token names a scope absent from the hierarchy
    #[error("Scope \"{0}\" was not specified in transform options and can't be expanded.")]
    UnknownScope(String),
}

impl ScopeError {
    /// Returns the scope name the error refers to
    pub fn scope(&self) -> &str {
        match self {
            Self::DuplicateScope(name) | Self::UnknownScope(name) => name,
        }
    }
}

/// Result type for hierarchy and expansion operations
pub type ScopeResult<T> = std::result::Result<T, ScopeError>;

/// Errors raised while loading a transform configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error
    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parse error
    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension is neither `.toml` nor `.json`
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// The declared hierarchy is invalid
    #[error(transparent)]
    Scope(#[from] ScopeError),
}

/// Result type for configuration loading
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
