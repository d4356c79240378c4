use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the probe harness
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Request to {endpoint} failed: {source}")]
    #[diagnostic(code(familycal_probe::transport))]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned status {actual}, expected {expected}")]
    #[diagnostic(code(familycal_probe::unexpected_status))]
    UnexpectedStatus {
        endpoint: String,
        expected: u16,
        actual: u16,
    },

    #[error("{endpoint} returned a body that is not a JSON object: {reason}")]
    #[diagnostic(code(familycal_probe::invalid_body))]
    InvalidBody { endpoint: String, reason: String },

    #[error("{endpoint} returned an unexpected response: {reason}")]
    #[diagnostic(code(familycal_probe::unexpected_body))]
    UnexpectedBody { endpoint: String, reason: String },

    #[error("Environment error: {0}")]
    #[diagnostic(code(familycal_probe::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(familycal_probe::config),
        help("check FAMILYCAL_BASE_URL, PROBE_TIMEOUT_SECS and the probe config file")
    )]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(familycal_probe::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(familycal_probe::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(familycal_probe::other))]
    Other(String),
}

impl Error {
    /// Whether the request never produced an HTTP response
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type ProbeResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid value for environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create unexpected body errors
pub fn body_error(endpoint: &str, reason: &str) -> Error {
    Error::UnexpectedBody {
        endpoint: endpoint.to_string(),
        reason: reason.to_string(),
    }
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
