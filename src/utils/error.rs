use thiserror::Error;

#[derive(Error, Debug)]
pub enum CpStarsError {
    #[error("Resource not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Failed to decode response of {operation}: {source}")]
    Decode {
        operation: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Record does not match the CP-Stars schema: {message}")]
    InvalidRecord { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for `{field}` ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lookup,
    Input,
    Network,
    Remote,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CpStarsError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::Lookup,
            Self::Validation { .. } => ErrorCategory::Input,
            Self::Transport(_) => ErrorCategory::Network,
            Self::Server { .. } => ErrorCategory::Remote,
            Self::Decode { .. }
            | Self::InvalidRecord { .. }
            | Self::Serialization(_)
            | Self::Csv(_) => ErrorCategory::Data,
            Self::Config { .. } | Self::InvalidConfigValue { .. } | Self::MissingConfig { .. } => {
                ErrorCategory::Configuration
            }
            Self::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Remote => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Data | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "Check the CP-Stars id or Renson identifier",
            Self::Validation { .. } => "Check the request parameters",
            Self::Transport(_) => "Check the network connection and the configured host address",
            Self::Server { .. } => "The CP-Stars backend failed; try again later",
            Self::Decode { .. } | Self::Serialization(_) => {
                "The backend returned unexpected data; check that the host is a CP-Stars backend"
            }
            Self::InvalidRecord { .. } => {
                "Disable client-side validation to receive the record unchecked"
            }
            Self::Csv(_) | Self::Io(_) => "Check the output destination",
            Self::Config { .. } | Self::InvalidConfigValue { .. } | Self::MissingConfig { .. } => {
                "Fix the configuration file, environment or command line flags"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NotFound { message } => format!("Nothing found: {}", message),
            Self::Transport(e) if e.is_timeout() => "The CP-Stars backend timed out".to_string(),
            Self::Transport(_) => "Could not reach the CP-Stars backend".to_string(),
            Self::Server { status, .. } => format!("The CP-Stars backend failed (HTTP {})", status),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CpStarsError>;
