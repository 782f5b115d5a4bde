// src/errors.rs
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Backend calls that run under a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SubmitJob,
    FetchResumes,
    HealthCheck,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::SubmitJob => write!(f, "submit job"),
            Operation::FetchResumes => write!(f, "fetch resumes"),
            Operation::HealthCheck => write!(f, "health check"),
        }
    }
}

/// Every failure a gesture can end in. The `Display` text is what the user sees.
#[derive(Error, Debug)]
pub enum ScreenError {
    #[error("{0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{}", timeout_message(.operation))]
    Timeout { operation: Operation, after: Duration },

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response from server: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to render template: {0}")]
    Template(#[from] askama::Error),
}

fn timeout_message(operation: &Operation) -> &'static str {
    match operation {
        Operation::SubmitJob => "Request timed out. The server might be busy processing resumes.",
        Operation::FetchResumes => "Request timed out while fetching resumes.",
        Operation::HealthCheck => "Request timed out while checking backend health.",
    }
}

impl ScreenError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ScreenError::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScreenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_messages_differ_per_operation() {
        let submit = ScreenError::Timeout {
            operation: Operation::SubmitJob,
            after: Duration::from_secs(60),
        };
        let fetch = ScreenError::Timeout {
            operation: Operation::FetchResumes,
            after: Duration::from_secs(10),
        };

        assert!(submit.to_string().contains("server might be busy"));
        assert!(fetch.to_string().contains("fetching resumes"));
        assert!(submit.is_timeout() && fetch.is_timeout());
    }

    #[test]
    fn server_error_displays_message_only() {
        let err = ScreenError::Server {
            status: 400,
            message: "Weights must sum to 100%".to_string(),
        };
        assert_eq!(err.to_string(), "Weights must sum to 100%");
        assert!(!err.is_timeout());
    }
}
