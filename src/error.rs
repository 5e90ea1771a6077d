use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudioError {
    #[error("{0}")]
    Validation(String),
    #[error("HTTP error! status: {status}{}", transport_detail(.message))]
    Transport {
        status: u16,
        message: Option<String>,
    },
    #[error("{0}")]
    Application(String),
    #[error("{0}")]
    DataShape(String),
    #[error("Request error: {0}")]
    Request(String),
    #[error("Response error: {0}")]
    Response(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(String),
}

fn transport_detail(message: &Option<String>) -> String {
    match message {
        Some(message) if !message.is_empty() => format!(" ({})", message),
        _ => String::new(),
    }
}

impl From<std::io::Error> for StudioError {
    fn from(err: std::io::Error) -> Self {
        StudioError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for StudioError {
    fn from(err: reqwest::Error) -> Self {
        StudioError::Request(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;
