use thiserror::Error;

#[derive(Debug, Error)]
pub enum GoogleMapsError {
    /// Rejected locally, before any request is sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Remote service error: {status}{}", detail(.message))]
    RemoteService {
        status: String,
        message: Option<String>,
    },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Missing API key: {0}")]
    MissingApiKey(#[from] std::env::VarError),

    #[error("No route from origin {origin} to destination {destination}: {status}")]
    UnroutableElement {
        origin: usize,
        destination: usize,
        status: String,
    },

    #[error("Row {origin} has {actual} elements, expected {expected}")]
    RaggedMatrix {
        origin: usize,
        expected: usize,
        actual: usize,
    },
}

impl GoogleMapsError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        GoogleMapsError::InvalidArgument(message.into())
    }
}

fn detail(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(" - {message}"),
        None => String::new(),
    }
}

pub type Result<T, E = GoogleMapsError> = std::result::Result<T, E>;
