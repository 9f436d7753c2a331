use thiserror::Error;

/// Failure of a single schedule lookup.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("football-data returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("request to football-data failed: {0}")]
    Transport(String),
    #[error("could not decode football-data response: {0}")]
    Decode(String),
}

/// Failure to deliver a message to the chat.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("telegram returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("request to telegram failed: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("failed to read translation file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse translation file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
