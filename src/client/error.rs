use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load configuration: {0}")]
    Config(#[from] envy::Error),

    #[error("invalid host {host:?}: {reason}")]
    InvalidHost { host: String, reason: String },

    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    #[error("failed to fetch classes: {0}")]
    Status(StatusCode),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no class found at {0}")]
    NoClassAt(String),

    #[error("failed to book class: {}", rejection_detail(.status, .message))]
    Rejected { status: StatusCode, message: String },
}

fn rejection_detail(status: &StatusCode, message: &str) -> String {
    if message.is_empty() {
        format!("status {}", status)
    } else {
        message.to_string()
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(reqwest_middleware::Error::Reqwest(err))
    }
}
