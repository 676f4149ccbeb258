use std::time::Duration;

use reqwest::StatusCode;

/// Errors that can occur using the [`ResourceClient`](crate::ResourceClient)
#[derive(Debug)]
pub enum Error {
    Transport(reqwest::Error),
    Serde(serde_json::Error),
    UrlParse(url::ParseError),
    Timeout(Duration),
    Unauthorized,
    Problem { status: StatusCode, message: String },
    MissingUrlParam(String),
    UnknownAction(String),
}

impl Error {
    /// The human-readable message surfaced through
    /// [`Hooks::show_error_message`](crate::Hooks::show_error_message).
    ///
    /// Callers receiving the error get the exact string the display hook
    /// was shown, so they can react without re-displaying it.
    pub fn message(&self) -> String {
        match self {
            Error::Transport(err) => err.to_string(),
            Error::Serde(err) => err.to_string(),
            Error::UrlParse(err) => err.to_string(),
            Error::Timeout(after) => format!("request timed out after {}ms", after.as_millis()),
            Error::Unauthorized => "unauthorized".to_string(),
            Error::Problem { message, .. } => message.clone(),
            Error::MissingUrlParam(name) => format!("missing URL parameter `{name}`"),
            Error::UnknownAction(name) => format!("unknown custom action `{name}`"),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::UrlParse(err)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Transport(err) => write!(f, "Transport error: {}", err),
            Error::Serde(err) => write!(f, "Serde error: {}", err),
            Error::UrlParse(err) => write!(f, "URL parse error: {}", err),
            Error::Timeout(after) => {
                write!(f, "Request timed out after {}ms", after.as_millis())
            }
            Error::Unauthorized => write!(f, "Request was unauthorized"),
            Error::Problem { status, message } => {
                write!(f, "Server problem ({}): {}", status, message)
            }
            Error::MissingUrlParam(name) => write!(f, "Missing URL parameter `{}`", name),
            Error::UnknownAction(name) => write!(f, "Unknown custom action `{}`", name),
        }
    }
}

impl std::error::Error for Error {}

pub(crate) type Result<T> = std::result::Result<T, Error>;

/// Error body shape servers are expected to produce on failed requests.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ProblemBody {
    #[serde(default)]
    pub(crate) message: Option<String>,
}
