//! Error types for toolport-core

use std::path::PathBuf;

use crate::types::ClientKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid URL: {input}")]
    InvalidToolUrl { input: String },

    #[error(
        "Could not extract server ID from URL. Expected format: */tool{{id}} or */tool{{id}}/sse"
    )]
    MissingToolId { url: String },

    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid client: {name}. Valid clients are: {}", ClientKind::id_list())]
    UnknownClient { name: String },

    #[error("Server verification failed: Invalid tool ID or URL.")]
    InvalidToolId { tool_id: String },

    #[error("Server verification failed: {status}")]
    VerificationFailed { status: String },

    #[error("Failed to fetch server details: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Command '{command}' not found. Make sure {command} is installed and on your PATH")]
    ExecutableNotFound { command: String },

    #[error("Command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    #[error(
        "Could not open {uri}. Copy the link into your browser or client to finish the installation"
    )]
    ProtocolDispatch {
        uri: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine your home directory")]
    HomeDirUnavailable,

    #[error("Installation failed on all clients")]
    AllClientsFailed,

    #[error("Invalid settings file {}: {message}", path.display())]
    Settings { path: PathBuf, message: String },
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Short, human-readable text for the console.
    ///
    /// Expected failure categories get a friendlier phrasing; anything else
    /// falls back to the full error message.
    pub fn friendly(&self) -> String {
        match self {
            Error::InvalidToolUrl { .. } => "Invalid tool URL. Please check the URL format.".into(),
            Error::ExecutableNotFound { .. } => {
                "Client executable not found. Please ensure it is installed and in your PATH."
                    .into()
            }
            Error::Http(_) => {
                "Failed to verify server. Please check your internet connection and API key."
                    .into()
            }
            Error::Io { source, .. } if source.kind() == std::io::ErrorKind::PermissionDenied => {
                format!("{self}\nCheck that you have permission to modify this file.")
            }
            _ => self.to_string(),
        }
    }

    /// Whether this error was caused by bad user input rather than the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidToolUrl { .. }
                | Error::MissingToolId { .. }
                | Error::InvalidInput(_)
                | Error::UnknownClient { .. }
        )
    }
}
