//! Traffic screen errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the screen controller.
#[derive(Error, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Error {
    /// The map has not finished initializing.
    #[error("code: not_ready, description: {0}")]
    NotReady(String),

    /// The requested phase change is not allowed from the current phase.
    #[error("code: invalid_transition, description: {0}")]
    InvalidTransition(String),

    /// The road information server answered with a non-success status.
    #[error("code: bad_status, description: server responded with status {0}")]
    BadStatus(u16),

    /// The request never produced a response.
    #[error("code: transport, description: {0}")]
    Transport(String),

    /// The response body could not be parsed.
    #[error("code: invalid_format, description: {0}")]
    InvalidFormat(String),

    /// The device position could not be determined.
    #[error("code: geolocation, description: {0}")]
    Geolocation(String),

    /// The map surface rejected an operation.
    #[error("code: map, description: {0}")]
    Map(String),

    /// Any other failure, with its context chain.
    #[error("code: server_error, description: {0}")]
    ServerError(String),
}

impl Error {
    /// Returns the error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotReady(_) => "not_ready",
            Self::InvalidTransition(_) => "invalid_transition",
            Self::BadStatus(_) => "bad_status",
            Self::Transport(_) => "transport",
            Self::InvalidFormat(_) => "invalid_format",
            Self::Geolocation(_) => "geolocation",
            Self::Map(_) => "map",
            Self::ServerError(_) => "server_error",
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        // if type is Error, keep the variant and prepend the added context
        if let Some(inner) = err.downcast_ref::<Self>() {
            return match inner {
                Self::NotReady(e) => Self::NotReady(format!("{err}: {e}")),
                Self::InvalidTransition(e) => Self::InvalidTransition(format!("{err}: {e}")),
                Self::BadStatus(status) => Self::BadStatus(*status),
                Self::Transport(e) => Self::Transport(format!("{err}: {e}")),
                Self::InvalidFormat(e) => Self::InvalidFormat(format!("{err}: {e}")),
                Self::Geolocation(e) => Self::Geolocation(format!("{err}: {e}")),
                Self::Map(e) => Self::Map(format!("{err}: {e}")),
                Self::ServerError(e) => Self::ServerError(format!("{err}: {e}")),
            };
        }

        let stack = err.chain().map(ToString::to_string).collect::<Vec<_>>().join(" -> ");
        Self::ServerError(stack)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidFormat(err.to_string())
    }
}
