//! Error types for the REST helper library.
//!
//! # Design
//! Failures fall into a small closed set of kinds (transport, parse,
//! encoding, resource). Status codes are never errors here: a 404 or 500 is
//! passed through in `Response` for the caller to judge.
//!
//! `RestError::report` logs an error once and tags it as reported. Reporting
//! an already-reported error returns it untouched, so wrapping the same
//! failure at several layers produces a single `error!` line.

use thiserror::Error;

/// Coarse classification of a `RestError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Parse,
    Encoding,
    Resource,
    Other,
}

/// Errors returned by the client, the JSON utilities and fixture loading.
#[derive(Debug, Error)]
pub enum RestError {
    /// The transport failed before a response was received (connection
    /// refused, timeout, unreadable body).
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// A document could not be parsed as JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A URL could not be parsed.
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// The JSON parsed but does not have the shape the operation needs.
    #[error("unexpected JSON shape: {0}")]
    Shape(String),

    /// The JSON schema document could not be compiled.
    #[error("invalid JSON schema: {0}")]
    Schema(String),

    /// A string could not be encoded or decoded in the requested charset.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A fixture could not be read.
    #[error("resource error for {name}: {source}")]
    Resource {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// An error that has already been logged by `report`.
    #[error("{source}")]
    Reported {
        origin: &'static str,
        #[source]
        source: Box<RestError>,
    },

    /// A message-only failure that was logged when it was created.
    #[error("{message}")]
    Message {
        origin: &'static str,
        message: String,
    },
}

impl RestError {
    /// Log this error at `error` level under `origin` and tag it as reported.
    ///
    /// Errors that are already reported are returned as-is without logging
    /// a second time.
    pub fn report(self, origin: &'static str) -> RestError {
        if self.is_reported() {
            return self;
        }
        log::error!(target: origin, "{self}");
        RestError::Reported {
            origin,
            source: Box::new(self),
        }
    }

    /// Create and log a message-only error.
    pub fn reported(message: impl Into<String>, origin: &'static str) -> RestError {
        let message = message.into();
        log::error!(target: origin, "{message}");
        RestError::Message { origin, message }
    }

    pub fn is_reported(&self) -> bool {
        matches!(self, RestError::Reported { .. } | RestError::Message { .. })
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RestError::Transport(_) => ErrorKind::Transport,
            RestError::Json(_) | RestError::Url(_) | RestError::Shape(_) | RestError::Schema(_) => {
                ErrorKind::Parse
            }
            RestError::Encoding(_) => ErrorKind::Encoding,
            RestError::Resource { .. } => ErrorKind::Resource,
            RestError::Reported { source, .. } => source.kind(),
            RestError::Message { .. } => ErrorKind::Other,
        }
    }
}
