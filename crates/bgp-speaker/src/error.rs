//! Error types for the route announcer.
//!
//! Per-session failures ([`SessionError`]) are produced by peer session
//! implementations. [`AnnounceError`] is what callers of the announcer see.

use std::io;
use thiserror::Error;

/// Result type alias for announce operations.
pub type AnnounceResult<T> = Result<T, AnnounceError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors reported by a single BGP peer session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session could not deliver the update to its peer.
    #[error("transport error: {0}")]
    Transport(String),

    /// The peer (or the speaker library) refused the update.
    ///
    /// Produced by session implementations; the announcer passes it through.
    #[error("peer {peer} rejected advertisements: {reason}")]
    Rejected {
        /// The peer name or address.
        peer: String,
        /// Reason reported by the session.
        reason: String,
    },

    /// The session was torn down before the update was applied.
    #[error("session closed")]
    Closed,

    /// `replace` was called with no advertisements.
    #[error("refusing to replace advertisements with an empty set")]
    EmptyReplace,

    /// The task driving this session's update panicked or was cancelled.
    #[error("session task failed: {0}")]
    TaskFailed(String),
}

impl SessionError {
    /// Returns true if this error indicates a transient condition
    /// that may succeed on retry.
    ///
    /// The announcer never retries; this is for callers building their own
    /// retry/backoff around [`RouteAnnouncer::announce`](crate::RouteAnnouncer::announce).
    pub fn is_retryable(&self) -> bool {
        matches!(self, SessionError::Transport(_) | SessionError::Closed)
    }
}

/// Errors surfaced by [`RouteAnnouncer::announce`](crate::RouteAnnouncer::announce).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnounceError {
    /// Every input prefix was malformed (or none were given).
    #[error("no BGP advertisements made")]
    NoAdvertisements,

    /// At least one peer session failed to apply the announcement.
    #[error("failed to update BGP peer {peer}: {source}")]
    Session {
        /// The peer whose failure completed first.
        peer: String,
        /// The session's error.
        #[source]
        source: SessionError,
    },
}

/// Errors that can occur while loading the speaker configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("failed to read config file '{path}': {source}")]
    Io {
        /// The path that could not be read.
        path: String,
        #[source]
        source: io::Error,
    },

    /// The configuration was not valid YAML for the expected schema.
    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A field failed validation.
    #[error("invalid configuration for {field}: {message}")]
    Invalid {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },
}

impl ConfigError {
    /// Creates an invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}
