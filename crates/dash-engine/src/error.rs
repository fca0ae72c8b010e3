//! Error types for dash-engine.
//!
//! Only programming errors and configuration problems surface as
//! `EngineError`. Collaborator failures (storage, audio) are caught where
//! they happen and degrade to no-ops.

use thiserror::Error;

/// Result type for dash-engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors returned by the engine's public API.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A configuration value is out of its accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// `acquire()` was called on a pool constructed with `max_size == 0`.
    #[error("cannot acquire from a zero-capacity pool")]
    ZeroCapacityPool,

    /// The engine was destroyed and cannot be restarted.
    #[error("engine has been destroyed")]
    Destroyed,

    /// The host supplied a configuration document that is not valid JSON.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Failure reported by a high-score store. Never propagated past the keeper.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("stored value {0:?} is not a score")]
    Corrupt(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Failure reported by an audio backend. Never propagated past the audio system.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio output unavailable")]
    Unavailable,
    #[error("audio backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parse_error_converts() {
        let err: EngineError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, EngineError::ConfigParse(_)));
        assert!(err.to_string().starts_with("failed to parse configuration"));
    }

    #[test]
    fn messages_are_readable() {
        assert_eq!(
            EngineError::ZeroCapacityPool.to_string(),
            "cannot acquire from a zero-capacity pool"
        );
        assert_eq!(
            StorageError::Corrupt("abc".into()).to_string(),
            "stored value \"abc\" is not a score"
        );
    }
}
