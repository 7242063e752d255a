//! Error types for the game front end and its persistence

/// Everything that can go wrong outside the pure game logic.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Terminal or filesystem I/O
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// High-score file could not be encoded or decoded
    #[error("Storage error: {0}")]
    Storage(#[from] serde_json::Error),

    /// Sound output or decoding failed
    #[error("Audio error: {0}")]
    Audio(String),

    /// Invalid command line or derived settings
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for fallible game operations
pub type Result<T> = std::result::Result<T, GameError>;
