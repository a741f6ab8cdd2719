//! Error types for HashLedger

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("Invalid difficulty: {0} (expected 1..={max})", max = crate::miner::MAX_DIFFICULTY)]
    InvalidDifficulty(u32),
    #[error("Mining gave up after {attempts} attempts")]
    AttemptsExhausted { attempts: u64 },
    #[error("Nonce space exhausted")]
    NonceExhausted,
    #[error("Broken link at block {index}: expected prev_hash {expected}, found {found}")]
    BrokenLink {
        index: usize,
        expected: String,
        found: String,
    },
    #[error("Block not found: {0}")]
    BlockNotFound(usize),
    #[error("Chain has no genesis block")]
    EmptyChain,
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for ChainError {
    fn from(err: std::io::Error) -> Self {
        ChainError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ChainError {
    fn from(err: toml::de::Error) -> Self {
        ChainError::Config(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;
