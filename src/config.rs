//! Configuration management for HashLedger

use crate::error::{ChainError, Result};
use crate::miner::{check_difficulty, MiningLimit};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "hashledger.toml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub miner: MinerConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LedgerConfig {
    #[serde(default = "default_difficulty")]
    pub difficulty: u32,
    /// Absent means mining runs until it finds a nonce.
    #[serde(default)]
    pub max_attempts: Option<u64>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            max_attempts: None,
        }
    }
}

impl LedgerConfig {
    pub fn mining_limit(&self) -> MiningLimit {
        MiningLimit::from_max_attempts(self.max_attempts)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MinerConfig {
    #[serde(default = "default_creator_id")]
    pub creator_id: u64,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            creator_id: default_creator_id(),
        }
    }
}

fn default_difficulty() -> u32 {
    2
}

fn default_creator_id() -> u64 {
    42
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_difficulty(self.ledger.difficulty)
            .map_err(|e| ChainError::Config(format!("ledger.difficulty: {}", e)))?;
        if self.ledger.max_attempts == Some(0) {
            return Err(ChainError::Config(
                "ledger.max_attempts must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from `path`, or from `hashledger.toml` in the working
/// directory when no path is given.
///
/// A missing default file yields defaults; a missing explicit path is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let (path, required) = match path {
        Some(p) => (p, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };

    if !required && !path.exists() {
        return Ok(Config::default());
    }

    let text = fs::read_to_string(path)
        .map_err(|e| ChainError::Config(format!("{}: {}", path.display(), e)))?;
    Config::from_toml(&text)
}
