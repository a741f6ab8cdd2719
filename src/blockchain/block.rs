use crate::record::{Payload, Record};
use sha2::{Digest, Sha256};

/// `prev_hash` carried by the genesis block.
pub const GENESIS_PREV_HASH: &str = "0";
pub const GENESIS_CREATOR_ID: u64 = 0;

/// Wall-clock format of `Block::timestamp`.
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Block {
    pub record: Payload,
    pub creator_id: u64,
    pub timestamp: String,
    pub prev_hash: String,
    pub nonce: u64,
}

impl Block {
    /// Build a candidate block stamped with the current UTC time and a zero nonce.
    pub fn new(record: impl Into<Payload>, creator_id: u64, prev_hash: impl Into<String>) -> Self {
        Block {
            record: record.into(),
            creator_id,
            timestamp: current_timestamp(),
            prev_hash: prev_hash.into(),
            nonce: 0,
        }
    }

    pub fn genesis() -> Self {
        Block::new(Payload::Genesis, GENESIS_CREATOR_ID, GENESIS_PREV_HASH)
    }

    /// Hex-encoded SHA-256 over the payload, creator id, previous hash,
    /// timestamp and nonce, in that order.
    pub fn hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.record.canonical().as_bytes());
        hasher.update(self.creator_id.to_string().as_bytes());
        hasher.update(self.prev_hash.as_bytes());
        hasher.update(self.timestamp.as_bytes());
        hasher.update(self.nonce.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn transfer(&self) -> Option<&Record> {
        self.record.as_record()
    }

    pub fn is_genesis(&self) -> bool {
        self.record.is_genesis()
    }
}

pub fn current_timestamp() -> String {
    chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string()
}
