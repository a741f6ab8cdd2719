//! Transfer records and block payloads

use std::fmt;

/// Canonical string of the genesis payload.
pub const GENESIS_LABEL: &str = "Genesis";

/// A single transfer of `amount` from `sender` to `receiver`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Record {
    pub sender: String,
    pub receiver: String,
    pub amount: f64,
}

impl Record {
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>, amount: f64) -> Self {
        Record {
            sender: sender.into(),
            receiver: receiver.into(),
            amount,
        }
    }

    /// Stable serialization fed to the block hasher.
    ///
    /// Strings are debug-escaped so a quote or comma inside a name can never
    /// shift a field boundary; the amount uses the float's debug form (`10.0`).
    pub fn canonical(&self) -> String {
        format!(
            "Record(sender={:?}, receiver={:?}, amount={:?})",
            self.sender, self.receiver, self.amount
        )
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// What a block carries. Every block owns exactly one payload.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Payload {
    Genesis,
    Transfer(Record),
}

impl Payload {
    pub fn canonical(&self) -> String {
        match self {
            Payload::Genesis => GENESIS_LABEL.to_string(),
            Payload::Transfer(record) => record.canonical(),
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Payload::Transfer(record) => Some(record),
            Payload::Genesis => None,
        }
    }

    pub fn is_genesis(&self) -> bool {
        matches!(self, Payload::Genesis)
    }
}

impl From<Record> for Payload {
    fn from(record: Record) -> Self {
        Payload::Transfer(record)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}
