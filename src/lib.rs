//! HashLedger - an append-only, hash-linked ledger with proof-of-work admission
//!
//! # Architecture
//!
//! ## Core Ledger
//! - [`record`] - Transfer records and block payloads
//! - [`blockchain`] - Blocks, hashing, the ledger and link validation
//!
//! ## Consensus
//! - [`miner`] - Proof-of-work mining
//!
//! ## Concurrency
//! - [`handle`] - Shared ledger handle for multiple producers
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//! - [`cli`] - CLI utilities
//!
//! # Example
//!
//! ```
//! use hashledger::blockchain::Ledger;
//! use hashledger::record::Record;
//!
//! let mut ledger = Ledger::new(1)?;
//! ledger.submit(Record::new("Alice", "Bob", 10.0), 42)?;
//! assert!(ledger.is_valid());
//! # Ok::<(), hashledger::error::ChainError>(())
//! ```

#![forbid(unsafe_code)]

// ============================================================================
// Core Ledger
// ============================================================================
pub mod blockchain;
pub mod record;

// ============================================================================
// Consensus & Mining
// ============================================================================
pub mod miner;

// ============================================================================
// Concurrency
// ============================================================================
pub mod handle;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod cli;
pub mod config;
pub mod error;
