//! Chain link validation
//!
//! Validation only checks that every block after genesis points at the hash
//! of its predecessor. It does not re-check that each block still satisfies
//! the proof-of-work target it was mined against: blocks do not record their
//! difficulty, and the check exists for tamper detection rather than to audit
//! historical mining cost.

use crate::blockchain::{Block, Ledger};
use crate::error::{ChainError, Result};
use tracing::debug;

/// Walk the chain and report the first block whose `prev_hash` does not
/// match the recomputed hash of the block before it.
pub fn validate_links(chain: &[Block]) -> Result<()> {
    let Some((genesis, rest)) = chain.split_first() else {
        return Ok(());
    };

    let mut expected = genesis.hash();
    for (offset, block) in rest.iter().enumerate() {
        if block.prev_hash != expected {
            return Err(ChainError::BrokenLink {
                index: offset + 1,
                expected,
                found: block.prev_hash.clone(),
            });
        }
        expected = block.hash();
    }
    Ok(())
}

impl Ledger {
    pub fn validate(&self) -> Result<()> {
        validate_links(&self.chain)
    }

    pub fn is_valid(&self) -> bool {
        match self.validate() {
            Ok(()) => {
                debug!("Blockchain is valid ({} blocks)", self.chain.len());
                true
            }
            Err(e) => {
                debug!("Blockchain is invalid: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Payload, Record};

    fn three_block_ledger() -> Ledger {
        let mut ledger = Ledger::new(1).unwrap();
        ledger.submit(Record::new("Alice", "Bob", 10.0), 42).unwrap();
        ledger.submit(Record::new("Bob", "Carol", 4.0), 42).unwrap();
        ledger
    }

    #[test]
    fn test_genesis_only_is_valid() {
        let ledger = Ledger::new(1).unwrap();
        assert!(ledger.is_valid());
    }

    #[test]
    fn test_empty_slice_is_valid() {
        assert!(validate_links(&[]).is_ok());
    }

    #[test]
    fn test_admitted_chain_is_valid() {
        let ledger = three_block_ledger();
        assert_eq!(ledger.len(), 3);
        assert!(ledger.is_valid());
    }

    #[test]
    fn test_tampered_amount_is_detected() {
        let mut ledger = three_block_ledger();
        if let Payload::Transfer(record) = &mut ledger.chain[1].record {
            record.amount = 1_000.0;
        }

        assert!(!ledger.is_valid());
        match ledger.validate() {
            Err(ChainError::BrokenLink { index, .. }) => assert_eq!(index, 2),
            other => panic!("expected broken link, got {:?}", other),
        }
    }

    #[test]
    fn test_tampered_genesis_is_detected() {
        let mut ledger = three_block_ledger();
        ledger.chain[0].creator_id = 7;
        match ledger.validate() {
            Err(ChainError::BrokenLink { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected broken link, got {:?}", other),
        }
    }

    #[test]
    fn test_tampered_tip_goes_unnoticed() {
        // Nothing links to the tip, so editing it leaves every link intact.
        let mut ledger = three_block_ledger();
        ledger.chain[2].nonce += 1;
        assert!(ledger.is_valid());
    }

    #[test]
    fn test_work_is_not_rechecked() {
        let mut ledger = Ledger::new(1).unwrap();
        let mut block = ledger.candidate(Record::new("Alice", "Bob", 1.0), 42);
        // Appended without mining; the link is still correct.
        block.nonce = 0;
        ledger.chain.push(block);
        assert!(ledger.is_valid());
    }

    #[test]
    fn test_validation_is_idempotent_and_read_only() {
        let ledger = three_block_ledger();
        let before = ledger.chain.clone();
        let first = ledger.is_valid();
        let second = ledger.is_valid();
        assert_eq!(first, second);
        assert_eq!(ledger.chain, before);
    }
}
