//! Integration tests for block admission and chain validation

use hashledger::blockchain::{Block, Ledger};
use hashledger::error::ChainError;
use hashledger::miner::{mine_block, MiningLimit};
use hashledger::record::{Payload, Record};

/// Helper to build a genesis + two transfers chain at difficulty 1
fn build_three_block_chain() -> Result<Ledger, Box<dyn std::error::Error>> {
    let mut ledger = Ledger::new(1)?;
    for (sender, receiver, amount) in [("Alice", "Bob", 10.0), ("Bob", "Carol", 5.5)] {
        let candidate = Block::new(Record::new(sender, receiver, amount), 42, ledger.tip_hash());
        ledger.add_block(candidate)?;
    }
    Ok(ledger)
}

#[test]
fn test_alice_to_bob_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = Ledger::new(1)?;

    let genesis = ledger.genesis().clone();
    assert_eq!(genesis.creator_id, 0);
    assert_eq!(genesis.record, Payload::Genesis);
    assert_eq!(genesis.record.canonical(), "Genesis");
    assert_eq!(genesis.prev_hash, "0");

    let candidate = Block::new(Record::new("Alice", "Bob", 10.0), 42, genesis.hash());
    let block = ledger.add_block(candidate)?;

    assert_eq!(block.prev_hash, genesis.hash());
    assert!(block.hash().starts_with('0'));
    assert_eq!(block.transfer(), Some(&Record::new("Alice", "Bob", 10.0)));
    Ok(())
}

#[test]
fn test_link_invariant_after_each_admission() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = Ledger::new(2)?;
    for i in 0..4 {
        let tip_before = ledger.tip_hash();
        let block = ledger.submit(Record::new("Alice", "Bob", i as f64), 42)?;
        assert_eq!(block.prev_hash, tip_before);
    }
    assert_eq!(ledger.len(), 5);
    Ok(())
}

#[test]
fn test_three_block_chain_is_valid() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = build_three_block_chain()?;
    assert_eq!(ledger.len(), 3);
    assert!(ledger.is_valid());
    assert!(ledger.validate().is_ok());
    Ok(())
}

#[test]
fn test_tampered_amount_invalidates_chain() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = build_three_block_chain()?;
    assert!(ledger.is_valid());

    let expected_before = ledger.chain[1].hash();
    match &mut ledger.chain[1].record {
        Payload::Transfer(record) => record.amount = 10_000.0,
        Payload::Genesis => panic!("block 1 should carry a transfer"),
    }

    assert!(!ledger.is_valid());
    assert_eq!(
        ledger.validate(),
        Err(ChainError::BrokenLink {
            index: 2,
            expected: ledger.chain[1].hash(),
            found: expected_before,
        })
    );
    Ok(())
}

#[test]
fn test_genesis_only_chain_is_valid() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = Ledger::new(3)?;
    assert!(ledger.is_valid());
    Ok(())
}

#[test]
fn test_validation_does_not_mutate() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = build_three_block_chain()?;
    let before = ledger.chain.clone();

    let first = ledger.is_valid();
    let second = ledger.is_valid();

    assert_eq!(first, second);
    assert_eq!(ledger.chain, before);
    Ok(())
}

#[test]
fn test_premined_candidate_is_relinked_and_remined() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = Ledger::new(1)?;
    let early = ledger.candidate(Record::new("Alice", "Bob", 1.0), 42);
    let early = mine_block(early, 1, MiningLimit::Unbounded)?;

    ledger.submit(Record::new("Carol", "Dave", 2.0), 7)?;
    let tip_before = ledger.tip_hash();
    let block = ledger.add_block(early)?;

    assert_eq!(block.prev_hash, tip_before);
    assert!(block.hash().starts_with('0'));
    assert!(ledger.is_valid());
    Ok(())
}

#[test]
fn test_bounded_mining_fails_cleanly() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = Ledger::new(40)?.with_mining_limit(MiningLimit::Attempts(10));
    let err = ledger
        .submit(Record::new("Alice", "Bob", 1.0), 42)
        .unwrap_err();

    assert_eq!(err, ChainError::AttemptsExhausted { attempts: 10 });
    assert_eq!(ledger.len(), 1);

    ledger.set_difficulty(1)?;
    ledger.mining_limit = MiningLimit::Unbounded;
    ledger.submit(Record::new("Alice", "Bob", 1.0), 42)?;
    assert_eq!(ledger.len(), 2);
    assert!(ledger.is_valid());
    Ok(())
}

#[test]
fn test_ledger_serializes_to_json() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = build_three_block_chain()?;
    let json = serde_json::to_string(&ledger)?;
    let restored: Ledger = serde_json::from_str(&json)?;

    assert_eq!(restored.chain, ledger.chain);
    assert!(restored.is_valid());
    Ok(())
}

#[test]
fn test_malformed_ledger_json_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    assert!(serde_json::from_str::<Ledger>(r#"{"chain":[],"difficulty":0}"#).is_err());
    assert!(serde_json::from_str::<Ledger>(r#"{"chain":[],"difficulty":2}"#).is_err());

    let mut json: serde_json::Value = serde_json::to_value(Ledger::new(1)?)?;
    json["difficulty"] = serde_json::Value::from(0);
    assert!(serde_json::from_value::<Ledger>(json.clone()).is_err());

    json["difficulty"] = serde_json::Value::from(1);
    let mut restored: Ledger = serde_json::from_value(json)?;
    restored.submit(Record::new("Alice", "Bob", 1.0), 42)?;
    assert_eq!(restored.len(), 2);
    assert!(restored.is_valid());
    Ok(())
}
