use crate::blockchain::Block;
use crate::error::{ChainError, Result};
use crate::miner::{check_difficulty, mine_in_place, MiningLimit};
use crate::record::Record;
use tracing::{info, warn};

/// Difficulty of a ledger built with [`Ledger::default`].
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// An append-only chain of blocks plus the difficulty the next admission is
/// mined against.
///
/// The ledger has no internal locking; wrap it in a
/// [`LedgerHandle`](crate::handle::LedgerHandle) when more than one producer
/// submits blocks.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "LedgerRepr")]
pub struct Ledger {
    pub chain: Vec<Block>,
    pub difficulty: u32,
    pub mining_limit: MiningLimit,
}

/// Unchecked wire shape of [`Ledger`]; converted through `TryFrom` so a
/// deserialized ledger holds the same invariants as one built by `new`.
#[derive(serde::Deserialize)]
struct LedgerRepr {
    chain: Vec<Block>,
    difficulty: u32,
    #[serde(default)]
    mining_limit: MiningLimit,
}

impl TryFrom<LedgerRepr> for Ledger {
    type Error = ChainError;

    fn try_from(repr: LedgerRepr) -> Result<Self> {
        check_difficulty(repr.difficulty)?;
        if repr.chain.is_empty() {
            return Err(ChainError::EmptyChain);
        }
        Ok(Ledger {
            chain: repr.chain,
            difficulty: repr.difficulty,
            mining_limit: repr.mining_limit,
        })
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger {
            chain: vec![Block::genesis()],
            difficulty: DEFAULT_DIFFICULTY,
            mining_limit: MiningLimit::Unbounded,
        }
    }
}

impl Ledger {
    /// Create a ledger holding only the genesis block.
    pub fn new(difficulty: u32) -> Result<Self> {
        check_difficulty(difficulty)?;
        info!("Initializing chain (difficulty {})", difficulty);
        Ok(Ledger {
            difficulty,
            ..Ledger::default()
        })
    }

    pub fn with_mining_limit(mut self, limit: MiningLimit) -> Self {
        self.mining_limit = limit;
        self
    }

    /// Takes effect on the next admission; blocks already mined are untouched.
    pub fn set_difficulty(&mut self, difficulty: u32) -> Result<()> {
        check_difficulty(difficulty)?;
        self.difficulty = difficulty;
        Ok(())
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn get(&self, index: usize) -> Result<&Block> {
        self.chain.get(index).ok_or(ChainError::BlockNotFound(index))
    }

    pub fn genesis(&self) -> &Block {
        &self.chain[0]
    }

    pub fn tip(&self) -> &Block {
        // `chain` is never empty: `new` seeds it with genesis, deserialization
        // rejects an empty chain, and nothing removes blocks.
        &self.chain[self.chain.len() - 1]
    }

    pub fn tip_hash(&self) -> String {
        self.tip().hash()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Only true if a caller emptied `chain` by hand.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Build an unmined candidate pointing at the current tip.
    pub fn candidate(&self, record: Record, creator_id: u64) -> Block {
        Block::new(record, creator_id, self.tip_hash())
    }

    /// Link the candidate to the current tip, mine it and append it.
    ///
    /// A `prev_hash` that no longer matches the tip is replaced. With an
    /// unbounded mining limit this never fails.
    pub fn add_block(&mut self, mut candidate: Block) -> Result<&Block> {
        let tip_hash = self.tip_hash();
        if candidate.prev_hash != tip_hash {
            warn!(
                "Candidate prev_hash {} is stale, relinking to tip {}",
                candidate.prev_hash, tip_hash
            );
            candidate.prev_hash = tip_hash;
        }

        let outcome = mine_in_place(&mut candidate, self.difficulty, self.mining_limit)?;
        self.chain.push(candidate);
        info!(
            "Appended block {} ({} attempts at difficulty {})",
            self.chain.len() - 1,
            outcome.attempts,
            self.difficulty
        );
        Ok(self.tip())
    }

    /// Build a candidate for `record` against the current tip and admit it.
    pub fn submit(&mut self, record: Record, creator_id: u64) -> Result<&Block> {
        let candidate = self.candidate(record, creator_id);
        self.add_block(candidate)
    }
}
