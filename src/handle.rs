//! Shared ledger handle for multiple producers
//!
//! Admission reads the tip hash, mines against it and appends. If two
//! producers interleave those steps they mine against the same tip and the
//! second append breaks the chain. `LedgerHandle` holds one lock across the
//! whole sequence.

use crate::blockchain::{Block, Ledger};
use crate::error::Result;
use crate::record::Record;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct LedgerHandle {
    inner: Arc<Mutex<Ledger>>,
}

impl LedgerHandle {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Build, mine and append a block for `record`. Other callers wait
    /// for the lock while this one mines.
    pub fn submit(&self, record: Record, creator_id: u64) -> Result<Block> {
        let mut ledger = self.inner.lock();
        ledger.submit(record, creator_id).cloned()
    }

    pub fn add_block(&self, candidate: Block) -> Result<Block> {
        let mut ledger = self.inner.lock();
        ledger.add_block(candidate).cloned()
    }

    pub fn set_difficulty(&self, difficulty: u32) -> Result<()> {
        self.inner.lock().set_difficulty(difficulty)
    }

    pub fn difficulty(&self) -> u32 {
        self.inner.lock().difficulty
    }

    pub fn is_valid(&self) -> bool {
        self.inner.lock().is_valid()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// See [`Ledger::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn tip_hash(&self) -> String {
        self.inner.lock().tip_hash()
    }

    /// Clone of the current ledger state.
    pub fn snapshot(&self) -> Ledger {
        self.inner.lock().clone()
    }

    /// Run `f` with exclusive access to the ledger.
    pub fn with_ledger<R>(&self, f: impl FnOnce(&mut Ledger) -> R) -> R {
        let mut ledger = self.inner.lock();
        f(&mut ledger)
    }
}

impl From<Ledger> for LedgerHandle {
    fn from(ledger: Ledger) -> Self {
        Self::new(ledger)
    }
}
