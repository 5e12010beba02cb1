//! The ledger: one chain plus one transaction pool behind a single lock.
//!
//! Writers (`add_transaction`, `mine_block`) take the write lock for the whole
//! operation, so a mine's read-tip, hash, append and pool drain is never
//! observed half done. Readers take the read lock and either clone what they
//! need or finish their scan before releasing it.

use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use crate::hash::BlockHasher;
use crate::mine::mine_block;
use crate::verify::{first_invalid_link, verify};
use crate::{Block, Chain, Transaction, TransactionPool};
use parking_lot::RwLock;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct LedgerState {
    chain: Chain,
    pool: TransactionPool,
}

#[derive(Debug, Default)]
pub struct Ledger {
    config: LedgerConfig,
    state: RwLock<LedgerState>,
}

impl Ledger {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            state: RwLock::new(LedgerState::default()),
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Queues a transaction for the next block. Missing sender and amount
    /// fall back to the configured defaults.
    pub fn add_transaction(
        &self,
        recipient: &str,
        sender: Option<&str>,
        amount: Option<f64>,
    ) -> Result<Transaction> {
        let sender = sender.unwrap_or(&self.config.default_sender);
        let amount = amount.unwrap_or(self.config.default_amount);
        if self.config.strict_transactions {
            screen_transaction(sender, recipient, amount)?;
        }

        let mut state = self.state.write();
        let tx = state.pool.add(sender, recipient, amount).clone();
        debug!(
            "queued transaction {} -> {} ({}), {} pending",
            tx.sender,
            tx.recipient,
            tx.amount,
            state.pool.len()
        );
        Ok(tx)
    }

    pub fn mine_block(&self) -> Result<Block> {
        let mut state = self.state.write();
        let LedgerState { chain, pool } = &mut *state;
        if self.config.verify_before_mine {
            if let Some(index) = first_invalid_link(chain.as_slice(), &self.config.hash_scheme) {
                return Err(LedgerError::InvalidChain { index });
            }
        }
        mine_block(chain, pool, &self.config.hash_scheme)
    }

    /// `None` only if the chain has somehow lost its genesis block.
    pub fn get_last_block(&self) -> Option<Block> {
        self.state.read().chain.last().ok().cloned()
    }

    pub fn verify_chain(&self) -> bool {
        let state = self.state.read();
        let ok = verify(state.chain.as_slice(), &self.config.hash_scheme);
        if !ok {
            warn!("chain verification failed");
        }
        ok
    }

    /// Like [`Ledger::verify_chain`] but names the first broken link.
    pub fn check_chain(&self) -> Result<()> {
        let state = self.state.read();
        match first_invalid_link(state.chain.as_slice(), &self.config.hash_scheme) {
            Some(index) => Err(LedgerError::InvalidChain { index }),
            None => Ok(()),
        }
    }

    pub fn list_blocks(&self) -> Vec<Block> {
        self.state.read().chain.as_slice().to_vec()
    }

    pub fn pending_transactions(&self) -> Vec<Transaction> {
        self.state.read().pool.snapshot()
    }

    pub fn len(&self) -> usize {
        self.state.read().chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().chain.is_empty()
    }

    /// Fingerprint of `block` under this ledger's hash scheme.
    pub fn hash_block(&self, block: &Block) -> String {
        self.config.hash_scheme.hash(block)
    }

    /// Overwrites a block in place to demonstrate that verification catches
    /// it. Nothing is rolled back and no check runs here.
    #[cfg(any(test, feature = "tamper"))]
    pub fn corrupt_block(&self, index: u64, block: Block) -> Result<Block> {
        warn!("overwriting block {}", index);
        self.state.write().chain.corrupt(index, block)
    }
}

fn screen_transaction(sender: &str, recipient: &str, amount: f64) -> Result<()> {
    if sender.trim().is_empty() {
        return Err(LedgerError::InvalidTransaction("empty sender".into()));
    }
    if recipient.trim().is_empty() {
        return Err(LedgerError::InvalidTransaction("empty recipient".into()));
    }
    if !amount.is_finite() || amount < 0.0 {
        return Err(LedgerError::InvalidTransaction(format!(
            "amount {amount} must be finite and non-negative"
        )));
    }
    Ok(())
}
