pub mod chain;
pub mod config;
pub mod constants;
pub mod error;
pub mod hash;
pub mod ledger;
pub mod mine;
pub mod pool;
pub mod verify;

use serde::{Deserialize, Serialize};

pub use chain::Chain;
pub use config::LedgerConfig;
pub use error::{LedgerError, Result};
pub use hash::{BlockHasher, HashScheme, JoinedHasher, Sha256Hasher};
pub use ledger::Ledger;
pub use pool::TransactionPool;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: f64) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub previous_hash: String,
    pub index: u64,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(previous_hash: impl Into<String>, index: u64, transactions: Vec<Transaction>) -> Self {
        Self {
            previous_hash: previous_hash.into(),
            index,
            transactions,
        }
    }

    pub fn is_genesis(&self) -> bool {
        self.index == constants::GENESIS_INDEX && self.previous_hash.is_empty()
    }
}

/// The fixed first block: no predecessor, no transactions.
pub fn genesis_block() -> Block {
    Block::new(String::new(), constants::GENESIS_INDEX, vec![])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_txs() -> Vec<Transaction> {
        vec![
            Transaction::new("Alice", "Bob", 10.0),
            Transaction::new("Bob", "Charlie", 5.5),
        ]
    }

    #[test]
    fn genesis_block_example() {
        let genesis = genesis_block();
        assert_eq!(genesis.index, 0);
        assert_eq!(genesis.previous_hash, "");
        assert!(genesis.transactions.is_empty());
        assert!(genesis.is_genesis());
    }

    #[test]
    fn non_genesis_block_is_not_genesis() {
        let block = Block::new("-0-[]", 1, sample_txs());
        assert!(!block.is_genesis());
    }

    #[test]
    fn transaction_equality_example() {
        let tx1 = Transaction::new("Alice", "Bob", 10.0);
        let tx2 = Transaction::new("Alice", "Bob", 10.0);
        let tx3 = Transaction::new("Alice", "Charlie", 10.0);
        assert_eq!(tx1, tx2);
        assert_ne!(tx1, tx3);
    }

    #[test]
    fn transaction_inequality_different_amount() {
        let tx1 = Transaction::new("Alice", "Bob", 10.0);
        let tx2 = Transaction::new("Alice", "Bob", 20.0);
        assert_ne!(tx1, tx2);
    }

    #[test]
    fn transaction_serialization_example() {
        let tx = Transaction::new("Pedro", "Ana", 5.0);
        let json = serde_json::to_string(&tx).unwrap();
        let expected_json = r#"{"sender":"Pedro","recipient":"Ana","amount":5.0}"#;
        assert_eq!(json, expected_json);
        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, deserialized);
    }

    #[test]
    fn block_serialization_example() {
        let block = Block::new("-0-[]", 1, sample_txs());
        let json = serde_json::to_string(&block).unwrap();
        let deserialized: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(block, deserialized);
    }
}
