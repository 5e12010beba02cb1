//! Ledger configuration.

use crate::constants::{DEFAULT_AMOUNT, DEFAULT_SENDER};
use crate::error::Result;
use crate::hash::HashScheme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Identity used when a transaction is added without a sender.
    pub default_sender: String,
    /// Amount used when a transaction is added without one.
    pub default_amount: f64,
    pub hash_scheme: HashScheme,
    /// Reject empty identities and negative or non-finite amounts.
    pub strict_transactions: bool,
    /// Refuse to mine on top of a chain that fails verification. Off by
    /// default: a corrupted chain is only reported when verified.
    pub verify_before_mine: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_sender: DEFAULT_SENDER.to_string(),
            default_amount: DEFAULT_AMOUNT,
            hash_scheme: HashScheme::default(),
            strict_transactions: false,
            verify_before_mine: false,
        }
    }
}

impl LedgerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}
