//! Block fingerprints.
//!
//! Two schemes are available. [`JoinedHasher`] renders the legacy
//! fingerprint: the textual form of each field joined with `-`. It is cheap to
//! read but ambiguous whenever a field's text contains the separator.
//! [`Sha256Hasher`] digests a length-prefixed canonical encoding instead, so
//! field boundaries cannot be confused.

use crate::constants::HASH_SEPARATOR;
use crate::{Block, Transaction};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::Write;

pub trait BlockHasher: Send + Sync {
    fn hash(&self, block: &Block) -> String;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JoinedHasher;

impl BlockHasher for JoinedHasher {
    fn hash(&self, block: &Block) -> String {
        let mut out = String::new();
        out.push_str(&block.previous_hash);
        out.push(HASH_SEPARATOR);
        let _ = write!(out, "{}", block.index);
        out.push(HASH_SEPARATOR);
        out.push_str(&render_transactions(&block.transactions));
        out
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sha256Hasher;

impl Sha256Hasher {
    /// Canonical encoding: strings are u64-LE length prefixed, integers are
    /// u64-LE, amounts are the LE bytes of their IEEE-754 bit pattern.
    pub fn hash_bytes(block: &Block) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + block.previous_hash.len() + 16);
        push_str(&mut bytes, &block.previous_hash);
        bytes.extend_from_slice(&block.index.to_le_bytes());
        bytes.extend_from_slice(&(block.transactions.len() as u64).to_le_bytes());
        for tx in &block.transactions {
            push_str(&mut bytes, &tx.sender);
            push_str(&mut bytes, &tx.recipient);
            bytes.extend_from_slice(&tx.amount.to_bits().to_le_bytes());
        }
        bytes
    }
}

impl BlockHasher for Sha256Hasher {
    fn hash(&self, block: &Block) -> String {
        let mut hasher = Sha256::new();
        hasher.update(Self::hash_bytes(block));
        hex::encode(hasher.finalize())
    }
}

fn push_str(bytes: &mut Vec<u8>, s: &str) {
    bytes.extend_from_slice(&(s.len() as u64).to_le_bytes());
    bytes.extend_from_slice(s.as_bytes());
}

/// Selects the fingerprint used for chain linking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashScheme {
    #[default]
    Joined,
    Sha256,
}

impl BlockHasher for HashScheme {
    fn hash(&self, block: &Block) -> String {
        match self {
            HashScheme::Joined => JoinedHasher.hash(block),
            HashScheme::Sha256 => Sha256Hasher.hash(block),
        }
    }
}

impl std::str::FromStr for HashScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "joined" => Ok(HashScheme::Joined),
            "sha256" => Ok(HashScheme::Sha256),
            other => Err(format!("unknown hash scheme '{other}'")),
        }
    }
}

fn render_transactions(txs: &[Transaction]) -> String {
    let items: Vec<String> = txs
        .iter()
        .map(|tx| {
            format!(
                "{{'sender': {}, 'recipient': {}, 'amount': {}}}",
                render_str(&tx.sender),
                render_str(&tx.recipient),
                render_amount(tx.amount)
            )
        })
        .collect();
    format!("[{}]", items.join(", "))
}

// Quoted string literal: single quotes unless the text holds a single quote
// and no double quote.
fn render_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

// Shortest round-trip float text, always carrying a decimal point or exponent.
fn render_amount(amount: f64) -> String {
    if amount.is_nan() {
        return "nan".to_string();
    }
    if amount.is_infinite() {
        return if amount > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let abs = amount.abs();
    if abs >= 1e16 || (abs != 0.0 && abs < 1e-4) {
        let sci = format!("{amount:e}");
        return match sci.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(d) => ('-', d),
                    None => ('+', exp),
                };
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => sci,
        };
    }
    if amount.fract() == 0.0 {
        format!("{amount:.1}")
    } else {
        format!("{amount}")
    }
}
