use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("chain is empty")]
    EmptyChain,
    #[error("no block at index {0}")]
    BlockNotFound(u64),
    #[error("invalid chain: block {index} does not link to its predecessor")]
    InvalidChain { index: u64 },
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
