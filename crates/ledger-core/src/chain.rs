use crate::error::{LedgerError, Result};
use crate::{genesis_block, Block};

/// Ordered, append-only block sequence rooted at the genesis block.
///
/// Callers appending blocks (the miner) own the correctness of
/// `previous_hash` and `index`; the chain itself only stores.
#[derive(Clone, Debug, PartialEq)]
pub struct Chain {
    blocks: Vec<Block>,
}

impl Chain {
    /// A chain holding only the genesis block.
    pub fn initialize() -> Self {
        Self {
            blocks: vec![genesis_block()],
        }
    }

    /// Wraps an existing block sequence as-is. No linkage is checked; run the
    /// verifier over the result before trusting it.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn append(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn last(&self) -> Result<&Block> {
        self.blocks.last().ok_or(LedgerError::EmptyChain)
    }

    pub fn get(&self, index: u64) -> Option<&Block> {
        usize::try_from(index).ok().and_then(|i| self.blocks.get(i))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks in chain order. The iterator is `Clone`, so an enumeration can
    /// be restarted without touching the chain again.
    pub fn blocks(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn as_slice(&self) -> &[Block] {
        &self.blocks
    }

    /// Overwrites the block at `index`, returning the previous one.
    #[cfg(any(test, feature = "tamper"))]
    pub fn corrupt(&mut self, index: u64, block: Block) -> Result<Block> {
        let slot = usize::try_from(index)
            .ok()
            .and_then(|i| self.blocks.get_mut(i))
            .ok_or(LedgerError::BlockNotFound(index))?;
        Ok(std::mem::replace(slot, block))
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::initialize()
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Transaction;

    #[test]
    fn fresh_chain_holds_only_genesis() {
        let chain = Chain::initialize();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.as_slice()[0], genesis_block());
        assert_eq!(chain.last().unwrap(), &genesis_block());
        assert_eq!(Chain::default(), chain);
    }

    #[test]
    fn append_extends_the_tail() {
        let mut chain = Chain::initialize();
        let block = Block::new("-0-[]", 1, vec![Transaction::new("Pedro", "Ana", 5.0)]);
        chain.append(block.clone());
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.last().unwrap(), &block);
        assert_eq!(chain.get(1), Some(&block));
        assert_eq!(chain.get(2), None);
    }

    #[test]
    fn last_on_empty_chain_errors() {
        let chain = Chain::from_blocks(vec![]);
        assert!(chain.is_empty());
        assert!(matches!(chain.last(), Err(LedgerError::EmptyChain)));
    }

    #[test]
    fn enumeration_is_restartable() {
        let mut chain = Chain::initialize();
        chain.append(Block::new("-0-[]", 1, vec![]));
        let iter = chain.blocks();
        let first: Vec<u64> = iter.clone().map(|b| b.index).collect();
        let second: Vec<u64> = iter.map(|b| b.index).collect();
        assert_eq!(first, vec![0, 1]);
        assert_eq!(first, second);
        assert_eq!((&chain).into_iter().count(), 2);
    }

    #[test]
    fn corrupt_replaces_and_returns_old_block() {
        let mut chain = Chain::initialize();
        let forged = Block::new("", 0, vec![Transaction::new("Ximena", "Pedro", 10.0)]);
        let old = chain.corrupt(0, forged.clone()).unwrap();
        assert_eq!(old, genesis_block());
        assert_eq!(chain.get(0), Some(&forged));
        assert!(matches!(
            chain.corrupt(5, forged),
            Err(LedgerError::BlockNotFound(5))
        ));
    }
}
