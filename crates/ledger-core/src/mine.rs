use crate::error::Result;
use crate::hash::BlockHasher;
use crate::{Block, Chain, TransactionPool};
use tracing::info;

/// Seals every pending transaction into a new block linked to the current tip.
///
/// The pool is emptied only once the block has been appended; if the tip
/// cannot be read nothing is modified.
pub fn mine_block<H: BlockHasher + ?Sized>(
    chain: &mut Chain,
    pool: &mut TransactionPool,
    hasher: &H,
) -> Result<Block> {
    let prev_hash = hasher.hash(chain.last()?);
    let index = chain.len() as u64;

    let block = Block::new(prev_hash, index, pool.take());
    chain.append(block.clone());

    info!(
        "Mined block {} with {} transactions, previous hash {}",
        index,
        block.transactions.len(),
        block.previous_hash
    );
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::hash::{HashScheme, JoinedHasher};
    use crate::Transaction;

    #[test]
    fn mine_links_to_previous_tip() {
        let mut chain = Chain::initialize();
        let mut pool = TransactionPool::new();
        pool.add("Pedro", "Ana", 5.0);

        let block = mine_block(&mut chain, &mut pool, &JoinedHasher).unwrap();
        assert_eq!(block.index, 1);
        assert_eq!(block.previous_hash, "-0-[]");
        assert_eq!(block.transactions, vec![Transaction::new("Pedro", "Ana", 5.0)]);
        assert_eq!(chain.last().unwrap(), &block);
        assert!(pool.is_empty());
    }

    #[test]
    fn mine_with_empty_pool_appends_empty_block() {
        let mut chain = Chain::initialize();
        let mut pool = TransactionPool::new();
        let block = mine_block(&mut chain, &mut pool, &HashScheme::Sha256).unwrap();
        assert!(block.transactions.is_empty());
        assert_eq!(chain.len(), 2);
        assert_eq!(block.previous_hash.len(), crate::constants::HASH_HEX_SIZE);
    }

    #[test]
    fn consecutive_mines_keep_index_equal_to_position() {
        let mut chain = Chain::initialize();
        let mut pool = TransactionPool::new();
        for i in 0..5 {
            pool.add("Pedro", format!("user-{i}"), i as f64);
            mine_block(&mut chain, &mut pool, &JoinedHasher).unwrap();
        }
        for (pos, block) in chain.blocks().enumerate() {
            assert_eq!(block.index, pos as u64);
        }
    }

    #[test]
    fn mine_on_empty_chain_leaves_pool_untouched() {
        let mut chain = Chain::from_blocks(vec![]);
        let mut pool = TransactionPool::new();
        pool.add("Pedro", "Ana", 5.0);
        let err = mine_block(&mut chain, &mut pool, &JoinedHasher).unwrap_err();
        assert!(matches!(err, LedgerError::EmptyChain));
        assert_eq!(pool.len(), 1);
        assert!(chain.is_empty());
    }
}
