use crate::Transaction;

/// Pending transactions, in arrival order, waiting for the next block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionPool {
    pending: Vec<Transaction>,
}

impl TransactionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transaction. Any values are accepted here; screening, if
    /// wanted, happens before the call.
    pub fn add(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: f64,
    ) -> &Transaction {
        self.pending.push(Transaction::new(sender, recipient, amount));
        &self.pending[self.pending.len() - 1]
    }

    pub fn snapshot(&self) -> Vec<Transaction> {
        self.pending.clone()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Moves every pending transaction out, leaving the pool empty.
    pub fn take(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.pending)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.pending.iter()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
