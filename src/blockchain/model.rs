use log::{debug, info};

use super::{Block, GENESIS_PREVIOUS_HASH, GENESIS_PROOF, pow};
use crate::error::Result;
use crate::transaction::Transaction;

/// In-memory chain plus the pool of transactions waiting for the next block.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    current_transactions: Vec<Transaction>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Initialize a new ledger holding only the genesis block.
    pub fn new() -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            current_transactions: Vec::new(),
        };
        ledger.new_block(GENESIS_PROOF, Some(GENESIS_PREVIOUS_HASH.to_string()));
        ledger
    }

    /// Queue a transaction; returns the index of the block that will hold it.
    ///
    /// Field shapes are trusted here: the boundary layer rejects malformed
    /// payloads before calling in.
    pub fn new_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: u64,
    ) -> u64 {
        self.current_transactions
            .push(Transaction::new(sender, recipient, amount));
        debug!("pool size now {}", self.current_transactions.len());
        self.last_block().index + 1
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("Ledger should always have at least the genesis block")
    }

    /// Forge a block from the whole pending pool and append it.
    ///
    /// Without `previous_hash` the hash of the current tail is used.
    pub fn new_block(&mut self, proof: u64, previous_hash: Option<String>) -> &Block {
        let previous_hash = previous_hash.unwrap_or_else(|| self.last_block().hash());
        let transactions = std::mem::take(&mut self.current_transactions);
        let block = Block::new(
            self.chain.len() as u64 + 1,
            transactions,
            proof,
            previous_hash,
        );
        self.chain.push(block);
        self.last_block()
    }

    /// Pay `miner` and seal the pool with an already-found `proof`.
    pub fn forge(&mut self, proof: u64, miner: &str) -> Block {
        let previous_hash = self.last_block().hash();
        self.current_transactions.push(Transaction::reward(miner));
        let block = self.new_block(proof, Some(previous_hash)).clone();
        info!(
            "forged block #{} (proof={}, txs={})",
            block.index,
            block.proof,
            block.transactions.len()
        );
        block
    }

    /// Search a proof on top of the tail and forge the next block.
    ///
    /// Blocks the calling thread for the whole search.
    pub fn mine(&mut self, miner: &str) -> Result<Block> {
        let proof = pow::proof_of_work(self.last_block().proof)?;
        Ok(self.forge(proof, miner))
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.current_transactions
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Swap in a whole new chain. Callers validate it first.
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        debug_assert!(!chain.is_empty());
        self.chain = chain;
    }
}

#[cfg(test)]
mod tests {
    use super::Ledger;
    use crate::blockchain::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF, is_valid_chain, pow};
    use crate::transaction::Transaction;

    #[test]
    fn starts_with_genesis() {
        let ledger = Ledger::new();
        assert_eq!(ledger.len(), 1);
        let genesis = ledger.last_block();
        assert_eq!(genesis.index, 1);
        assert_eq!(genesis.proof, GENESIS_PROOF);
        assert_eq!(genesis.previous_hash, GENESIS_PREVIOUS_HASH);
        assert!(genesis.transactions.is_empty());
        assert!(ledger.pending().is_empty());
    }

    #[test]
    fn new_transaction_returns_next_index() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.new_transaction("A", "B", 5), 2);
        assert_eq!(ledger.new_transaction("B", "C", 1), 2);
        assert_eq!(ledger.pending().len(), 2);
    }

    #[test]
    fn new_block_drains_pool_and_links_to_tail() {
        let mut ledger = Ledger::new();
        let genesis_hash = ledger.last_block().hash();
        ledger.new_transaction("A", "B", 5);

        let block = ledger.new_block(42, None).clone();
        assert_eq!(block.index, 2);
        assert_eq!(block.proof, 42);
        assert_eq!(block.previous_hash, genesis_hash);
        assert_eq!(block.transactions.len(), 1);
        assert!(ledger.pending().is_empty());

        // Not idempotent: same inputs, another block.
        let again = ledger.new_block(42, None).clone();
        assert_eq!(again.index, 3);
        assert!(again.transactions.is_empty());
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn new_block_keeps_explicit_previous_hash() {
        let mut ledger = Ledger::new();
        let block = ledger.new_block(7, Some("feed".into()));
        assert_eq!(block.previous_hash, "feed");
    }

    #[test]
    fn mining_scenario_from_genesis() {
        let mut ledger = Ledger::new();
        let genesis_hash = ledger.last_block().hash();

        assert_eq!(ledger.new_transaction("A", "B", 5), 2);
        let block = ledger.mine("node-1").unwrap();

        assert_eq!(block.index, 2);
        assert_eq!(block.previous_hash, genesis_hash);
        assert_eq!(block.transactions.len(), 2);
        assert_eq!(block.transactions[0].sender, "A");
        assert_eq!(block.transactions[0].recipient, "B");
        assert_eq!(block.transactions[0].amount, 5);
        assert_eq!(block.transactions[1], Transaction::reward("node-1"));
        assert!(pow::is_valid_proof(GENESIS_PROOF, block.proof));
        assert!(ledger.pending().is_empty());
        assert!(is_valid_chain(ledger.chain()));
    }
}
