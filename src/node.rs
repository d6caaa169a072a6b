use actix_web::web;
use log::{debug, info};
use std::sync::Mutex;

use crate::blockchain::{Block, CancelSwitch, CancelToken, Ledger, is_valid_chain, pow};
use crate::config::Config;
use crate::error::{LedgerError, Result};
use crate::network::{ChainSource, HttpPeerClient, NodeRegistry, PeerAddress, resolve_conflicts};
use crate::transaction::Transaction;

/// Shared handle over the ledger, the peer registry and in-flight mining.
///
/// The chain and the pending pool live behind one lock, so draining the pool
/// and appending a block happen in a single critical section. Proof searches
/// and peer fetches run without holding it.
pub struct Node {
    config: Config,
    ledger: Mutex<Ledger>,
    registry: Mutex<NodeRegistry>,
    cancel: CancelSwitch,
}

impl Node {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ledger: Mutex::new(Ledger::new()),
            registry: Mutex::new(NodeRegistry::new()),
            cancel: CancelSwitch::new(),
        }
    }

    pub fn node_id(&self) -> &str {
        &self.config.node_id
    }

    /// Queue a transaction; returns the index of the block that will hold it.
    pub fn submit_transaction(&self, sender: &str, recipient: &str, amount: u64) -> u64 {
        let mut ledger = self.ledger.lock().expect("mutex poisoned");
        ledger.new_transaction(sender, recipient, amount)
    }

    pub fn pending_transactions(&self) -> Vec<Transaction> {
        let ledger = self.ledger.lock().expect("mutex poisoned");
        ledger.pending().to_vec()
    }

    /// Search a proof on the blocking pool, then forge the next block paying `miner`.
    ///
    /// If another block lands while searching, the search restarts on the new
    /// tail. Transactions submitted during the search go into this block.
    pub async fn mine_block(&self, miner: &str) -> Result<Block> {
        loop {
            let token = self.cancel.token();
            let (last_proof, tip_hash) = {
                let ledger = self.ledger.lock().expect("mutex poisoned");
                let last = ledger.last_block();
                (last.proof, last.hash())
            };

            let limits = self.config.search_limits();
            let search_token = token.clone();
            let proof = web::block(move || pow::search(last_proof, &limits, &search_token))
                .await
                .map_err(|e| LedgerError::WorkerFailed(e.to_string()))??;

            if let Some(block) = self.commit_proof(proof, &tip_hash, &token, miner)? {
                return Ok(block);
            }
            debug!("tail moved during proof search, searching again");
        }
    }

    /// Forge with `proof` if the tail is still `tip_hash`; `None` if it moved.
    fn commit_proof(
        &self,
        proof: u64,
        tip_hash: &str,
        token: &CancelToken,
        miner: &str,
    ) -> Result<Option<Block>> {
        let mut ledger = self.ledger.lock().expect("mutex poisoned");
        if token.is_cancelled() {
            return Err(LedgerError::SearchCancelled);
        }
        if ledger.last_block().hash() != tip_hash {
            return Ok(None);
        }
        Ok(Some(ledger.forge(proof, miner)))
    }

    /// Abandon every proof search currently running.
    pub fn cancel_mining(&self) {
        info!("cancelling in-flight proof searches");
        self.cancel.cancel_all();
    }

    pub fn get_chain(&self) -> (Vec<Block>, usize) {
        let ledger = self.ledger.lock().expect("mutex poisoned");
        (ledger.chain().to_vec(), ledger.len())
    }

    pub fn validate(&self) -> (bool, usize) {
        let ledger = self.ledger.lock().expect("mutex poisoned");
        (is_valid_chain(ledger.chain()), ledger.len())
    }

    pub fn register_peer(&self, address: &str) -> Result<PeerAddress> {
        let mut registry = self.registry.lock().expect("mutex poisoned");
        let peer = registry.register_address(address)?;
        info!("registered peer {peer} ({} known)", registry.len());
        Ok(peer)
    }

    pub fn list_peers(&self) -> Vec<PeerAddress> {
        let registry = self.registry.lock().expect("mutex poisoned");
        registry.all()
    }

    pub fn peer_client(&self) -> HttpPeerClient {
        HttpPeerClient::new(
            self.config.peer_chain_path.clone(),
            self.config.peer_timeout,
            self.config.max_chain_bytes,
        )
    }

    /// Replace the local chain with the longest valid peer chain, if longer.
    ///
    /// Returns whether the chain was replaced and the chain now held.
    pub async fn run_consensus<S: ChainSource>(&self, source: &S) -> (bool, Vec<Block>) {
        let peers = {
            let registry = self.registry.lock().expect("mutex poisoned");
            if registry.is_empty() {
                debug!("no peers registered, local chain stands");
            }
            registry.all()
        };
        let local_len = self.ledger.lock().expect("mutex poisoned").len();

        let candidate =
            resolve_conflicts(local_len, &peers, source, self.config.consensus_concurrency).await;

        let mut ledger = self.ledger.lock().expect("mutex poisoned");
        let replaced = match candidate {
            Some(chain) if chain.len() > ledger.len() => {
                info!(
                    "replacing local chain ({} blocks) with peer chain ({} blocks)",
                    ledger.len(),
                    chain.len()
                );
                ledger.replace_chain(chain);
                self.cancel.cancel_all();
                true
            }
            Some(chain) => {
                debug!(
                    "local chain grew to {} while resolving, keeping it over {}",
                    ledger.len(),
                    chain.len()
                );
                false
            }
            None => false,
        };
        (replaced, ledger.chain().to_vec())
    }
}
