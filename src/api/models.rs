use crate::blockchain::Block;
use crate::config::Config;
use crate::network::PeerAddress;
use crate::node::Node;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// Shared application state: one node per process.
pub struct AppState {
    pub node: Node,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            node: Node::new(config),
        }
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

#[derive(Serialize)]
pub struct CancelResponse {
    pub cancelled: bool,
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewTxRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize)]
pub struct PendingResponse {
    pub size: usize,
    pub transactions: Vec<Transaction>,
}

/* ---------- Node API Models ---------- */

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterNodeRequest {
    pub node: String,
}

#[derive(Serialize)]
pub struct RegisterNodeResponse {
    pub message: &'static str,
    pub total_nodes: Vec<PeerAddress>,
}

#[derive(Serialize)]
pub struct NodesResponse {
    pub nodes: Vec<PeerAddress>,
}

/// Carries `new_chain` when the local chain was replaced, `chain` otherwise.
#[derive(Serialize)]
pub struct ConsensusResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_chain: Option<Vec<Block>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<Vec<Block>>,
}
