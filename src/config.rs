use std::env;
use std::str::FromStr;
use std::time::Duration;

use uuid::Uuid;

use crate::blockchain::SearchLimits;

/// Node settings read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Recipient of this node's mining rewards.
    pub node_id: String,
    pub peer_timeout: Duration,
    pub mining_timeout: Option<Duration>,
    pub proof_search_limit: u64,
    pub consensus_concurrency: usize,
    /// Path of the chain endpoint queried on every peer.
    pub peer_chain_path: String,
    pub max_chain_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            node_id: Uuid::new_v4().simple().to_string(),
            peer_timeout: Duration::from_secs(5),
            mining_timeout: None,
            proof_search_limit: u64::MAX,
            consensus_concurrency: 8,
            peer_chain_path: "/api/v1/chain/".to_string(),
            max_chain_bytes: 8 * 1024 * 1024,
        }
    }
}

fn parsed<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parsed("PORT").unwrap_or(defaults.port),
            node_id: env::var("NODE_ID")
                .ok()
                .filter(|id| !id.trim().is_empty())
                .unwrap_or(defaults.node_id),
            peer_timeout: parsed("PEER_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.peer_timeout),
            mining_timeout: parsed("MINING_TIMEOUT_SECS").map(Duration::from_secs),
            proof_search_limit: parsed("PROOF_SEARCH_LIMIT").unwrap_or(defaults.proof_search_limit),
            consensus_concurrency: parsed::<usize>("CONSENSUS_CONCURRENCY")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.consensus_concurrency),
            peer_chain_path: env::var("PEER_CHAIN_PATH").unwrap_or(defaults.peer_chain_path),
            max_chain_bytes: parsed("MAX_CHAIN_BYTES").unwrap_or(defaults.max_chain_bytes),
        }
    }

    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            max_proof: self.proof_search_limit,
            max_duration: self.mining_timeout,
        }
    }
}
