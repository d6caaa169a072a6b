use actix_web::rt::time::timeout;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

use super::PeerAddress;
use crate::blockchain::Block;
use crate::error::{LedgerError, Result};

/// Body of a peer's chain endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerChain {
    pub chain: Vec<Block>,
    pub length: usize,
}

impl PeerChain {
    /// Reject bodies whose reported length disagrees with the chain sent.
    fn checked(self, peer: &PeerAddress) -> Result<Self> {
        let malformed = |reason: String| LedgerError::PeerMalformedResponse {
            peer: peer.to_string(),
            reason,
        };
        if self.chain.is_empty() {
            return Err(malformed("empty chain".into()));
        }
        if self.length != self.chain.len() {
            return Err(malformed(format!(
                "reported length {} but sent {} blocks",
                self.length,
                self.chain.len()
            )));
        }
        Ok(self)
    }
}

/// Where the consensus resolver gets candidate chains from.
pub trait ChainSource {
    fn fetch_chain(&self, peer: &PeerAddress) -> impl Future<Output = Result<PeerChain>>;
}

/// Fetches chains over HTTP with the actix client.
pub struct HttpPeerClient {
    client: awc::Client,
    chain_path: String,
    timeout: Duration,
    max_body_bytes: usize,
}

impl HttpPeerClient {
    pub fn new(chain_path: impl Into<String>, timeout: Duration, max_body_bytes: usize) -> Self {
        Self {
            client: awc::Client::builder().timeout(timeout).finish(),
            chain_path: chain_path.into(),
            timeout,
            max_body_bytes,
        }
    }

    async fn get_chain(&self, peer: &PeerAddress) -> Result<PeerChain> {
        let url = format!("{}{}", peer.base_url(), self.chain_path);

        let mut res = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LedgerError::PeerUnreachable {
                peer: peer.to_string(),
                reason: e.to_string(),
            })?;

        if !res.status().is_success() {
            return Err(LedgerError::PeerMalformedResponse {
                peer: peer.to_string(),
                reason: format!("status {}", res.status()),
            });
        }

        let body = res
            .json::<PeerChain>()
            .limit(self.max_body_bytes)
            .await
            .map_err(|e| LedgerError::PeerMalformedResponse {
                peer: peer.to_string(),
                reason: e.to_string(),
            })?;

        body.checked(peer)
    }
}

impl ChainSource for HttpPeerClient {
    async fn fetch_chain(&self, peer: &PeerAddress) -> Result<PeerChain> {
        // The client timeout covers the response head only; bound the body too.
        match timeout(self.timeout, self.get_chain(peer)).await {
            Ok(res) => res,
            Err(_) => Err(LedgerError::PeerUnreachable {
                peer: peer.to_string(),
                reason: format!("timed out after {:?}", self.timeout),
            }),
        }
    }
}
