use serde::{Deserialize, Serialize};

use crate::blockchain::{MINING_REWARD, REWARD_SENDER};

/// A value transfer between two opaque identifiers.
///
/// Field order is part of the canonical block encoding and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: u64) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }

    /// The transaction paying a miner for forging a block.
    pub fn reward(miner: impl Into<String>) -> Self {
        Self::new(REWARD_SENDER, miner, MINING_REWARD)
    }
}
