pub mod block;
pub mod model;
pub mod pow;
pub mod validation;

pub use block::Block;
pub use model::Ledger;
pub use pow::{CancelSwitch, CancelToken, SearchLimits};
pub use validation::{is_valid_chain, validate_chain};

/// Proof-of-Work difficulty: number of trailing hex characters that must match.
pub const DIFFICULTY: usize = 4;

/// Trailing digest characters a valid proof must produce.
pub const TARGET_SUFFIX: &str = "0000";

/// Sender recorded on the transaction paying the miner.
pub const REWARD_SENDER: &str = "0";

/// Fixed block reward.
pub const MINING_REWARD: u64 = 1;

/// Proof stored in the genesis block.
pub const GENESIS_PROOF: u64 = 1;

/// Placeholder previous hash of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "100";
