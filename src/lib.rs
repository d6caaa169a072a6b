//! A minimal append-only ledger node: hash-chained blocks sealed by
//! proof-of-work, with longest-valid-chain consensus between peers.

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod network;
pub mod node;
pub mod transaction;
