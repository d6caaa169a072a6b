pub mod client;
pub mod consensus;
pub mod registry;

pub use client::{ChainSource, HttpPeerClient, PeerChain};
pub use consensus::resolve_conflicts;
pub use registry::{NodeRegistry, PeerAddress};
