use log::debug;

use super::{Block, pow};
use crate::error::{LedgerError, Result};

/// Check indices, hash linkage and proof-of-work across the chain.
///
/// Indices must run 1..=N with no gaps; linkage and proof are checked for
/// every block after the first. All-or-nothing: the first failing block
/// rejects the whole chain.
pub fn validate_chain(chain: &[Block]) -> Result<()> {
    for (position, block) in chain.iter().enumerate() {
        if block.index != position as u64 + 1 {
            return Err(LedgerError::ChainInvalid {
                index: block.index,
                reason: "index out of sequence",
            });
        }
    }

    for pair in chain.windows(2) {
        let (prev, block) = (&pair[0], &pair[1]);

        if block.previous_hash != prev.hash() {
            return Err(LedgerError::ChainInvalid {
                index: block.index,
                reason: "previous_hash does not match hash of previous block",
            });
        }

        if !pow::is_valid_proof(prev.proof, block.proof) {
            return Err(LedgerError::ChainInvalid {
                index: block.index,
                reason: "proof does not satisfy difficulty",
            });
        }
    }
    Ok(())
}

pub fn is_valid_chain(chain: &[Block]) -> bool {
    match validate_chain(chain) {
        Ok(()) => true,
        Err(e) => {
            debug!("rejecting chain of length {}: {}", chain.len(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::Ledger;

    fn mined_chain(blocks: usize) -> Vec<Block> {
        let mut ledger = Ledger::new();
        for i in 0..blocks {
            ledger.new_transaction("A", "B", i as u64);
            ledger.mine("miner").unwrap();
        }
        ledger.chain().to_vec()
    }

    #[test]
    fn genesis_only_is_valid() {
        assert!(is_valid_chain(Ledger::new().chain()));
    }

    #[test]
    fn fresh_chain_is_valid() {
        assert!(is_valid_chain(&mined_chain(3)));
    }

    #[test]
    fn rejects_altered_previous_hash() {
        let mut chain = mined_chain(3);
        chain[2].previous_hash = "tampered".into();
        let err = validate_chain(&chain).unwrap_err();
        assert!(matches!(err, LedgerError::ChainInvalid { index: 3, .. }));
    }

    #[test]
    fn rejects_altered_transactions_upstream() {
        let mut chain = mined_chain(3);
        // Changing block 2 breaks the link stored in block 3.
        chain[1].transactions[0].amount = 1_000;
        assert!(!is_valid_chain(&chain));
    }

    #[test]
    fn rejects_index_gap() {
        let mut chain = mined_chain(1);
        chain[1].index = 99;
        // Linkage and proof still hold; only the index is off.
        assert!(pow::is_valid_proof(chain[0].proof, chain[1].proof));
        assert_eq!(chain[1].previous_hash, chain[0].hash());
        let err = validate_chain(&chain).unwrap_err();
        assert!(matches!(err, LedgerError::ChainInvalid { index: 99, .. }));
    }

    #[test]
    fn rejects_genesis_not_at_one() {
        let mut chain = Ledger::new().chain().to_vec();
        chain[0].index = 0;
        assert!(!is_valid_chain(&chain));
    }

    #[test]
    fn rejects_altered_proof() {
        let mut chain = mined_chain(2);
        let last = chain.len() - 1;
        let prev_proof = chain[last - 1].proof;
        let bad = (0..)
            .find(|p| !pow::is_valid_proof(prev_proof, *p))
            .unwrap();
        chain[last].proof = bad;
        let err = validate_chain(&chain).unwrap_err();
        assert!(matches!(err, LedgerError::ChainInvalid { index: 3, .. }));
    }
}
