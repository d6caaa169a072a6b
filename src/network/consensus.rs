use actix_web::web;
use futures::stream::{self, StreamExt};
use log::{debug, info, warn};

use super::{ChainSource, PeerAddress};
use crate::blockchain::{Block, validate_chain};

/// Pick the longest valid chain reported by `peers`, if any beats `local_len`.
///
/// Peers are fetched concurrently, at most `concurrency` at a time, but the
/// reduction runs in `peers` order, so among equally long winners the first
/// one listed is kept. Unreachable, malformed or invalid peers are skipped.
/// Candidate chains are validated on the blocking pool.
pub async fn resolve_conflicts<S: ChainSource>(
    local_len: usize,
    peers: &[PeerAddress],
    source: &S,
    concurrency: usize,
) -> Option<Vec<Block>> {
    let responses: Vec<_> = stream::iter(peers)
        .map(|peer| async move { (peer, source.fetch_chain(peer).await) })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut best_length = local_len;
    let mut best_chain = None;

    for (peer, response) in responses {
        let reported = match response {
            Ok(reported) => reported,
            Err(e) => {
                warn!("skipping peer {peer}: {e}");
                continue;
            }
        };

        if reported.length <= best_length {
            debug!(
                "peer {peer} chain length {} does not beat {best_length}",
                reported.length
            );
            continue;
        }

        let candidate = reported.chain;
        let checked = web::block(move || validate_chain(&candidate).map(|()| candidate)).await;
        let chain = match checked {
            Ok(Ok(chain)) => chain,
            Ok(Err(e)) => {
                warn!("skipping peer {peer}: {e}");
                continue;
            }
            Err(e) => {
                warn!("skipping peer {peer}: validation worker failed: {e}");
                continue;
            }
        };

        info!("peer {peer} offers valid chain of length {}", reported.length);
        best_length = reported.length;
        best_chain = Some(chain);
    }

    best_chain
}
