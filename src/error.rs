use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Errors raised by the ledger core and the node around it.
///
/// Only `InvalidInput` and `InvalidAddress` are expected to reach an API
/// caller under normal operation; the peer variants are absorbed by the
/// consensus resolver.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid peer address `{address}`: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("peer {peer} unreachable: {reason}")]
    PeerUnreachable { peer: String, reason: String },

    #[error("peer {peer} sent a malformed response: {reason}")]
    PeerMalformedResponse { peer: String, reason: String },

    #[error("chain invalid at block #{index}: {reason}")]
    ChainInvalid { index: u64, reason: &'static str },

    #[error("no valid proof found up to candidate {limit}")]
    ProofSearchExhausted { limit: u64 },

    #[error("proof search cancelled")]
    SearchCancelled,

    #[error("proof search timed out after {tried} candidates")]
    SearchTimedOut { tried: u64 },

    #[error("mining worker failed: {0}")]
    WorkerFailed(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for LedgerError {
    fn status_code(&self) -> StatusCode {
        match self {
            LedgerError::InvalidInput(_) | LedgerError::InvalidAddress { .. } => {
                StatusCode::BAD_REQUEST
            }
            LedgerError::SearchCancelled => StatusCode::CONFLICT,
            LedgerError::PeerUnreachable { .. }
            | LedgerError::PeerMalformedResponse { .. }
            | LedgerError::ChainInvalid { .. } => StatusCode::BAD_GATEWAY,
            LedgerError::ProofSearchExhausted { .. }
            | LedgerError::SearchTimedOut { .. }
            | LedgerError::WorkerFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
