use actix_web::{HttpResponse, Responder, get, post, web};
use log::debug;

use super::models::{AppState, NewTxRequest, NewTxResponse, PendingResponse};

/// Queue a transaction for the next block.
#[post("/transactions/new/")]
pub async fn new_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let tx = body.into_inner();
    let index = state
        .node
        .submit_transaction(&tx.sender, &tx.recipient, tx.amount);
    debug!(
        "POST /transactions/new/ - {} -> {} ({}) queued for block {}",
        tx.sender, tx.recipient, tx.amount, index
    );

    HttpResponse::Ok().json(NewTxResponse {
        message: format!("Transaction will be added to Block {index}"),
        index,
    })
}

/// List the pending pool.
#[get("/transactions/pending/")]
pub async fn get_pending(state: web::Data<AppState>) -> impl Responder {
    let transactions = state.node.pending_transactions();
    HttpResponse::Ok().json(PendingResponse {
        size: transactions.len(),
        transactions,
    })
}
