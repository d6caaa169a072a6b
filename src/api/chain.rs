use actix_web::{HttpResponse, Responder, get, post, web};
use log::debug;

use super::models::{AppState, CancelResponse, MineResponse, ValidateResponse};
use crate::error::LedgerError;
use crate::network::PeerChain;

/// Get the full chain. Peers query this endpoint during consensus.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let (chain, length) = state.node.get_chain();
    HttpResponse::Ok().json(PeerChain { chain, length })
}

/// Validate the whole local chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let (valid, length) = state.node.validate();
    HttpResponse::Ok().json(ValidateResponse { valid, length })
}

/// Mine a new block from the pending pool, rewarding this node.
#[post("/mine/")]
pub async fn mine_block(state: web::Data<AppState>) -> Result<HttpResponse, LedgerError> {
    let node = &state.node;
    let block = node.mine_block(node.node_id()).await?;

    debug!(
        "POST /mine/ - block #{} returned to caller (previous_hash={})",
        block.index, block.previous_hash
    );

    Ok(HttpResponse::Ok().json(MineResponse {
        message: "New Block Forged",
        index: block.index,
        transactions: block.transactions,
        proof: block.proof,
        previous_hash: block.previous_hash,
    }))
}

/// Abandon every proof search in flight.
#[post("/mine/cancel/")]
pub async fn cancel_mining(state: web::Data<AppState>) -> impl Responder {
    state.node.cancel_mining();
    HttpResponse::Ok().json(CancelResponse { cancelled: true })
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use crate::api::{self, AppState};
    use crate::config::Config;

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new(Config {
            node_id: "node-1".into(),
            ..Config::default()
        }))
    }

    #[actix_web::test]
    async fn genesis_chain_is_served() {
        let app = test::init_service(App::new().app_data(state()).configure(api::init_routes)).await;

        let req = test::TestRequest::get().uri("/api/v1/chain/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["length"], 1);
        assert_eq!(body["chain"][0]["index"], 1);
        assert_eq!(body["chain"][0]["proof"], 1);
        assert_eq!(body["chain"][0]["previous_hash"], "100");
    }

    #[actix_web::test]
    async fn submit_then_mine_scenario() {
        let state = state();
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(api::init_routes))
                .await;
        let genesis_hash = state.node.get_chain().0[0].hash();

        let req = test::TestRequest::post()
            .uri("/api/v1/transactions/new/")
            .set_json(json!({"sender": "A", "recipient": "B", "amount": 5}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["index"], 2);
        assert_eq!(body["message"], "Transaction will be added to Block 2");

        let req = test::TestRequest::post().uri("/api/v1/mine/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "New Block Forged");
        assert_eq!(body["index"], 2);
        assert_eq!(body["previous_hash"], genesis_hash);
        assert_eq!(
            body["transactions"],
            json!([
                {"sender": "A", "recipient": "B", "amount": 5},
                {"sender": "0", "recipient": "node-1", "amount": 1}
            ])
        );

        let req = test::TestRequest::get().uri("/api/v1/validate/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"valid": true, "length": 2}));
    }

    #[actix_web::test]
    async fn cancel_reports_success() {
        let app = test::init_service(App::new().app_data(state()).configure(api::init_routes)).await;
        let req = test::TestRequest::post().uri("/api/v1/mine/cancel/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"cancelled": true}));
    }
}
