use actix_web::{HttpResponse, Responder, get, post, web};

use super::models::{
    AppState, ConsensusResponse, NodesResponse, RegisterNodeRequest, RegisterNodeResponse,
};
use crate::error::LedgerError;

/// Register a peer given as `http://host:port`.
#[post("/nodes/register/")]
pub async fn register_node(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodeRequest>,
) -> Result<HttpResponse, LedgerError> {
    state.node.register_peer(&body.node)?;
    Ok(HttpResponse::Ok().json(RegisterNodeResponse {
        message: "New nodes have been added",
        total_nodes: state.node.list_peers(),
    }))
}

#[get("/nodes/")]
pub async fn list_nodes(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(NodesResponse {
        nodes: state.node.list_peers(),
    })
}

/// Run consensus against every registered peer.
#[get("/nodes/resolve/")]
pub async fn resolve(state: web::Data<AppState>) -> impl Responder {
    let client = state.node.peer_client();
    let (replaced, chain) = state.node.run_consensus(&client).await;

    let resp = if replaced {
        ConsensusResponse {
            message: "Our chain was replaced",
            new_chain: Some(chain),
            chain: None,
        }
    } else {
        ConsensusResponse {
            message: "Our chain is authoritative",
            new_chain: None,
            chain: Some(chain),
        }
    };
    HttpResponse::Ok().json(resp)
}
