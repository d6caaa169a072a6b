mod chain;
mod health;
pub mod models;
mod nodes;
mod tx;

use actix_web::web::{self, ServiceConfig};

use crate::error::LedgerError;
pub use models::AppState;

/// Malformed JSON bodies (missing or unknown fields, wrong types) are
/// rejected before any ledger operation runs.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| LedgerError::InvalidInput(err.to_string()).into())
}

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(json_config())
            .service(health::health_check)
            .service(chain::get_chain)
            .service(chain::validate_chain)
            .service(chain::mine_block)
            .service(chain::cancel_mining)
            .service(tx::new_transaction)
            .service(tx::get_pending)
            .service(nodes::register_node)
            .service(nodes::list_nodes)
            .service(nodes::resolve),
    );
}
