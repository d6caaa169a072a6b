use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use env_logger::Env;
use log::info;

use proof_ledger::api::{self, AppState};
use proof_ledger::config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    let (host, port) = (config.host.clone(), config.port);

    info!("⛓️ Starting ledger node {} at http://{host}:{port}", config.node_id);

    let state = web::Data::new(AppState::new(config));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
