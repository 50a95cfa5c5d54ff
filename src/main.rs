//! Entry point: wires up persistence, the game/lobby services, and the
//! HTTP+WebSocket surface described in the session protocol.

mod auth;
mod cosmos_db;
mod gateway;
mod lobby;
#[macro_use]
mod macros;
mod rules_engine;
mod runtime;
mod shared;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::web::{self, Data};
use actix_web::{App, HttpServer};
use openssl::ssl::{SslAcceptor, SslFiletype, SslMethod};

use cosmos_db::database_abstractions::DatabaseWrapper;
use gateway::state::AppState;
use shared::config::SERVICE_CONFIG;

fn build_db() -> DatabaseWrapper {
    if SERVICE_CONFIG.cosmos_account.is_empty() {
        full_info!("no cosmos account configured, running against the in-memory store");
        DatabaseWrapper::new_memory()
    } else {
        DatabaseWrapper::new_cosmos(&SERVICE_CONFIG.cosmos_account, &SERVICE_CONFIG.cosmos_token, &SERVICE_CONFIG.cosmos_database_name)
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(SERVICE_CONFIG.rust_log.clone())).init();
    full_info!("starting with config: host={} port={}", SERVICE_CONFIG.host_name, SERVICE_CONFIG.port);

    let db = Arc::new(build_db());
    let state = AppState::new(db);

    let bind_addr = format!("{}:{}", SERVICE_CONFIG.host_name, SERVICE_CONFIG.port);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(Data::new(state.clone()))
            .wrap(Cors::permissive())
            .service(
                web::scope("/api").service(
                    web::scope("/v1")
                        .route("/version", web::get().to(auth::handlers::version))
                        .route("/users", web::post().to(auth::handlers::register))
                        .route("/users/login", web::post().to(auth::handlers::login))
                        .route("/ws", web::get().to(gateway::ws::ws_index)),
                ),
            )
    });

    if !SERVICE_CONFIG.ssl_cert_file.is_empty() && !SERVICE_CONFIG.ssl_key_file.is_empty() {
        let mut builder = SslAcceptor::mozilla_intermediate(SslMethod::tls()).unwrap();
        builder.set_private_key_file(&SERVICE_CONFIG.ssl_key_file, SslFiletype::PEM).unwrap();
        builder.set_certificate_chain_file(&SERVICE_CONFIG.ssl_cert_file).unwrap();
        server.bind_openssl(bind_addr, builder)?.run().await
    } else {
        full_info!("no TLS cert configured, serving plain HTTP");
        server.bind(bind_addr)?.run().await
    }
}
