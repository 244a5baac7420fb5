use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use market_backend::config::Config;
use market_backend::middleware::cors::cors_middleware;
use market_backend::middleware::request_trace::RequestTrace;
use market_backend::middleware::structured_logger::StructuredLogger;
use market_backend::middleware::trace_span::TraceSpan;
use market_backend::routes;
use market_backend::state::app_state::AppState;
use market_backend::telemetry;
use market_backend::users::InMemoryUserStore;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(config.security(), Arc::new(InMemoryUserStore::new()));
    let data = web::Data::new(app_state);
    let origins = config.cors_allowed_origins.clone();

    info!(host = %config.host, port = config.port, "starting marketplace backend");

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
