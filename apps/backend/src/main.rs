use actix_web::{web, App, HttpServer};
use studenthub::config::AppConfig;
use studenthub::middleware::access_log::AccessLog;
use studenthub::middleware::auth_gate::AuthGate;
use studenthub::middleware::cors::cors_middleware;
use studenthub::middleware::request_trace::RequestTrace;
use studenthub::routes;
use studenthub::{AppState, TokenService};
use tracing::info;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let tokens = TokenService::new(config.security.clone());
    let app_state = web::Data::new(AppState::new(tokens.clone()));
    let exempt_paths = config.exempt_paths.clone();
    let cors_origins = config.cors_allowed_origins.clone();

    info!(
        host = %config.host,
        port = config.port,
        exempt_paths = exempt_paths.len(),
        token_ttl_secs = config.security.token_ttl.as_secs(),
        "Starting StudentHub backend"
    );

    HttpServer::new(move || {
        // Last wrap runs first: RequestTrace sets the trace id before the
        // gate can reject anything.
        App::new()
            .wrap(AuthGate::new(tokens.clone(), exempt_paths.clone()))
            .wrap(cors_middleware(cors_origins.as_deref()))
            .wrap(AccessLog)
            .wrap(RequestTrace)
            .app_data(app_state.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
