use actix_web::{web, App, HttpServer};
use todo_backend::config::db::db_url;
use todo_backend::config::server::ServerConfig;
use todo_backend::infra::state::build_state;
use todo_backend::middleware::{
    cors_middleware, RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan,
};
use todo_backend::routes;
use todo_backend::state::security_config::SecurityConfig;
use todo_backend::telemetry;
use tracing::{error, info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let server = match ServerConfig::from_env() {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "Invalid server configuration");
            std::process::exit(1);
        }
    };

    let security_config = match SecurityConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid session configuration");
            std::process::exit(1);
        }
    };
    if !security_config.has_secret() {
        warn!("SESSION_SECRET is not set; every token issue and verify will fail");
    }

    let database_url = match db_url() {
        Ok(url) => url,
        Err(e) => {
            error!(error = %e, "Invalid database configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state(security_config)
        .with_db_url(database_url)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    info!(host = %server.host, port = server.port, "Starting todo backend");

    let data = web::Data::new(app_state);

    // Last `wrap` runs first: security headers and CORS see every response,
    // including errors rendered by `RequestTrace`.
    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .wrap(cors_middleware())
            .wrap(SecurityHeaders)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
