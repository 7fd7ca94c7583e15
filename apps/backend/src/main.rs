use actix_web::{web, App, HttpServer};
use backend::config::db::DbProfile;
use backend::infra::state::build_state;
use backend::middleware::auth_context::AuthContext;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::routes;
use backend::state::security_config::SecurityConfig;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    let jwt = match std::env::var("BACKEND_JWT_SECRET") {
        Ok(jwt) => jwt,
        Err(_) => {
            eprintln!("❌ BACKEND_JWT_SECRET must be set");
            std::process::exit(1);
        }
    };

    let token_ttl_secs = std::env::var("BACKEND_TOKEN_TTL_SECS")
        .unwrap_or_else(|_| "3600".to_string())
        .parse::<i64>()
        .unwrap_or_else(|_| {
            eprintln!("❌ BACKEND_TOKEN_TTL_SECS must be a number of seconds");
            std::process::exit(1);
        });

    let security_config = SecurityConfig::new(jwt.as_bytes()).with_token_ttl(token_ttl_secs);

    // Store backend selection: postgres (default) or memory
    let storage = std::env::var("BACKEND_STORAGE").unwrap_or_else(|_| "postgres".to_string());
    let builder = build_state().with_security(security_config);
    let builder = match storage.as_str() {
        "postgres" => builder.with_db(DbProfile::Prod),
        "memory" => builder.with_memory(),
        other => {
            eprintln!("❌ Unknown BACKEND_STORAGE '{other}' (use 'postgres' or 'memory')");
            std::process::exit(1);
        }
    };

    let app_state = match builder.build().await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    println!("🚀 Starting TaskVault Backend on http://{}:{} ({storage} storage)", host, port);

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(AuthContext)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
