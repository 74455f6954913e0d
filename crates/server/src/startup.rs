use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// config.toml first, then environment variables only.
fn load_config() -> Result<AppConfig, StartupError> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            warn!(error = %e, "config file unusable, falling back to environment");
            AppConfig::from_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
        }
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = load_config()?;

    let db = models::db::connect_with_config(&cfg.database).await.map_err(StartupError::from)?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await.map_err(StartupError::from)?;
        info!("schema migrations applied");
    }

    let app: Router = routes::build_router(AppState::new(db), build_cors());

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
