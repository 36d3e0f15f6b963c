use std::net::SocketAddr;

use axum::Extension;
use envconfig::Envconfig;
use fyyur::{apply_schema, connect_to_db};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Envconfig)]
struct Config {
    #[envconfig(from = "DATABASE_URL")]
    pub db_url: String,
    #[envconfig(from = "PORT", default = "5000")]
    pub port: u16,
    #[envconfig(from = "STATIC_DIR", default = "static")]
    pub static_dir: String,
    #[envconfig(from = "APPLY_SCHEMA", default = "true")]
    pub apply_schema: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config =
        Config::init_from_env().map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    let pool = connect_to_db(&config.db_url)?;
    if config.apply_schema {
        apply_schema(&pool).await?;
        info!("database schema is in place");
    }

    let app = fyyur::app(&config.static_dir)
        .layer(Extension(pool))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on {addr}");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
