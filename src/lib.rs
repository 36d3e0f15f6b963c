use std::io;

use axum::{handler::Handler, http::StatusCode, routing::get_service, Router};
use deadpool::managed::Pool;
use diesel_async::{
    pooled_connection::AsyncDieselConnectionManager, AsyncPgConnection, SimpleAsyncConnection,
};
use tower_http::services::ServeDir;

pub mod error;
pub mod forms;
pub mod models;
pub mod routes;
pub mod schedule;
pub mod schema;
pub mod search;
pub mod store;
pub mod views;

pub type DbPool = Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;

/// Idempotent DDL for the venues, artists and shows tables.
pub const SCHEMA: &str = include_str!("../migrations/2022-11-20-000000_create_booking/up.sql");

pub fn connect_to_db(db_url: &str) -> anyhow::Result<DbPool> {
    let db_config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(db_url);
    Pool::builder(db_config)
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build database pool: {e}"))
}

pub async fn apply_schema(pool: &DbPool) -> anyhow::Result<()> {
    let conn = &mut pool.get().await?;
    conn.batch_execute(SCHEMA).await?;
    Ok(())
}

pub fn app(static_dir: &str) -> Router {
    let serve = get_service(ServeDir::new(static_dir)).handle_error(handle_error);
    Router::new()
        .merge(routes::app())
        .nest("/static", serve)
        .fallback(not_found.into_service())
}

async fn handle_error(_: io::Error) -> error::AppError {
    error::AppError::from(StatusCode::INTERNAL_SERVER_ERROR, "failed to fetch asset")
}

async fn not_found() -> error::AppError {
    error::AppError::from(StatusCode::NOT_FOUND, "page not found")
}
