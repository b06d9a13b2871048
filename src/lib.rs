pub mod config;
mod data_formats;
mod db_helpers;
mod errors;
mod handlers;
pub mod models;
pub mod validation;

use anyhow::Context;
pub use anyhow::Result;
use axum::http::StatusCode;
use axum::{routing::*, Extension, Json, Router};
pub use data_formats::*;
pub use errors::{RequestError, RequestErrorJson};
use handlers::*;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::{
    net::{SocketAddr, TcpListener},
    sync::Arc,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub type JsonResponse<T> = (StatusCode, Json<T>);

pub async fn run_app(router: Router, address: SocketAddr, pool: SqlitePool) -> Result<()> {
    let listener = TcpListener::bind(address).with_context(|| format!("Failed to bind {address}"))?;
    serve(router, listener, pool).await
}

/// Serves `router` on an already bound listener.
pub async fn serve(router: Router, listener: TcpListener, pool: SqlitePool) -> Result<()> {
    let app = router
        .layer(Extension(Arc::new(pool)))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::Server::from_tcp(listener)?
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

pub async fn init_db(db_url: &str) -> Result<SqlitePool> {
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        tracing::info!("Creating database {}", db_url);
        Sqlite::create_database(db_url)
            .await
            .with_context(|| format!("Failed to create database {db_url}"))?;
    } else {
        tracing::info!("Database already exists");
    }
    let pool = SqlitePool::connect(db_url).await?;
    tracing::info!("Running migrations");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations completed");
    Ok(pool)
}

pub fn get_random_free_port() -> Result<(TcpListener, SocketAddr)> {
    let listener = TcpListener::bind("127.0.0.1:0").context("Could not get a free port")?;
    let addr = listener.local_addr()?;
    Ok((listener, addr))
}

pub fn make_router() -> Router {
    Router::new()
        .route("/api", get(get_endpoints))
        .route("/api/topics", get(get_topics).post(post_topic))
        .route("/api/articles", get(get_articles).post(post_article))
        .route(
            "/api/articles/:article_id",
            get(get_article_by_id)
                .patch(patch_article_by_id)
                .delete(delete_article_by_id),
        )
        .route(
            "/api/articles/:article_id/comments",
            get(get_article_comments).post(post_comment),
        )
        .route(
            "/api/comments/:comment_id",
            patch(patch_comment_by_id).delete(delete_comment_by_id),
        )
        .route("/api/users", get(get_users))
        .route("/api/users/:username", get(get_user_by_username))
        .fallback(not_found)
}
