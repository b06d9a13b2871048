use nc_news::{config::Config, init_db, make_router, run_app};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> nc_news::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nc_news=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let pool = init_db(&config.database_url).await?;
    let router = make_router();
    if let Err(error) = run_app(router, config.address(), pool).await {
        tracing::error!("Server stopped: {:#}", error);
        return Err(error);
    }
    Ok(())
}
