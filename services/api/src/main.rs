use api::auth::AuthKeys;
use api::config::Config;
use api::files::FileStore;
use api::router::create_router;
use api::seed;
use api::state::AppState;
use api::store::{SqliteStore, Store};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    tracing::info!(addr = %config.bind_addr, db = %config.db_path.display(), "starting VAPT tracker");

    let store: Arc<dyn Store> = Arc::new(SqliteStore::open(&config.db_path)?);

    let files = FileStore::new(&config.uploads_dir);
    files.ensure_root().await?;

    if config.seed {
        seed::seed_if_empty(store.as_ref()).await?;
    }

    let state = AppState::new(store, files, AuthKeys::new(&config.jwt_secret));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
