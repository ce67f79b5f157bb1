use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use medbridge_api::{AppStateInner, router};
use medbridge_auth::{CredentialScheme, PasswordManager};
use medbridge_db::Database;
use medbridge_store::Store;
use medbridge_store::memory::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "medbridge_server=debug,medbridge_api=debug,medbridge_db=debug,tower_http=debug"
                    .into()
            }),
        )
        .init();

    // Config
    let host = std::env::var("MEDBRIDGE_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("MEDBRIDGE_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // The hashing scheme is resolved exactly once, here, and logged by the
    // manager. No per-call fallback.
    let scheme: CredentialScheme = match std::env::var("MEDBRIDGE_PASSWORD_SCHEME") {
        Ok(name) => name.parse()?,
        Err(_) => CredentialScheme::Argon2id,
    };

    // Backend selection: a DB path means SQLite, otherwise process-local memory.
    let store: Arc<dyn Store> = match std::env::var("MEDBRIDGE_DB_PATH") {
        Ok(path) => {
            info!("storage backend: sqlite at {}", path);
            Arc::new(Database::open(&PathBuf::from(path))?)
        }
        Err(_) => {
            info!("MEDBRIDGE_DB_PATH unset, storage backend: in-memory (not persisted)");
            Arc::new(MemoryStore::new())
        }
    };

    let state = Arc::new(AppStateInner {
        store,
        passwords: PasswordManager::new(scheme),
    });

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("medbridge listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
