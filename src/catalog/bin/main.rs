include!("../../lib.rs");

use std::net::SocketAddr;

use crate::catalog::controller::create_router;
use crate::catalog::factory::create_repositories;
use crate::core::controller::AppState;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::setup_tracing;

const DEV_MODE: bool = true;

#[tokio::main]
async fn main() {
    setup_tracing();

    let store = if DEV_MODE {
        RepositoryStore::InMemory
    } else {
        RepositoryStore::DynamoDB
    };
    let state = AppState::new("Local Library", create_repositories(store).await);
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.http_port));
    let app = create_router(state);

    tracing::info!(%addr, "catalog listening");
    if let Err(err) = axum::Server::bind(&addr).serve(app.into_make_service()).await {
        tracing::error!(error = %err, "server exited");
    }
}
