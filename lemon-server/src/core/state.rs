//! Shared server state

use std::sync::Arc;

use axum::body::Body;
use http::{Request, Response};
use sqlx::SqlitePool;
use tower::ServiceExt;

use crate::auth::Policy;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppResult;

/// State shared by every request
///
/// Cheap to clone: the pool and config are reference counted. No mutable
/// in-process state lives here; everything is in the store.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub pool: SqlitePool,
}

impl ServerState {
    pub fn new(config: Config, db: DbService) -> Self {
        Self {
            config: Arc::new(config),
            pool: db.pool,
        }
    }

    /// Open the database (running migrations) and build the state
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_path, config.database_max_connections).await?;
        Ok(Self::new(config.clone(), db))
    }

    /// State over a fresh in-memory database
    pub async fn in_memory(config: Config) -> AppResult<Self> {
        let db = DbService::in_memory().await?;
        Ok(Self::new(config, db))
    }

    /// Access policy under the configured booking ownership mode
    pub fn policy(&self) -> Policy {
        Policy::new(self.config.booking_strict_ownership)
    }

    /// Run one request through the fully layered app without a socket
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        let app = crate::routes::build_app(self).with_state(self.clone());
        match app.oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }
}
