//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::AuthService;
use crate::auth::password::PasswordHashError;
use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to the database pool, the
/// configuration, and the credential & session authority.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    auth: AuthService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the auth service cannot be constructed; fatal at
    /// startup.
    pub fn new(config: ServerConfig, pool: PgPool) -> Result<Self, PasswordHashError> {
        let auth = AuthService::new(&config.token_secret, config.token_ttl)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, pool, auth }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the credential & session authority.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }
}
