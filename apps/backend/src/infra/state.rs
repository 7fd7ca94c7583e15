use std::sync::Arc;

use crate::adapters::memory::{MemoryTodoStore, MemoryUserStore};
use crate::adapters::todos_sea::SeaTodoStore;
use crate::adapters::users_sea::SeaUserStore;
use crate::config::db::{DbOwner, DbProfile};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Which store backend the process runs against, chosen once at startup.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    Memory,
    Postgres(DbProfile),
}

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    backend: StoreBackend,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            backend: StoreBackend::Memory,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.backend = StoreBackend::Postgres(profile);
        self
    }

    pub fn with_memory(mut self) -> Self {
        self.backend = StoreBackend::Memory;
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        match self.backend {
            StoreBackend::Memory => Ok(AppState::new(
                Arc::new(MemoryUserStore::new()),
                Arc::new(MemoryTodoStore::new()),
                self.security_config,
            )),
            StoreBackend::Postgres(profile) => {
                // single entrypoint: build + migrate
                let conn = bootstrap_db(profile, DbOwner::App).await?;
                Ok(AppState::new(
                    Arc::new(SeaUserStore::new(conn.clone())),
                    Arc::new(SeaTodoStore::new(conn)),
                    self.security_config,
                ))
            }
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
