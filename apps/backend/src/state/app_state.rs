use std::sync::Arc;

use crate::repos::todos::TodoStore;
use crate::repos::users::UserStore;

use super::security_config::SecurityConfig;

/// Application state containing shared resources.
///
/// Store backends are behind capability traits so the in-memory and
/// database-backed implementations are interchangeable at startup.
#[derive(Clone)]
pub struct AppState {
    users: Arc<dyn UserStore>,
    todos: Arc<dyn TodoStore>,
    security: SecurityConfig,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        todos: Arc<dyn TodoStore>,
        security: SecurityConfig,
    ) -> Self {
        Self {
            users,
            todos,
            security,
        }
    }

    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }

    pub fn todos(&self) -> &dyn TodoStore {
        self.todos.as_ref()
    }

    pub fn security(&self) -> &SecurityConfig {
        &self.security
    }
}
