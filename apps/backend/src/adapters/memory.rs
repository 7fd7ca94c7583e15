//! In-memory store backend.
//!
//! Backs the same capability traits as the SeaORM adapters so the two are
//! interchangeable at startup. Each store keeps its rows in a HashMap
//! behind a single RwLock; signup's check-then-insert runs entirely under
//! one write guard, which is what makes concurrent duplicate signups fail.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::todos::{NewTodo, Todo, TodoFilter, TodoStore, TodoUpdate};
use crate::repos::users::{NewUser, User, UserStore};

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.users.read().values().any(|user| user.email == email))
    }

    async fn save(&self, user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write();

        // Uniqueness check and insert are atomic under the write guard.
        if users.values().any(|existing| existing.email == user.email) {
            return Err(DomainError::conflict(
                ConflictKind::UniqueEmail,
                "Email already exists",
            ));
        }

        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[derive(Default)]
pub struct MemoryTodoStore {
    todos: RwLock<HashMap<Uuid, Todo>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn create(&self, todo: NewTodo) -> Result<Todo, DomainError> {
        let now = OffsetDateTime::now_utc();
        let todo = Todo {
            id: Uuid::new_v4(),
            name: todo.name,
            priority: todo.priority,
            completed: todo.completed,
            user_id: todo.user_id,
            created_at: now,
            updated_at: now,
        };
        self.todos.write().insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, DomainError> {
        Ok(self.todos.read().get(&id).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        filter: TodoFilter,
    ) -> Result<Vec<Todo>, DomainError> {
        let mut todos: Vec<Todo> = self
            .todos
            .read()
            .values()
            .filter(|todo| todo.user_id == user_id)
            .filter(|todo| filter.completed.map_or(true, |c| todo.completed == c))
            .filter(|todo| filter.priority.map_or(true, |p| todo.priority == p))
            .cloned()
            .collect();
        todos.sort_by_key(|todo| todo.created_at);
        Ok(todos)
    }

    async fn update(&self, id: Uuid, changes: TodoUpdate) -> Result<Option<Todo>, DomainError> {
        let mut todos = self.todos.write();
        let Some(todo) = todos.get_mut(&id) else {
            return Ok(None);
        };

        todo.name = changes.name;
        todo.priority = changes.priority;
        if let Some(completed) = changes.completed {
            todo.completed = completed;
        }
        todo.updated_at = OffsetDateTime::now_utc();
        Ok(Some(todo.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.todos.write().remove(&id).is_some())
    }
}
