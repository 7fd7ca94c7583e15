//! Todo domain model and the todo-store capability interface.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

impl FromStr for Priority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(()),
        }
    }
}

/// Todo domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: Uuid,
    pub name: String,
    pub priority: Priority,
    pub completed: bool,
    pub user_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Fields for a todo about to be persisted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub name: String,
    pub priority: Priority,
    pub completed: bool,
    pub user_id: Uuid,
}

/// Mutable fields of an existing todo. `completed: None` leaves the
/// current completion state untouched.
#[derive(Debug, Clone)]
pub struct TodoUpdate {
    pub name: String,
    pub priority: Priority,
    pub completed: Option<bool>,
}

/// Optional listing filters.
#[derive(Debug, Clone, Copy, Default)]
pub struct TodoFilter {
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn create(&self, todo: NewTodo) -> Result<Todo, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, DomainError>;

    async fn list_by_user(&self, user_id: Uuid, filter: TodoFilter)
        -> Result<Vec<Todo>, DomainError>;

    /// Returns None when no todo with this id exists.
    async fn update(&self, id: Uuid, changes: TodoUpdate) -> Result<Option<Todo>, DomainError>;

    /// Returns whether a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::Priority;

    #[test]
    fn test_priority_parse() {
        assert_eq!("low".parse::<Priority>(), Ok(Priority::Low));
        assert_eq!("medium".parse::<Priority>(), Ok(Priority::Medium));
        assert_eq!("high".parse::<Priority>(), Ok(Priority::High));
        assert!("urgent".parse::<Priority>().is_err());
        assert!("HIGH".parse::<Priority>().is_err());
    }

    #[test]
    fn test_priority_display_roundtrip() {
        for p in [Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(p.to_string().parse::<Priority>(), Ok(p));
        }
    }
}
