//! SeaORM adapter for the todo store.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::todos::{self, TodoPriority};
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;
use crate::repos::todos::{NewTodo, Priority, Todo, TodoFilter, TodoStore, TodoUpdate};

pub struct SeaTodoStore {
    conn: DatabaseConnection,
}

impl SeaTodoStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl TodoStore for SeaTodoStore {
    async fn create(&self, todo: NewTodo) -> Result<Todo, DomainError> {
        let now = OffsetDateTime::now_utc();
        let todo_active = todos::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(todo.name),
            priority: Set(TodoPriority::from(todo.priority)),
            completed: Set(todo.completed),
            user_id: Set(todo.user_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        todo_active
            .insert(&self.conn)
            .await
            .map(Todo::from)
            .map_err(map_db_err)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, DomainError> {
        todos::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .map(|model| model.map(Todo::from))
            .map_err(map_db_err)
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        filter: TodoFilter,
    ) -> Result<Vec<Todo>, DomainError> {
        let mut query = todos::Entity::find().filter(todos::Column::UserId.eq(user_id));

        if let Some(completed) = filter.completed {
            query = query.filter(todos::Column::Completed.eq(completed));
        }
        if let Some(priority) = filter.priority {
            query = query.filter(todos::Column::Priority.eq(TodoPriority::from(priority)));
        }

        query
            .all(&self.conn)
            .await
            .map(|models| models.into_iter().map(Todo::from).collect())
            .map_err(map_db_err)
    }

    async fn update(&self, id: Uuid, changes: TodoUpdate) -> Result<Option<Todo>, DomainError> {
        let existing = todos::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .map_err(map_db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let completed = changes.completed.unwrap_or(existing.completed);
        let mut todo_active: todos::ActiveModel = existing.into();
        todo_active.name = Set(changes.name);
        todo_active.priority = Set(TodoPriority::from(changes.priority));
        todo_active.completed = Set(completed);
        todo_active.updated_at = Set(OffsetDateTime::now_utc());

        todo_active
            .update(&self.conn)
            .await
            .map(|model| Some(Todo::from(model)))
            .map_err(map_db_err)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        todos::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .map(|result| result.rows_affected > 0)
            .map_err(map_db_err)
    }
}

impl From<todos::Model> for Todo {
    fn from(model: todos::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            priority: Priority::from(model.priority),
            completed: model.completed,
            user_id: model.user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<Priority> for TodoPriority {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Low => TodoPriority::Low,
            Priority::Medium => TodoPriority::Medium,
            Priority::High => TodoPriority::High,
        }
    }
}

impl From<TodoPriority> for Priority {
    fn from(priority: TodoPriority) -> Self {
        match priority {
            TodoPriority::Low => Priority::Low,
            TodoPriority::Medium => Priority::Medium,
            TodoPriority::High => Priority::High,
        }
    }
}
