//! Todo CRUD orchestration, scoped to the authenticated owner.

use uuid::Uuid;

use crate::error::AppError;
use crate::repos::todos::{NewTodo, Todo, TodoFilter, TodoStore, TodoUpdate};

pub async fn create_todo(
    store: &dyn TodoStore,
    owner: Uuid,
    todo: NewTodo,
) -> Result<Todo, AppError> {
    debug_assert_eq!(todo.user_id, owner);
    store.create(todo).await.map_err(AppError::from)
}

/// A todo owned by someone else is reported as missing, not forbidden, so
/// ids don't leak across users.
pub async fn get_todo(store: &dyn TodoStore, owner: Uuid, id: Uuid) -> Result<Todo, AppError> {
    match store.find_by_id(id).await? {
        Some(todo) if todo.user_id == owner => Ok(todo),
        _ => Err(AppError::not_found("Todo not found")),
    }
}

pub async fn list_todos(
    store: &dyn TodoStore,
    owner: Uuid,
    filter: TodoFilter,
) -> Result<Vec<Todo>, AppError> {
    store
        .list_by_user(owner, filter)
        .await
        .map_err(AppError::from)
}

pub async fn update_todo(
    store: &dyn TodoStore,
    owner: Uuid,
    id: Uuid,
    changes: TodoUpdate,
) -> Result<Todo, AppError> {
    // Ownership check first; the store update itself is id-keyed.
    get_todo(store, owner, id).await?;

    store
        .update(id, changes)
        .await?
        .ok_or_else(|| AppError::not_found("Todo not found"))
}

pub async fn delete_todo(store: &dyn TodoStore, owner: Uuid, id: Uuid) -> Result<(), AppError> {
    get_todo(store, owner, id).await?;

    if store.delete(id).await? {
        Ok(())
    } else {
        Err(AppError::not_found("Todo not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryTodoStore;
    use crate::repos::todos::Priority;

    fn new_todo(owner: Uuid, name: &str) -> NewTodo {
        NewTodo {
            name: name.to_string(),
            priority: Priority::Medium,
            completed: false,
            user_id: owner,
        }
    }

    #[tokio::test]
    async fn test_crud_happy_path() {
        let store = MemoryTodoStore::new();
        let owner = Uuid::new_v4();

        let created = create_todo(&store, owner, new_todo(owner, "Buy milk"))
            .await
            .unwrap();

        let fetched = get_todo(&store, owner, created.id).await.unwrap();
        assert_eq!(fetched, created);

        let updated = update_todo(
            &store,
            owner,
            created.id,
            TodoUpdate {
                name: "Buy oat milk".to_string(),
                priority: Priority::Low,
                completed: Some(true),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Buy oat milk");
        assert!(updated.completed);

        delete_todo(&store, owner, created.id).await.unwrap();
        let err = get_todo(&store, owner, created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_other_users_todos_look_missing() {
        let store = MemoryTodoStore::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let created = create_todo(&store, owner, new_todo(owner, "Private"))
            .await
            .unwrap();

        let err = get_todo(&store, stranger, created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));

        let err = delete_todo(&store, stranger, created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));

        // Still there for the owner
        assert!(get_todo(&store, owner, created.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_scopes_to_owner() {
        let store = MemoryTodoStore::new();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();

        create_todo(&store, owner, new_todo(owner, "mine"))
            .await
            .unwrap();
        create_todo(&store, other, new_todo(other, "theirs"))
            .await
            .unwrap();

        let todos = list_todos(&store, owner, TodoFilter::default())
            .await
            .unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].name, "mine");
    }
}
