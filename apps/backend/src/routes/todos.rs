use std::collections::BTreeMap;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::extractors::validated_json::ValidatedJson;
use crate::repos::todos::{NewTodo, Priority, Todo, TodoFilter, TodoUpdate};
use crate::services::todos as todo_service;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct TodoRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub priority: String,
    pub completed: Option<bool>,
}

impl TodoRequest {
    fn validate(&self) -> Result<Priority, AppError> {
        let mut errors = BTreeMap::new();

        if self.name.trim().is_empty() {
            errors.insert("name".to_string(), "Name is required".to_string());
        }

        let priority = if self.priority.trim().is_empty() {
            errors.insert("priority".to_string(), "Priority is required".to_string());
            None
        } else {
            match self.priority.parse::<Priority>() {
                Ok(priority) => Some(priority),
                Err(()) => {
                    errors.insert(
                        "priority".to_string(),
                        "Priority must be one of: low, medium, high".to_string(),
                    );
                    None
                }
            }
        };

        match (priority, errors.is_empty()) {
            (Some(priority), true) => Ok(priority),
            _ => Err(AppError::validation(errors)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TodoListQuery {
    pub completed: Option<bool>,
    pub priority: Option<String>,
}

impl TodoListQuery {
    fn filter(&self) -> Result<TodoFilter, AppError> {
        let priority = match self.priority.as_deref() {
            None => None,
            Some(raw) => Some(raw.parse::<Priority>().map_err(|()| {
                let mut errors = BTreeMap::new();
                errors.insert(
                    "priority".to_string(),
                    "Priority must be one of: low, medium, high".to_string(),
                );
                AppError::validation(errors)
            })?),
        };

        Ok(TodoFilter {
            completed: self.completed,
            priority,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: Uuid,
    pub name: String,
    pub priority: Priority,
    pub completed: bool,
    pub user_id: Uuid,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            name: todo.name,
            priority: todo.priority,
            completed: todo.completed,
            user_id: todo.user_id,
            created_at: todo
                .created_at
                .format(&Rfc3339)
                .unwrap_or_else(|_| "unknown".to_string()),
            updated_at: todo
                .updated_at
                .format(&Rfc3339)
                .unwrap_or_else(|_| "unknown".to_string()),
        }
    }
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::bad_request("Invalid todo id"))
}

async fn create(
    user: CurrentUser,
    req: ValidatedJson<TodoRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let priority = req.validate()?;

    let todo = todo_service::create_todo(
        app_state.todos(),
        user.user_id,
        NewTodo {
            name: req.name.trim().to_string(),
            priority,
            completed: req.completed.unwrap_or(false),
            user_id: user.user_id,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(TodoResponse::from(todo)))
}

async fn list(
    user: CurrentUser,
    query: web::Query<TodoListQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let filter = query.filter()?;

    let todos = todo_service::list_todos(app_state.todos(), user.user_id, filter).await?;
    let todos: Vec<TodoResponse> = todos.into_iter().map(TodoResponse::from).collect();

    Ok(HttpResponse::Ok().json(todos))
}

async fn get_by_id(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;

    let todo = todo_service::get_todo(app_state.todos(), user.user_id, id).await?;
    Ok(HttpResponse::Ok().json(TodoResponse::from(todo)))
}

async fn update(
    user: CurrentUser,
    path: web::Path<String>,
    req: ValidatedJson<TodoRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;
    let priority = req.validate()?;

    let todo = todo_service::update_todo(
        app_state.todos(),
        user.user_id,
        id,
        TodoUpdate {
            name: req.name.trim().to_string(),
            priority,
            completed: req.completed,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(TodoResponse::from(todo)))
}

async fn delete(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;

    todo_service::delete_todo(app_state.todos(), user.user_id, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create))
            .route(web::get().to(list)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_by_id))
            .route(web::put().to(update))
            .route(web::delete().to(delete)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_request_validation() {
        let req = TodoRequest {
            name: "Buy milk".to_string(),
            priority: "high".to_string(),
            completed: None,
        };
        assert_eq!(req.validate().unwrap(), Priority::High);
    }

    #[test]
    fn test_todo_request_rejects_unknown_priority() {
        let req = TodoRequest {
            name: "Buy milk".to_string(),
            priority: "urgent".to_string(),
            completed: None,
        };
        match req.validate().unwrap_err() {
            AppError::Validation { errors } => {
                assert!(errors.get("priority").unwrap().contains("low, medium, high"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_todo_request_collects_all_errors() {
        let req = TodoRequest {
            name: "  ".to_string(),
            priority: String::new(),
            completed: None,
        };
        match req.validate().unwrap_err() {
            AppError::Validation { errors } => {
                assert_eq!(errors.len(), 2);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_list_query_filter() {
        let query = TodoListQuery {
            completed: Some(true),
            priority: Some("low".to_string()),
        };
        let filter = query.filter().unwrap();
        assert_eq!(filter.completed, Some(true));
        assert_eq!(filter.priority, Some(Priority::Low));

        let bad = TodoListQuery {
            completed: None,
            priority: Some("urgent".to_string()),
        };
        assert!(bad.filter().is_err());
    }

    #[test]
    fn test_parse_id() {
        assert!(parse_id("b1f7c6a0-9a43-4c38-9d58-0d8ab7dbf2a4").is_ok());
        assert!(parse_id("42").is_err());
    }
}
