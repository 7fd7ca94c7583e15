// Integration tests for the todo CRUD surface.
//
// All routes are owner-scoped: ids never resolve across users.

use actix_web::http::header;
use actix_web::{test, web, App};
use backend::middleware::auth_context::AuthContext;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::routes;
use serde_json::json;

mod support;

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .wrap(AuthContext)
                .wrap(RequestTrace)
                .app_data(web::Data::new($state))
                .configure(routes::configure),
        )
        .await
    };
}

macro_rules! signup_token {
    ($app:expr, $email:expr) => {{
        let req = test::TestRequest::post()
            .uri("/auth/signup")
            .set_json(json!({
                "name": "Test User",
                "email": $email,
                "password": "Str0ng!pwd"
            }))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(resp.status().as_u16(), 201);
        let body: serde_json::Value = test::read_body_json(resp).await;
        body["token"].as_str().unwrap().to_string()
    }};
}

fn auth(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

#[actix_web::test]
async fn test_todo_crud_happy_path() {
    let state = support::memory_state(support::test_security()).await;
    let app = init_app!(state);
    let token = signup_token!(&app, "a@x.com");

    // Create
    let req = test::TestRequest::post()
        .uri("/todos")
        .insert_header(auth(&token))
        .set_json(json!({
            "name": "Write report",
            "priority": "high"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);

    let created: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(created["name"], "Write report");
    assert_eq!(created["priority"], "high");
    assert_eq!(created["completed"], false);
    let id = created["id"].as_str().unwrap().to_string();

    // Get by id
    let req = test::TestRequest::get()
        .uri(&format!("/todos/{id}"))
        .insert_header(auth(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    // List
    let req = test::TestRequest::get()
        .uri("/todos")
        .insert_header(auth(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let todos: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(todos.as_array().unwrap().len(), 1);

    // Update
    let req = test::TestRequest::put()
        .uri(&format!("/todos/{id}"))
        .insert_header(auth(&token))
        .set_json(json!({
            "name": "Write report",
            "priority": "medium",
            "completed": true
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let updated: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(updated["priority"], "medium");
    assert_eq!(updated["completed"], true);

    // Delete
    let req = test::TestRequest::delete()
        .uri(&format!("/todos/{id}"))
        .insert_header(auth(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 204);

    // Gone
    let req = test::TestRequest::get()
        .uri(&format!("/todos/{id}"))
        .insert_header(auth(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Todo not found");
}

#[actix_web::test]
async fn test_todos_are_owner_scoped() {
    let state = support::memory_state(support::test_security()).await;
    let app = init_app!(state);
    let token_a = signup_token!(&app, "a@x.com");
    let token_b = signup_token!(&app, "b@x.com");

    let req = test::TestRequest::post()
        .uri("/todos")
        .insert_header(auth(&token_a))
        .set_json(json!({
            "name": "Private",
            "priority": "low"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let created: serde_json::Value = test::read_body_json(resp).await;
    let id = created["id"].as_str().unwrap().to_string();

    // Another user's todo looks missing, not forbidden
    let req = test::TestRequest::get()
        .uri(&format!("/todos/{id}"))
        .insert_header(auth(&token_b))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);

    let req = test::TestRequest::delete()
        .uri(&format!("/todos/{id}"))
        .insert_header(auth(&token_b))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);

    // B's listing does not include A's todo
    let req = test::TestRequest::get()
        .uri("/todos")
        .insert_header(auth(&token_b))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let todos: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(todos.as_array().unwrap().len(), 0);

    // Still there for A
    let req = test::TestRequest::get()
        .uri(&format!("/todos/{id}"))
        .insert_header(auth(&token_a))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
}

#[actix_web::test]
async fn test_todo_list_filters() {
    let state = support::memory_state(support::test_security()).await;
    let app = init_app!(state);
    let token = signup_token!(&app, "a@x.com");

    for (name, priority, completed) in [
        ("a", "low", false),
        ("b", "high", true),
        ("c", "high", false),
    ] {
        let req = test::TestRequest::post()
            .uri("/todos")
            .insert_header(auth(&token))
            .set_json(json!({
                "name": name,
                "priority": priority,
                "completed": completed
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 201);
    }

    let req = test::TestRequest::get()
        .uri("/todos?priority=high")
        .insert_header(auth(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let todos: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(todos.as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri("/todos?priority=high&completed=false")
        .insert_header(auth(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let todos: serde_json::Value = test::read_body_json(resp).await;
    let todos = todos.as_array().unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["name"], "c");
}

#[actix_web::test]
async fn test_todo_validation_errors() {
    let state = support::memory_state(support::test_security()).await;
    let app = init_app!(state);
    let token = signup_token!(&app, "a@x.com");

    let req = test::TestRequest::post()
        .uri("/todos")
        .insert_header(auth(&token))
        .set_json(json!({
            "name": "",
            "priority": "urgent"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"]["name"], "Name is required");
    assert_eq!(
        body["errors"]["priority"],
        "Priority must be one of: low, medium, high"
    );
}

#[actix_web::test]
async fn test_todo_invalid_id_is_bad_request() {
    let state = support::memory_state(support::test_security()).await;
    let app = init_app!(state);
    let token = signup_token!(&app, "a@x.com");

    let req = test::TestRequest::get()
        .uri("/todos/42")
        .insert_header(auth(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid todo id");
}
