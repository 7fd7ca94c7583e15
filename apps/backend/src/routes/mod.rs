use actix_web::web;

pub mod auth;
pub mod todos;

/// Configure application routes, shared by main and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Auth routes: /auth/** (exempt from the identity requirement)
    cfg.service(web::scope("/auth").configure(auth::configure_routes));

    // Todo routes: /todos/** (every handler requires identity)
    cfg.service(web::scope("/todos").configure(todos::configure_routes));
}
