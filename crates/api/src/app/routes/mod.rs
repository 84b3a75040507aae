use axum::{routing::get, Router};

pub mod home;
pub mod manage;
pub mod system;

/// Router for endpoints open to anonymous callers.
pub fn public_router() -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(system::health))
}

/// Router for endpoints that require an authenticated caller.
pub fn authenticated_router() -> Router {
    Router::new()
        .route("/contact", get(home::contact))
        .route("/whoami", get(system::whoami))
        .route("/manage/change-password", get(manage::change_password))
}

/// Router for endpoints that additionally require a fresh password.
pub fn fresh_password_router() -> Router {
    Router::new().route("/about", get(home::about))
}
