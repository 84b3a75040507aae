use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::context::IdentityContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(identity): Extension<IdentityContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "user_id": identity.identity().user_id().to_string(),
    }))
}
