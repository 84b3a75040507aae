use axum::{extract::Query, response::IntoResponse, Json};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChangePasswordQuery {
    pub reason: Option<String>,
}

/// Password-change prompt; target of the expiration guard's redirect.
///
/// The rotation itself belongs to the identity subsystem; this page only
/// presents the prompt and the reason the caller was sent here.
pub async fn change_password(Query(query): Query<ChangePasswordQuery>) -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Change your password.",
        "reason": query.reason,
    }))
}
