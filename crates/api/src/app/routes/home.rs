use axum::{extract::Extension, response::IntoResponse, Json};

use crate::context::{IdentityContext, PasswordExpiry};

/// Landing page; open to anonymous callers.
pub async fn index() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Home page.",
    }))
}

/// Description page; requires an authenticated caller with a fresh password.
///
/// When the expiration guard lets a request through it attaches the
/// remaining seconds, surfaced here for a warning banner.
pub async fn about(
    Extension(identity): Extension<IdentityContext>,
    expiry: Option<Extension<PasswordExpiry>>,
) -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Your application description page.",
        "user_id": identity.identity().user_id().to_string(),
        "password_expires_in_seconds": expiry.map(|Extension(e)| e.seconds_until_expiration()),
    }))
}

/// Contact page; requires authentication but no password-freshness check.
pub async fn contact(Extension(identity): Extension<IdentityContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Your contact page.",
        "user_id": identity.identity().user_id().to_string(),
    }))
}
