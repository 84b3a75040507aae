use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;

use passgate_auth::{
    evaluate, ExpirationPolicy, GuardDecision, Identity, JwtValidator, RedirectTarget,
};

use crate::app::errors::json_error;
use crate::context::{IdentityContext, PasswordExpiry};

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

#[derive(Clone)]
pub struct ExpiryState {
    pub policy: ExpirationPolicy,
}

/// Establish the caller's identity from a `Bearer` token.
///
/// On success the [`IdentityContext`] lands in the request extensions for
/// downstream middleware and handlers.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer(req.headers())?;

    let claims = state.jwt.validate(token, Utc::now()).map_err(|err| {
        tracing::warn!(error = %err, "bearer token rejected");
        json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "invalid bearer token",
        )
    })?;

    req.extensions_mut()
        .insert(IdentityContext::new(claims.to_identity()));

    Ok(next.run(req).await)
}

/// Password-expiration guard, applied per-route on top of `auth_middleware`.
///
/// Anonymous requests pass through untouched (routes that need
/// authentication enforce it separately). Authenticated requests are either
/// redirected to the password-change flow or continue with the remaining
/// seconds attached as [`PasswordExpiry`].
pub async fn password_expiry_middleware(
    State(state): State<ExpiryState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let identity = match req.extensions().get::<IdentityContext>() {
        Some(ctx) => Identity::Authenticated(ctx.identity().clone()),
        None => Identity::Anonymous,
    };

    match evaluate(&identity, Utc::now(), &state.policy) {
        GuardDecision::Deny { redirect } => redirect_response(&redirect),
        GuardDecision::Allow {
            seconds_until_expiration,
        } => {
            if let Some(seconds) = seconds_until_expiration {
                req.extensions_mut().insert(PasswordExpiry::new(seconds));
            }
            next.run(req).await
        }
    }
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, Response> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(unauthorized)?;

    let header = header.to_str().map_err(|_| unauthorized())?;

    let header = header.strip_prefix("Bearer ").ok_or_else(unauthorized)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(unauthorized());
    }

    Ok(token)
}

fn unauthorized() -> Response {
    json_error(
        StatusCode::UNAUTHORIZED,
        "unauthorized",
        "missing or invalid bearer token",
    )
}

/// Map the guard's redirect descriptor onto this application's route table.
fn redirect_response(target: &RedirectTarget) -> Response {
    let path = match (target.controller, target.action) {
        ("Manage", "ChangePassword") => "/manage/change-password",
        _ => {
            tracing::error!(
                controller = target.controller,
                action = target.action,
                "no route for redirect target; falling back to /"
            );
            "/"
        }
    };

    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("reason", target.reason)
        .finish();

    Redirect::to(&format!("{path}?{query}")).into_response()
}
