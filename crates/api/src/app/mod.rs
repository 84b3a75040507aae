//! HTTP application wiring (axum router + per-route guard registration).
//!
//! Route groups opt into checks explicitly at startup:
//! - `routes::public_router`: no check
//! - `routes::authenticated_router`: bearer-token authentication
//! - `routes::fresh_password_router`: authentication + password-expiration
//!   guard

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;

use passgate_auth::{ExpirationPolicy, Hs256JwtValidator, JwtValidator};

use crate::middleware;

pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(jwt_secret: String, policy: ExpirationPolicy) -> Router {
    let jwt: Arc<dyn JwtValidator> = Arc::new(Hs256JwtValidator::new(jwt_secret.into_bytes()));
    let auth_state = middleware::AuthState { jwt };
    let expiry_state = middleware::ExpiryState { policy };

    let authenticated = routes::authenticated_router().layer(
        axum::middleware::from_fn_with_state(auth_state.clone(), middleware::auth_middleware),
    );

    // Outermost layer runs first: authentication, then the expiration guard.
    let fresh_password = routes::fresh_password_router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn_with_state(
                auth_state,
                middleware::auth_middleware,
            ))
            .layer(axum::middleware::from_fn_with_state(
                expiry_state,
                middleware::password_expiry_middleware,
            )),
    );

    routes::public_router()
        .merge(authenticated)
        .merge(fresh_password)
        .fallback(errors::not_found)
}
