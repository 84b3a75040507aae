//! `passgate-auth`: pure password-expiration gate (decision logic only).
//!
//! This crate is intentionally decoupled from HTTP and storage. The host
//! pipeline passes an [`Identity`] and the current instant into
//! [`guard::evaluate`] and applies the returned decision.

pub mod guard;
pub mod identity;
pub mod policy;
pub mod token;

pub use guard::{evaluate, GuardDecision, RedirectTarget, PASSWORD_EXPIRED_MESSAGE};
pub use identity::{
    AuthenticatedIdentity, Claim, Identity, UserId, CLAIM_LAST_PASSWORD_CHANGED,
};
pub use policy::ExpirationPolicy;
pub use token::{
    validate_claims, Hs256JwtValidator, JwtClaims, JwtValidator, TokenError, TokenValidationError,
};
