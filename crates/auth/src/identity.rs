use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claim type under which the identity subsystem records when a user's
/// password was last changed (string-encoded UTC timestamp, RFC 3339).
pub const CLAIM_LAST_PASSWORD_CHANGED: &str = "LastPasswordChangedDateUtc";

/// Identity of an authenticated user.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<UserId> for Uuid {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// A named string attribute attached to an authenticated identity for the
/// duration of a request.
///
/// Claim types are opaque strings at this layer; what they mean is up to the
/// identity subsystem that issued them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    claim_type: String,
    value: String,
}

impl Claim {
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }

    pub fn claim_type(&self) -> &str {
        &self.claim_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// An authenticated caller: a user id plus the claims issued for it.
///
/// Owned by the request pipeline for the duration of one request; consumers
/// read it, never mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    user_id: UserId,
    claims: Vec<Claim>,
}

impl AuthenticatedIdentity {
    pub fn new(user_id: UserId, claims: Vec<Claim>) -> Self {
        Self { user_id, claims }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// Look up a claim by type.
    ///
    /// Zero matches is not an error (`None`). An identity store may carry
    /// duplicate claims of the same type; the first match wins and the
    /// duplication is logged rather than failing the request.
    pub fn claim(&self, claim_type: &str) -> Option<&str> {
        let mut matches = self.claims.iter().filter(|c| c.claim_type() == claim_type);
        let first = matches.next()?;
        if matches.next().is_some() {
            tracing::warn!(claim_type, "identity carries duplicate claims of the same type; using the first value");
        }
        Some(first.value())
    }
}

/// The caller of the current request, as established by the host pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// No authenticated user on this request.
    Anonymous,
    /// An authenticated user and its claims.
    Authenticated(AuthenticatedIdentity),
}

impl Identity {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated(_))
    }
}
