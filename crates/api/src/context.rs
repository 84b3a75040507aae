use passgate_auth::AuthenticatedIdentity;

/// Authenticated identity for a request.
///
/// Inserted into the request extensions by the auth middleware; routes
/// behind that middleware can rely on it being present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    identity: AuthenticatedIdentity,
}

impl IdentityContext {
    pub fn new(identity: AuthenticatedIdentity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &AuthenticatedIdentity {
        &self.identity
    }
}

/// Warning metadata attached to a request that passed the expiration guard:
/// how many seconds remain until the caller's password expires.
///
/// Downstream handlers read this to display a banner; it is absent on routes
/// without the guard and for anonymous callers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PasswordExpiry {
    seconds_until_expiration: i64,
}

impl PasswordExpiry {
    pub fn new(seconds_until_expiration: i64) -> Self {
        Self {
            seconds_until_expiration,
        }
    }

    pub fn seconds_until_expiration(&self) -> i64 {
        self.seconds_until_expiration
    }
}
