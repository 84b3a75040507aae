/// Password expiration policy.
///
/// A single process-wide value: fixed at startup, immutable thereafter.
/// There is no per-user override.
///
/// The window is configured in days; [`crate::guard::evaluate`] compares it
/// against whole elapsed *seconds* since the last password change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationPolicy {
    expiration_after_days: i64,
}

impl ExpirationPolicy {
    pub const DEFAULT_EXPIRATION_AFTER_DAYS: i64 = 90;

    pub fn new(expiration_after_days: i64) -> Self {
        Self {
            expiration_after_days,
        }
    }

    pub fn expiration_after_days(&self) -> i64 {
        self.expiration_after_days
    }
}

impl Default for ExpirationPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EXPIRATION_AFTER_DAYS)
    }
}
