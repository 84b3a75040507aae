//! Expiration guard: decides, for one request, whether the caller's password
//! has aged past the configured window.

use chrono::{DateTime, Utc};

use crate::identity::{Identity, CLAIM_LAST_PASSWORD_CHANGED};
use crate::policy::ExpirationPolicy;

/// Reason presented to the user when the guard denies access.
pub const PASSWORD_EXPIRED_MESSAGE: &str =
    "Your password has expired. Please change your password.";

/// Where the pipeline should send a denied caller.
///
/// A transport-agnostic descriptor; the host pipeline turns it into an HTTP
/// redirect response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub controller: &'static str,
    pub action: &'static str,
    pub reason: &'static str,
}

impl RedirectTarget {
    pub fn change_password() -> Self {
        Self {
            controller: "Manage",
            action: "ChangePassword",
            reason: PASSWORD_EXPIRED_MESSAGE,
        }
    }
}

/// Outcome of one guard evaluation, consumed immediately by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Serve the request. `seconds_until_expiration` is `None` for anonymous
    /// callers (never subject to the check) and `Some(n)` for authenticated
    /// callers, for display as a warning banner.
    Allow { seconds_until_expiration: Option<i64> },
    /// Do not serve the request; redirect to the password-change flow.
    Deny { redirect: RedirectTarget },
}

/// Decide whether the caller's password has expired.
///
/// Pure function of its inputs: evaluating twice with the same
/// `(identity, now, policy)` yields the same decision. The only side effect
/// is a `warn` log when claim data is missing or malformed.
///
/// A missing or unparseable `LastPasswordChangedDateUtc` claim is absorbed
/// into fail-safe denial: the timestamp falls back to the Unix epoch, the
/// elapsed duration becomes huge, and the expiration branch triggers. No
/// failure here ever propagates to the caller.
pub fn evaluate(
    identity: &Identity,
    now: DateTime<Utc>,
    policy: &ExpirationPolicy,
) -> GuardDecision {
    let authenticated = match identity {
        Identity::Anonymous => {
            return GuardDecision::Allow {
                seconds_until_expiration: None,
            };
        }
        Identity::Authenticated(authenticated) => authenticated,
    };

    let last_changed = match authenticated.claim(CLAIM_LAST_PASSWORD_CHANGED) {
        Some(raw) => raw.parse::<DateTime<Utc>>().unwrap_or_else(|_| {
            tracing::warn!(
                user_id = %authenticated.user_id(),
                claim_type = CLAIM_LAST_PASSWORD_CHANGED,
                value = raw,
                "claim value is not a valid timestamp; treating password as expired"
            );
            DateTime::<Utc>::UNIX_EPOCH
        }),
        None => {
            tracing::warn!(
                user_id = %authenticated.user_id(),
                claim_type = CLAIM_LAST_PASSWORD_CHANGED,
                "claim missing from identity; treating password as expired"
            );
            DateTime::<Utc>::UNIX_EPOCH
        }
    };

    // The window is configured in days but compared against whole elapsed
    // seconds; see `ExpirationPolicy`.
    let elapsed = now - last_changed;
    let remaining = policy.expiration_after_days() - elapsed.num_seconds();

    if remaining <= 0 {
        GuardDecision::Deny {
            redirect: RedirectTarget::change_password(),
        }
    } else {
        GuardDecision::Allow {
            seconds_until_expiration: Some(remaining),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{AuthenticatedIdentity, Claim, UserId};
    use chrono::Duration;
    use proptest::prelude::*;

    fn authenticated_with_claims(claims: Vec<Claim>) -> Identity {
        Identity::Authenticated(AuthenticatedIdentity::new(UserId::new(), claims))
    }

    fn authenticated_changed_at(ts: DateTime<Utc>) -> Identity {
        authenticated_with_claims(vec![Claim::new(
            CLAIM_LAST_PASSWORD_CHANGED,
            ts.to_rfc3339(),
        )])
    }

    fn assert_denied(decision: GuardDecision) {
        match decision {
            GuardDecision::Deny { redirect } => {
                assert_eq!(redirect.controller, "Manage");
                assert_eq!(redirect.action, "ChangePassword");
                assert_eq!(redirect.reason, PASSWORD_EXPIRED_MESSAGE);
            }
            other => panic!("expected Deny, got {other:?}"),
        }
    }

    #[test]
    fn anonymous_caller_passes_through_without_metadata() {
        let now = Utc::now();
        let decision = evaluate(&Identity::Anonymous, now, &ExpirationPolicy::default());

        assert_eq!(
            decision,
            GuardDecision::Allow {
                seconds_until_expiration: None
            }
        );
    }

    #[test]
    fn missing_claim_denies_with_change_password_redirect() {
        let identity = authenticated_with_claims(Vec::new());
        let decision = evaluate(&identity, Utc::now(), &ExpirationPolicy::default());

        assert_denied(decision);
    }

    #[test]
    fn unparseable_claim_denies_like_a_missing_one() {
        let identity =
            authenticated_with_claims(vec![Claim::new(CLAIM_LAST_PASSWORD_CHANGED, "not-a-date")]);
        let decision = evaluate(&identity, Utc::now(), &ExpirationPolicy::default());

        assert_denied(decision);
    }

    #[test]
    fn password_changed_91_seconds_ago_is_expired_under_a_90_day_window() {
        let now = Utc::now();
        let identity = authenticated_changed_at(now - Duration::seconds(91));

        // 90 - 91 = -1 <= 0: the window is compared in seconds.
        assert_denied(evaluate(&identity, now, &ExpirationPolicy::new(90)));
    }

    #[test]
    fn password_changed_10_seconds_ago_leaves_80_seconds() {
        let now = Utc::now();
        let identity = authenticated_changed_at(now - Duration::seconds(10));

        let decision = evaluate(&identity, now, &ExpirationPolicy::new(90));
        assert_eq!(
            decision,
            GuardDecision::Allow {
                seconds_until_expiration: Some(80)
            }
        );
    }

    #[test]
    fn exact_boundary_denies() {
        let now = Utc::now();
        let identity = authenticated_changed_at(now - Duration::seconds(90));

        // remaining == 0 exactly: denial uses <=, not <.
        assert_denied(evaluate(&identity, now, &ExpirationPolicy::new(90)));
    }

    #[test]
    fn future_change_timestamp_extends_the_window() {
        let now = Utc::now();
        let identity = authenticated_changed_at(now + Duration::seconds(60));

        // Negative elapsed time simply enlarges `remaining`; nothing special.
        let decision = evaluate(&identity, now, &ExpirationPolicy::new(90));
        assert_eq!(
            decision,
            GuardDecision::Allow {
                seconds_until_expiration: Some(150)
            }
        );
    }

    #[test]
    fn repeated_evaluation_yields_identical_decisions() {
        let now = Utc::now();
        let policy = ExpirationPolicy::new(90);
        let identity = authenticated_changed_at(now - Duration::seconds(10));

        let first = evaluate(&identity, now, &policy);
        let second = evaluate(&identity, now, &policy);
        assert_eq!(first, second);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: evaluation never panics and is deterministic, whatever
        /// string the claim carries and whatever window is configured.
        #[test]
        fn evaluation_is_total_and_deterministic(
            raw in ".*",
            days in 0i64..10_000i64,
        ) {
            let now = Utc::now();
            let policy = ExpirationPolicy::new(days);
            let identity = authenticated_with_claims(vec![Claim::new(
                CLAIM_LAST_PASSWORD_CHANGED,
                raw,
            )]);

            let first = evaluate(&identity, now, &policy);
            let second = evaluate(&identity, now, &policy);
            prop_assert_eq!(first, second);
        }

        /// Property: an authenticated caller is always either denied or told
        /// how many seconds remain; the no-metadata branch is reserved for
        /// anonymous callers.
        #[test]
        fn authenticated_callers_always_get_a_definite_answer(
            age_seconds in 0i64..1_000_000i64,
        ) {
            let now = Utc::now();
            let identity = authenticated_changed_at(now - Duration::seconds(age_seconds));

            match evaluate(&identity, now, &ExpirationPolicy::new(90)) {
                GuardDecision::Allow { seconds_until_expiration } => {
                    prop_assert!(seconds_until_expiration.is_some());
                }
                GuardDecision::Deny { .. } => {}
            }
        }
    }
}
