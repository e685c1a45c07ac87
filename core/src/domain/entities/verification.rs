//! Email verification token issuance and lifecycle rules.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Number of random bytes in a verification token (hex-encoded to 64 chars)
pub const VERIFICATION_TOKEN_BYTES: usize = 32;

/// Lifetime of a verification token in minutes
///
/// Fixed at issuance; the window never slides.
pub const VERIFICATION_TOKEN_TTL_MINUTES: i64 = 10;

/// Minimum seconds between two token issuances for the same account
pub const RESEND_COOLDOWN_SECONDS: i64 = 120;

/// A freshly issued email verification token
///
/// The token value is stored on the user row and compared by equality at
/// verification time. Issuing a new token replaces the previous one, so an
/// account never has more than one live token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationToken {
    /// Random hex token embedded in the verification link
    pub token: String,

    /// Issuance timestamp; drives the resend cooldown
    pub issued_at: DateTime<Utc>,

    /// Expiry timestamp, always issuance + 10 minutes
    pub expires_at: DateTime<Utc>,
}

impl VerificationToken {
    /// Issues a new token valid from now
    pub fn issue() -> Self {
        Self::issue_at(Utc::now())
    }

    /// Issues a new token with an explicit issuance instant
    pub fn issue_at(now: DateTime<Utc>) -> Self {
        Self {
            token: Self::generate_token(),
            issued_at: now,
            expires_at: now + Duration::minutes(VERIFICATION_TOKEN_TTL_MINUTES),
        }
    }

    /// Generates a cryptographically secure random token
    fn generate_token() -> String {
        let mut bytes = [0u8; VERIFICATION_TOKEN_BYTES];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Checks whether the token has expired at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Seconds a caller must still wait before another token may be issued
///
/// Returns `None` when no token was ever issued or the cooldown has lapsed;
/// otherwise the remaining whole seconds, always within `1..=120`.
pub fn cooldown_remaining(
    last_issued_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<i64> {
    let issued_at = last_issued_at?;
    let elapsed = (now - issued_at).num_seconds();
    let remaining = RESEND_COOLDOWN_SECONDS - elapsed;
    if remaining > 0 {
        Some(remaining.min(RESEND_COOLDOWN_SECONDS))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_issued_token_shape() {
        let token = VerificationToken::issue();

        assert_eq!(token.token.len(), VERIFICATION_TOKEN_BYTES * 2);
        assert!(token.token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_expiry_is_exactly_ten_minutes_after_issuance() {
        let now = Utc::now();
        let token = VerificationToken::issue_at(now);

        assert_eq!(token.issued_at, now);
        assert_eq!(
            token.expires_at,
            now + Duration::minutes(VERIFICATION_TOKEN_TTL_MINUTES)
        );
    }

    #[test]
    fn test_token_uniqueness() {
        let tokens: HashSet<String> = (0..50)
            .map(|_| VerificationToken::issue().token)
            .collect();
        assert_eq!(tokens.len(), 50);
    }

    #[test]
    fn test_is_expired() {
        let now = Utc::now();
        let token = VerificationToken::issue_at(now);

        assert!(!token.is_expired(now));
        assert!(!token.is_expired(now + Duration::minutes(9)));
        assert!(token.is_expired(now + Duration::minutes(10)));
        assert!(token.is_expired(now + Duration::minutes(11)));
    }

    #[test]
    fn test_cooldown_remaining_none_without_prior_issue() {
        assert_eq!(cooldown_remaining(None, Utc::now()), None);
    }

    #[test]
    fn test_cooldown_remaining_counts_down() {
        let now = Utc::now();

        let just_issued = cooldown_remaining(Some(now), now);
        assert_eq!(just_issued, Some(RESEND_COOLDOWN_SECONDS));

        let half_way = cooldown_remaining(Some(now - Duration::seconds(60)), now);
        assert_eq!(half_way, Some(60));

        let nearly_done = cooldown_remaining(Some(now - Duration::seconds(119)), now);
        assert_eq!(nearly_done, Some(1));
    }

    #[test]
    fn test_cooldown_lapses_at_window_edge() {
        let now = Utc::now();

        assert_eq!(
            cooldown_remaining(Some(now - Duration::seconds(RESEND_COOLDOWN_SECONDS)), now),
            None
        );
        assert_eq!(
            cooldown_remaining(Some(now - Duration::seconds(500)), now),
            None
        );
    }
}
