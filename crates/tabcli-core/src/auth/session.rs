use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Session timeout in minutes.
/// Tableau invalidates tokens after 4 hours; using the same window locally
/// means the cache never claims validity the server would reject.
pub const SESSION_TIMEOUT_MINUTES: i64 = 240;

/// Source of the current time. Injected so tests can simulate elapsed
/// time without real delays.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time, used outside of tests.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The persisted session record. A record is either fully populated or
/// absent; a file missing any of these fields fails deserialization and is
/// treated as absent by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub site_id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

impl SessionData {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.timestamp + Duration::minutes(SESSION_TIMEOUT_MINUTES)
    }

    /// True iff the session has not yet reached its expiry instant.
    /// Exactly at expiry counts as invalid.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at()
    }

    /// Minutes remaining until expiry, floored at zero for display.
    pub fn minutes_remaining_at(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at() - now).num_minutes().max(0)
    }

    /// Derived view for status reporting. Does not gate authentication.
    pub fn info_at(&self, now: DateTime<Utc>) -> SessionInfo {
        SessionInfo {
            site_id: self.site_id.clone(),
            user_id: self.user_id.clone(),
            created: self.timestamp,
            expires: self.expires_at(),
            minutes_remaining: self.minutes_remaining_at(now),
        }
    }
}

/// Session status view: identifiers and timing, never the token itself.
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub site_id: String,
    pub user_id: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
    pub minutes_remaining: i64,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn session_issued_at(timestamp: DateTime<Utc>) -> SessionData {
        SessionData {
            token: "tok".to_string(),
            site_id: "site-1".to_string(),
            user_id: "user-1".to_string(),
            timestamp,
        }
    }

    #[test]
    fn test_valid_within_window() {
        let now = Utc::now();
        let session = session_issued_at(now - Duration::minutes(10));
        assert!(session.is_valid_at(now));
    }

    #[test]
    fn test_invalid_after_window() {
        let now = Utc::now();
        let session = session_issued_at(now - Duration::minutes(300));
        assert!(!session.is_valid_at(now));
    }

    #[test]
    fn test_invalid_at_exact_boundary() {
        let now = Utc::now();
        let session = session_issued_at(now - Duration::minutes(SESSION_TIMEOUT_MINUTES));
        assert!(!session.is_valid_at(now));
        // One second short of the window is still valid
        let session = session_issued_at(
            now - Duration::minutes(SESSION_TIMEOUT_MINUTES) + Duration::seconds(1),
        );
        assert!(session.is_valid_at(now));
    }

    #[test]
    fn test_minutes_remaining_floored_at_zero() {
        let now = Utc::now();
        let expired = session_issued_at(now - Duration::minutes(500));
        assert_eq!(expired.minutes_remaining_at(now), 0);

        let fresh = session_issued_at(now);
        assert_eq!(fresh.minutes_remaining_at(now), SESSION_TIMEOUT_MINUTES);
    }

    #[test]
    fn test_info_view() {
        let now = Utc::now();
        let session = session_issued_at(now - Duration::minutes(40));
        let info = session.info_at(now);
        assert_eq!(info.site_id, "site-1");
        assert_eq!(info.user_id, "user-1");
        assert_eq!(info.created, session.timestamp);
        assert_eq!(info.expires, session.timestamp + Duration::minutes(240));
        assert_eq!(info.minutes_remaining, 200);
    }

    #[test]
    fn test_record_missing_field_fails_to_parse() {
        let json = r#"{"token": "tok", "site_id": "s", "user_id": "u"}"#;
        assert!(serde_json::from_str::<SessionData>(json).is_err());
    }

    #[test]
    fn test_record_unparsable_timestamp_fails_to_parse() {
        let json =
            r#"{"token": "tok", "site_id": "s", "user_id": "u", "timestamp": "yesterday"}"#;
        assert!(serde_json::from_str::<SessionData>(json).is_err());
    }
}
