use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::email::Email;

/// State-change record for the [`User`](super::user::User) aggregate.
///
/// The event log is the unit of persistence: repositories durably append the
/// events a command produced and rebuild the aggregate by folding the stream
/// from an empty state. The enum is closed on purpose - the fold in
/// `User::apply` matches exhaustively, so a new variant that is not folded
/// fails to compile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserEvent {
    Created {
        user_id: Uuid,
        email: Email,
        name: String,
        created_at: DateTime<Utc>,
    },
    CreatedFromGoogle {
        user_id: Uuid,
        email: Email,
        google_id: String,
        name: String,
        picture: Option<String>,
        hosted_domain: Option<String>,
        created_at: DateTime<Utc>,
    },
    PasswordSet {
        password_hash: String,
    },
    ProfileUpdated {
        name: String,
        picture: Option<String>,
    },
    GoogleAccountLinked {
        google_id: String,
    },
    MfaEnabled {
        secret: String,
    },
    MfaDisabled,
    LoginSucceeded {
        at: DateTime<Utc>,
    },
    LoginFailed {
        failed_attempts: u32,
    },
    AccountLocked {
        lockout_end: DateTime<Utc>,
    },
    EmailVerified,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_a_type_tag() {
        let event = UserEvent::MfaEnabled {
            secret: "JBSWY3DPEHPK3PXP".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "mfa_enabled");
        assert_eq!(json["secret"], "JBSWY3DPEHPK3PXP");
    }

    #[test]
    fn events_round_trip_through_json() {
        let event = UserEvent::AccountLocked {
            lockout_end: "2026-01-01T12:00:00Z".parse().unwrap(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: UserEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
