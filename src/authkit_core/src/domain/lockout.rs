use chrono::{DateTime, Duration, Utc};

pub const MAX_FAILED_LOGIN_ATTEMPTS: u32 = 5;
pub const LOCKOUT_DURATION_MINUTES: i64 = 30;

/// Brute-force lockout policy: pure decision logic, consumed by the
/// aggregate's `record_login_attempt` command.
#[derive(Debug, Clone, PartialEq)]
pub struct LockoutPolicy {
    pub max_failed_attempts: u32,
    pub lockout_duration: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_failed_attempts: MAX_FAILED_LOGIN_ATTEMPTS,
            lockout_duration: Duration::minutes(LOCKOUT_DURATION_MINUTES),
        }
    }
}

impl LockoutPolicy {
    pub fn new(max_failed_attempts: u32, lockout_duration: Duration) -> Self {
        Self {
            max_failed_attempts,
            lockout_duration,
        }
    }

    /// `>=` rather than `==`: once the counter is past the threshold, every
    /// further failure re-arms the lock, including failures after a previous
    /// lockout expired without a successful login in between.
    pub fn should_lock(&self, failed_attempts: u32) -> bool {
        failed_attempts >= self.max_failed_attempts
    }

    pub fn lockout_end(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + self.lockout_duration
    }
}
