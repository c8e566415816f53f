use std::collections::HashSet;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::email::Email;
use super::events::UserEvent;
use super::google::GoogleUserInfo;
use super::lockout::LockoutPolicy;
use super::role::Role;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("MFA is already enabled")]
    MfaAlreadyEnabled,
    #[error("MFA is not enabled")]
    MfaNotEnabled,
    #[error("Email is already verified")]
    EmailAlreadyVerified,
    #[error("A Google account is already linked")]
    GoogleAccountAlreadyLinked,
    #[error("Event stream is empty")]
    EmptyEventStream,
    #[error("Event stream does not start with a creation event")]
    MissingCreationEvent,
}

/// Event-sourced authentication aggregate.
///
/// All mutation flows through commands, each of which validates its
/// preconditions, appends one or more [`UserEvent`]s to the pending log and
/// folds them into in-memory state through the single `apply` function.
/// Repositories persist the drained pending events and rebuild the aggregate
/// with [`User::from_events`].
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: Uuid,
    email: Email,
    name: String,
    picture: Option<String>,
    password_hash: Option<String>,
    google_id: Option<String>,
    hosted_domain: Option<String>,
    is_workspace_user: bool,
    is_mfa_enabled: bool,
    mfa_secret: Option<String>,
    failed_login_attempts: u32,
    lockout_end: Option<DateTime<Utc>>,
    roles: HashSet<Role>,
    is_email_verified: bool,
    created_at: DateTime<Utc>,
    last_login_at: Option<DateTime<Utc>>,
    persisted_version: u64,
    pending_events: Vec<UserEvent>,
}

impl User {
    /// Create a local-credentials account. Emits a creation event followed by
    /// a password-set event; the initial role set is `{Role::User}`.
    pub fn create_local(
        email: Email,
        name: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, UserError> {
        if name.trim().is_empty() {
            return Err(UserError::Empty("Name"));
        }
        if password_hash.is_empty() {
            return Err(UserError::Empty("Password hash"));
        }

        let id = Uuid::new_v4();
        let mut user = Self::shell(id, email.clone());
        user.raise(UserEvent::Created {
            user_id: id,
            email,
            name: name.to_string(),
            created_at: now,
        });
        user.raise(UserEvent::PasswordSet {
            password_hash: password_hash.to_string(),
        });
        Ok(user)
    }

    /// Create an account from verified Google claims. The email arrives
    /// verified by Google, so the account starts with `is_email_verified`
    /// and `is_workspace_user` set.
    pub fn create_from_google(info: GoogleUserInfo, now: DateTime<Utc>) -> Result<Self, UserError> {
        if info.subject.trim().is_empty() {
            return Err(UserError::Empty("Google subject"));
        }
        if info.name.trim().is_empty() {
            return Err(UserError::Empty("Name"));
        }

        let id = Uuid::new_v4();
        let mut user = Self::shell(id, info.email.clone());
        user.raise(UserEvent::CreatedFromGoogle {
            user_id: id,
            email: info.email,
            google_id: info.subject,
            name: info.name,
            picture: info.picture,
            hosted_domain: info.hosted_domain,
            created_at: now,
        });
        Ok(user)
    }

    /// Rebuild the aggregate by folding a persisted event stream.
    ///
    /// Folding is deterministic: replaying the same stream from an empty
    /// state always yields the same aggregate.
    pub fn from_events(events: Vec<UserEvent>) -> Result<Self, UserError> {
        let (id, email) = match events.first() {
            None => return Err(UserError::EmptyEventStream),
            Some(
                UserEvent::Created { user_id, email, .. }
                | UserEvent::CreatedFromGoogle { user_id, email, .. },
            ) => (*user_id, email.clone()),
            Some(_) => return Err(UserError::MissingCreationEvent),
        };

        let mut user = Self::shell(id, email);
        for event in &events {
            user.apply(event);
        }
        user.persisted_version = events.len() as u64;
        Ok(user)
    }

    pub fn enable_mfa(&mut self, secret: &str) -> Result<(), UserError> {
        if self.is_mfa_enabled {
            return Err(UserError::MfaAlreadyEnabled);
        }
        if secret.trim().is_empty() {
            return Err(UserError::Empty("MFA secret"));
        }
        self.raise(UserEvent::MfaEnabled {
            secret: secret.to_string(),
        });
        Ok(())
    }

    pub fn disable_mfa(&mut self) -> Result<(), UserError> {
        if !self.is_mfa_enabled {
            return Err(UserError::MfaNotEnabled);
        }
        self.raise(UserEvent::MfaDisabled);
        Ok(())
    }

    pub fn update_profile(&mut self, name: &str, picture: Option<String>) -> Result<(), UserError> {
        if name.trim().is_empty() {
            return Err(UserError::Empty("Name"));
        }
        self.raise(UserEvent::ProfileUpdated {
            name: name.to_string(),
            picture,
        });
        Ok(())
    }

    /// Attach a Google subject to an existing account. Linking is always
    /// explicit; no login flow calls this on its own.
    pub fn link_google_account(&mut self, google_id: &str) -> Result<(), UserError> {
        if self.google_id.is_some() {
            return Err(UserError::GoogleAccountAlreadyLinked);
        }
        if google_id.trim().is_empty() {
            return Err(UserError::Empty("Google subject"));
        }
        self.raise(UserEvent::GoogleAccountLinked {
            google_id: google_id.to_string(),
        });
        Ok(())
    }

    /// Replace the stored credential hash. Also serves as the first hash for
    /// an account that never had local credentials (password reset via a
    /// verified side channel).
    pub fn change_password(&mut self, password_hash: &str) -> Result<(), UserError> {
        if password_hash.is_empty() {
            return Err(UserError::Empty("Password hash"));
        }
        self.raise(UserEvent::PasswordSet {
            password_hash: password_hash.to_string(),
        });
        Ok(())
    }

    pub fn verify_email(&mut self) -> Result<(), UserError> {
        if self.is_email_verified {
            return Err(UserError::EmailAlreadyVerified);
        }
        self.raise(UserEvent::EmailVerified);
        Ok(())
    }

    /// Record the outcome of an authentication attempt.
    ///
    /// A success resets the failure counter and clears any lockout. A failure
    /// increments the counter; when the post-increment count satisfies the
    /// policy, an account-locked event follows in the same invocation.
    pub fn record_login_attempt(
        &mut self,
        successful: bool,
        policy: &LockoutPolicy,
        now: DateTime<Utc>,
    ) {
        if successful {
            self.raise(UserEvent::LoginSucceeded { at: now });
            return;
        }

        let failed_attempts = self.failed_login_attempts + 1;
        self.raise(UserEvent::LoginFailed { failed_attempts });
        if policy.should_lock(failed_attempts) {
            self.raise(UserEvent::AccountLocked {
                lockout_end: policy.lockout_end(now),
            });
        }
    }

    /// Derived lockout state: the stored timestamp never auto-expires, so
    /// admission decisions compare it against the caller's clock.
    pub fn is_locked_out(&self, now: DateTime<Utc>) -> bool {
        self.lockout_end.is_some_and(|end| end > now)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn picture(&self) -> Option<&str> {
        self.picture.as_deref()
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    pub fn google_id(&self) -> Option<&str> {
        self.google_id.as_deref()
    }

    pub fn hosted_domain(&self) -> Option<&str> {
        self.hosted_domain.as_deref()
    }

    pub fn is_workspace_user(&self) -> bool {
        self.is_workspace_user
    }

    pub fn is_mfa_enabled(&self) -> bool {
        self.is_mfa_enabled
    }

    pub fn mfa_secret(&self) -> Option<&str> {
        self.mfa_secret.as_deref()
    }

    pub fn failed_login_attempts(&self) -> u32 {
        self.failed_login_attempts
    }

    pub fn lockout_end(&self) -> Option<DateTime<Utc>> {
        self.lockout_end
    }

    pub fn roles(&self) -> &HashSet<Role> {
        &self.roles
    }

    pub fn is_email_verified(&self) -> bool {
        self.is_email_verified
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    /// Number of events already persisted for this aggregate. Repositories
    /// compare this against the stored stream length before appending, so two
    /// racing load-mutate-persist cycles cannot both win.
    pub fn persisted_version(&self) -> u64 {
        self.persisted_version
    }

    pub fn pending_events(&self) -> &[UserEvent] {
        &self.pending_events
    }

    /// Drain the pending events for persistence, advancing the persisted
    /// version accordingly. Called by repository implementations only.
    pub fn take_pending_events(&mut self) -> Vec<UserEvent> {
        let events = std::mem::take(&mut self.pending_events);
        self.persisted_version += events.len() as u64;
        events
    }

    fn shell(id: Uuid, email: Email) -> Self {
        Self {
            id,
            email,
            name: String::new(),
            picture: None,
            password_hash: None,
            google_id: None,
            hosted_domain: None,
            is_workspace_user: false,
            is_mfa_enabled: false,
            mfa_secret: None,
            failed_login_attempts: 0,
            lockout_end: None,
            roles: HashSet::new(),
            is_email_verified: false,
            created_at: DateTime::UNIX_EPOCH,
            last_login_at: None,
            persisted_version: 0,
            pending_events: Vec::new(),
        }
    }

    fn raise(&mut self, event: UserEvent) {
        self.apply(&event);
        self.pending_events.push(event);
    }

    /// The single fold. Exhaustive on purpose: adding a variant to
    /// [`UserEvent`] without handling it here is a compile error.
    fn apply(&mut self, event: &UserEvent) {
        match event {
            UserEvent::Created {
                user_id,
                email,
                name,
                created_at,
            } => {
                self.id = *user_id;
                self.email = email.clone();
                self.name = name.clone();
                self.created_at = *created_at;
                self.roles.insert(Role::User);
            }
            UserEvent::CreatedFromGoogle {
                user_id,
                email,
                google_id,
                name,
                picture,
                hosted_domain,
                created_at,
            } => {
                self.id = *user_id;
                self.email = email.clone();
                self.google_id = Some(google_id.clone());
                self.name = name.clone();
                self.picture = picture.clone();
                self.hosted_domain = hosted_domain.clone();
                self.created_at = *created_at;
                self.is_email_verified = true;
                self.is_workspace_user = true;
                self.roles.insert(Role::User);
            }
            UserEvent::PasswordSet { password_hash } => {
                self.password_hash = Some(password_hash.clone());
            }
            UserEvent::ProfileUpdated { name, picture } => {
                self.name = name.clone();
                if picture.is_some() {
                    self.picture = picture.clone();
                }
            }
            UserEvent::GoogleAccountLinked { google_id } => {
                self.google_id = Some(google_id.clone());
            }
            UserEvent::MfaEnabled { secret } => {
                self.is_mfa_enabled = true;
                self.mfa_secret = Some(secret.clone());
            }
            UserEvent::MfaDisabled => {
                self.is_mfa_enabled = false;
                self.mfa_secret = None;
            }
            UserEvent::LoginSucceeded { at } => {
                self.last_login_at = Some(*at);
                self.failed_login_attempts = 0;
                self.lockout_end = None;
            }
            UserEvent::LoginFailed { failed_attempts } => {
                self.failed_login_attempts = *failed_attempts;
            }
            UserEvent::AccountLocked { lockout_end } => {
                self.lockout_end = Some(*lockout_end);
            }
            UserEvent::EmailVerified => {
                self.is_email_verified = true;
            }
        }
    }
}
