//! Placeholder session handling
//!
//! Not a security boundary. Any syntactically valid email/password pair gets
//! a session; the token is opaque and never verified.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::user::{User, UserType};

use super::error::ClientError;

/// Default session lifetime
pub const SESSION_HOURS: i64 = 4;

pub const CURRENT_USER_KEY: &str = "currentUser";
pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const TOKEN_EXPIRY_KEY: &str = "tokenExpiry";
pub const USER_TYPE_KEY: &str = "userType";

/// Ephemeral per-session key/value storage
#[derive(Debug, Clone, Default)]
pub struct SessionStorage {
    entries: HashMap<String, String>,
}

impl SessionStorage {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    storage: SessionStorage,
    lifetime: Duration,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SESSION_HOURS)
    }
}

impl Session {
    pub fn new(lifetime_hours: i64) -> Self {
        Self {
            storage: SessionStorage::default(),
            lifetime: Duration::hours(lifetime_hours),
        }
    }

    pub fn storage(&self) -> &SessionStorage {
        &self.storage
    }

    /// Both fields must be non-empty
    pub fn check_credentials(email: &str, password: &str) -> Result<(), ClientError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ClientError::MissingCredentials);
        }
        Ok(())
    }

    /// Log in without a server: fabricate the user and mint a local token
    pub fn login_offline(
        &mut self,
        email: &str,
        password: &str,
        user_type: UserType,
        now: DateTime<Utc>,
    ) -> Result<User, ClientError> {
        Self::check_credentials(email, password)?;
        if !email.contains('@') {
            return Err(ClientError::InvalidFormat);
        }

        let user = User::from_email(email, user_type, now);
        let token = format!("offline-{}", Uuid::new_v4().simple());
        self.start(&user, &token, user_type, now)?;
        Ok(user)
    }

    /// Record an established session
    pub fn start(
        &mut self,
        user: &User,
        token: &str,
        user_type: UserType,
        now: DateTime<Utc>,
    ) -> Result<(), ClientError> {
        let serialized =
            serde_json::to_string(user).map_err(|e| ClientError::Storage(e.to_string()))?;
        let expiry = now + self.lifetime;

        self.storage.set(CURRENT_USER_KEY, serialized);
        self.storage.set(AUTH_TOKEN_KEY, token);
        self.storage.set(TOKEN_EXPIRY_KEY, expiry.to_rfc3339());
        self.storage.set(USER_TYPE_KEY, user_type.as_str());
        tracing::info!("Session started for {} until {}", user.email, expiry);
        Ok(())
    }

    /// A user is present and the expiry has not passed. An elapsed session is
    /// logged out as a side effect.
    pub fn is_authenticated(&mut self, now: DateTime<Utc>) -> bool {
        if self.current_user().is_none() {
            return false;
        }
        match self.expiry() {
            Some(expiry) if now < expiry => true,
            _ => {
                tracing::info!("Session expired");
                self.logout();
                false
            }
        }
    }

    /// The authenticated user, if any (expired sessions are cleared)
    pub fn authenticated_user(&mut self, now: DateTime<Utc>) -> Option<User> {
        if self.is_authenticated(now) {
            self.current_user()
        } else {
            None
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.storage
            .get(CURRENT_USER_KEY)
            .and_then(|raw| serde_json::from_str(raw).ok())
    }

    pub fn token(&self) -> Option<&str> {
        self.storage.get(AUTH_TOKEN_KEY)
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.storage.get(USER_TYPE_KEY).and_then(|t| t.parse().ok())
    }

    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        self.storage
            .get(TOKEN_EXPIRY_KEY)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|expiry| expiry.with_timezone(&Utc))
    }

    /// Clear every session key
    pub fn logout(&mut self) {
        self.storage.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_missing_credentials() {
        let mut session = Session::default();
        assert_eq!(
            session.login_offline("", "secret", UserType::Customer, now()),
            Err(ClientError::MissingCredentials)
        );
        assert_eq!(
            session.login_offline("a@b.c", "", UserType::Customer, now()),
            Err(ClientError::MissingCredentials)
        );
    }

    #[test]
    fn test_offline_login_requires_at_sign() {
        let mut session = Session::default();
        assert_eq!(
            session.login_offline("not-an-email", "pw", UserType::Customer, now()),
            Err(ClientError::InvalidFormat)
        );
        assert!(session.storage().is_empty());
    }

    #[test]
    fn test_offline_login_records_session() {
        let mut session = Session::default();
        let user = session
            .login_offline("reader@example.com", "pw", UserType::Admin, now())
            .unwrap();

        assert_eq!(user.id, now().timestamp_millis());
        assert_eq!(user.name, "reader");
        assert_eq!(session.current_user(), Some(user));
        assert!(session.token().is_some());
        assert_eq!(session.user_type(), Some(UserType::Admin));
        assert_eq!(session.expiry(), Some(now() + Duration::hours(4)));
        assert!(session.is_authenticated(now() + Duration::hours(3)));
    }

    #[test]
    fn test_expired_session_logs_out() {
        let mut session = Session::default();
        session
            .login_offline("reader@example.com", "pw", UserType::Customer, now())
            .unwrap();

        assert!(!session.is_authenticated(now() + Duration::hours(4)));
        assert!(session.storage().is_empty());
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_logout_clears_all_keys() {
        let mut session = Session::default();
        session
            .login_offline("reader@example.com", "pw", UserType::Customer, now())
            .unwrap();
        session.logout();
        assert!(session.storage().is_empty());
        assert!(!session.is_authenticated(now()));
    }
}
