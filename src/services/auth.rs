//! Demo login service
//!
//! There is no password verification: a login looks up the user by email and
//! creates it on first sight. The returned token is opaque and never checked.

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::user::{User, UserType},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
}

impl AuthService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Look up or lazily create the user for `email` and mint a demo token
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        user_type: Option<UserType>,
    ) -> AppResult<(String, User)> {
        let mut missing = Vec::new();
        if email.trim().is_empty() {
            missing.push("email");
        }
        if password.is_empty() {
            missing.push("password");
        }
        if !missing.is_empty() {
            return Err(AppError::missing_fields(missing));
        }

        let user = match self.repository.users.get_by_email(email).await {
            Some(user) => user,
            None => {
                let user = User::from_email(email, user_type.unwrap_or_default(), Utc::now());
                tracing::info!("Creating user {} ({}) on first login", user.email, user.user_type);
                self.repository.users.insert(user).await?
            }
        };

        Ok((issue_token(), user))
    }
}

fn issue_token() -> String {
    format!("demo-{}", Uuid::new_v4().simple())
}
