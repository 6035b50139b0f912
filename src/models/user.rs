//! User model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User account types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Customer,
    Admin,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Customer => "customer",
            UserType::Admin => "admin",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Ok(UserType::Customer),
            "admin" => Ok(UserType::Admin),
            _ => Err(format!("Invalid user type: {}", s)),
        }
    }
}

/// User record. Created on first login with a given email, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Fabricate a user for `email`: time-based id, name from the local part
    pub fn from_email(email: &str, user_type: UserType, now: DateTime<Utc>) -> Self {
        Self {
            id: now.timestamp_millis(),
            email: email.trim().to_string(),
            name: display_name(email),
            user_type,
            created_at: now,
        }
    }
}

/// Display name derived from the local part of an email address
pub fn display_name(email: &str) -> String {
    email.trim().split('@').next().unwrap_or_default().to_string()
}

/// User summary returned on login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            user_type: user.user_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_from_local_part() {
        assert_eq!(display_name("ada.lovelace@example.com"), "ada.lovelace");
        assert_eq!(display_name("nobody"), "nobody");
    }

    #[test]
    fn test_user_type_parsing() {
        assert_eq!("Admin".parse::<UserType>(), Ok(UserType::Admin));
        assert!("librarian".parse::<UserType>().is_err());
        assert_eq!(UserType::default(), UserType::Customer);
    }

    #[test]
    fn test_user_serializes_type_field() {
        let user = User::from_email("sam@example.com", UserType::Admin, Utc::now());
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["type"], "admin");
        assert_eq!(json["name"], "sam");
        assert!(json["createdAt"].is_string());
    }
}
