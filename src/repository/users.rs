//! Users repository

use crate::{error::AppResult, models::user::User};

use super::{persisted, Collection, JsonStore};

#[derive(Clone)]
pub struct UsersRepository {
    store: JsonStore,
}

impl UsersRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<User> {
        self.store.read(Collection::Users).await
    }

    pub async fn count(&self) -> usize {
        self.list().await.len()
    }

    /// Get user by email (case-insensitive)
    pub async fn get_by_email(&self, email: &str) -> Option<User> {
        let email = email.trim();
        self.list()
            .await
            .into_iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
    }

    pub async fn insert(&self, user: User) -> AppResult<User> {
        let mut users = self.list().await;
        users.push(user.clone());
        persisted(self.store.write(Collection::Users, &users).await, Collection::Users)?;
        Ok(user)
    }
}
