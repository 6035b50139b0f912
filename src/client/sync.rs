//! HTTP adapter to the server mirror
//!
//! Pushes are fire-and-forget: a failed push is logged and dropped. The
//! client's in-memory state stays authoritative, so the mirror is eventual
//! and lossy.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::{
    api::auth::LoginResponse,
    models::{book::Book, reservation::Reservation, user::UserType},
};

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{path} answered with status {status}")]
    Status { path: String, status: u16 },
}

impl SyncError {
    /// The server could not be reached at all
    pub fn is_unreachable(&self) -> bool {
        match self {
            SyncError::Transport(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            SyncError::Status { .. } => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyncClient {
    http: reqwest::Client,
    base_url: String,
}

impl SyncClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Forward credentials to the server's demo login
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        user_type: UserType,
    ) -> Result<LoginResponse, SyncError> {
        self.post(
            "/api/auth/login",
            &json!({ "email": email, "password": password, "userType": user_type }),
        )
        .await
    }

    pub async fn fetch_books(&self) -> Result<Vec<Book>, SyncError> {
        self.get("/api/books").await
    }

    pub async fn push_books(&self, books: &[Book]) -> Result<(), SyncError> {
        self.post::<serde_json::Value, _>("/api/books/sync", &json!({ "books": books }))
            .await
            .map(|_| ())
    }

    pub async fn push_reservations(&self, reservations: &[Reservation]) -> Result<(), SyncError> {
        self.post::<serde_json::Value, _>(
            "/api/reservations/sync",
            &json!({ "reservations": reservations }),
        )
        .await
        .map(|_| ())
    }

    /// Push both collections in the background; failures are only logged.
    /// The push starts once `after` has finished so snapshots land in order.
    pub fn spawn_push(
        &self,
        books: Vec<Book>,
        reservations: Vec<Reservation>,
        after: Option<JoinHandle<()>>,
    ) -> JoinHandle<()> {
        let client = self.clone();
        tokio::spawn(async move {
            if let Some(previous) = after {
                if let Err(e) = previous.await {
                    tracing::warn!("Previous sync task failed: {}", e);
                }
            }
            if let Err(e) = client.push_books(&books).await {
                tracing::warn!("Book sync to {} failed: {}", client.base_url, e);
            }
            if let Err(e) = client.push_reservations(&reservations).await {
                tracing::warn!("Reservation sync to {} failed: {}", client.base_url, e);
            }
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, SyncError> {
        let response = self.http.get(self.url(path)).send().await?;
        Self::decode(path, response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T, SyncError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T, SyncError> {
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
