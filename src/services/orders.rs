//! Order service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::order::{CreateOrder, Order},
    repository::Repository,
};

#[derive(Clone)]
pub struct OrdersService {
    repository: Repository,
}

impl OrdersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_orders(&self) -> Vec<Order> {
        self.repository.orders.list().await
    }

    pub async fn create_order(&self, input: CreateOrder) -> AppResult<Order> {
        let missing = input.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::missing_fields(missing));
        }
        let order = input.into_order(Utc::now());
        tracing::info!("New order {} totalling {:.2}", order.id, order.total);
        self.repository.orders.insert(order).await
    }
}
