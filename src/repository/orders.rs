//! Orders repository

use crate::{error::AppResult, models::order::Order};

use super::{persisted, Collection, JsonStore};

#[derive(Clone)]
pub struct OrdersRepository {
    store: JsonStore,
}

impl OrdersRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<Order> {
        self.store.read(Collection::Orders).await
    }

    pub async fn insert(&self, order: Order) -> AppResult<Order> {
        let mut orders = self.list().await;
        orders.push(order.clone());
        persisted(self.store.write(Collection::Orders, &orders).await, Collection::Orders)?;
        Ok(order)
    }
}
