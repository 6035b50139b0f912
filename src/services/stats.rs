//! Dashboard statistics service

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{models::order::Order, repository::Repository};

/// Dashboard figures
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_orders: usize,
    pub today_orders: usize,
    pub today_sales: f64,
    pub total_books: usize,
    pub total_users: usize,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn dashboard(&self) -> DashboardStats {
        let orders = self.repository.orders.list().await;
        let (today_orders, today_sales) = orders_on_day(&orders, Utc::now());

        DashboardStats {
            total_orders: orders.len(),
            today_orders,
            today_sales,
            total_books: self.repository.books.count().await,
            total_users: self.repository.users.count().await,
        }
    }
}

/// Count and sales total of orders placed on the (UTC) calendar day of `day`
fn orders_on_day(orders: &[Order], day: DateTime<Utc>) -> (usize, f64) {
    let date = day.date_naive();
    orders
        .iter()
        .filter(|order| order.created_at.date_naive() == date)
        .fold((0, 0.0), |(count, sales), order| (count + 1, sales + order.total))
}
