//! Order model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Cafe or bookstore order. Items are free-form; nothing ties them to books.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<Value>,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create order request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    #[schema(value_type = Option<Vec<Object>>)]
    pub items: Option<Vec<Value>>,
    pub total: Option<f64>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

impl CreateOrder {
    /// Names of required fields that are absent. An empty item list counts as absent.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.items.as_ref().map_or(true, Vec::is_empty) {
            missing.push("items");
        }
        if self.total.is_none() {
            missing.push("total");
        }
        missing
    }

    /// Build the stored order. Callers check `missing_fields` first.
    pub fn into_order(self, now: DateTime<Utc>) -> Order {
        Order {
            id: format!("ORD-{}", now.timestamp_millis()),
            items: self.items.unwrap_or_default(),
            total: self.total.unwrap_or_default(),
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            payment_method: self.payment_method,
            notes: self.notes,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields() {
        let order: CreateOrder = serde_json::from_value(json!({ "items": [] })).unwrap();
        assert_eq!(order.missing_fields(), vec!["items", "total"]);

        let order: CreateOrder =
            serde_json::from_value(json!({ "items": [{"name": "Latte"}], "total": 4.5 })).unwrap();
        assert!(order.missing_fields().is_empty());
    }
}
