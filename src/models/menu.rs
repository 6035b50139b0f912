//! Cafe menu demo data

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Menu entry served by the demo menu endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Fixed menu; never persisted
pub fn demo_menu() -> Vec<MenuItem> {
    [
        ("espresso", "Espresso", "coffee", 2.5, "Double shot, house blend"),
        ("cappuccino", "Cappuccino", "coffee", 3.8, "Espresso with steamed milk foam"),
        ("chai-latte", "Chai Latte", "tea", 4.2, "Spiced black tea with milk"),
        ("matcha", "Matcha", "tea", 4.5, "Ceremonial grade, whisked to order"),
        ("croissant", "Butter Croissant", "pastry", 2.9, "Baked every morning"),
        ("banana-bread", "Banana Bread", "pastry", 3.2, "With walnuts"),
    ]
    .into_iter()
    .map(|(id, name, category, price, description)| MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        price,
        description: Some(description.to_string()),
    })
    .collect()
}
