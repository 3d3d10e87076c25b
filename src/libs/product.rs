use crate::libs::user::Locale;
use serde::{Deserialize, Serialize};

/// An item on a shop's menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    /// Emoji or image URL.
    pub icon: String,
    pub category: String,
}

impl Product {
    pub fn new(id: &str, name: &str, price: f64, icon: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price,
            icon: icon.to_string(),
            category: category.to_string(),
        }
    }
}

/// Menu created the first time a shop's product list is read.
pub fn initial_products(locale: Locale) -> Vec<Product> {
    match locale {
        Locale::Yummy => vec![
            Product::new("y1", "Helado Fresa", 5.0, "🍓", "Helados"),
            Product::new("y2", "Helado Vainilla", 5.0, "🍦", "Helados"),
            Product::new("y3", "Banana Split", 12.0, "🍌", "Especiales"),
        ],
        Locale::Uwu => vec![
            Product::new("u1", "Café Latte", 4.0, "☕", "Bebidas"),
            Product::new("u2", "Matcha Cake", 6.0, "🍰", "Postres"),
            Product::new("u3", "Boba Tea", 5.0, "🧋", "Bebidas"),
        ],
    }
}
