use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::money::format_money;

/// A product in the inventory as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "precio", with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(deserialize_with = "deserialize_stock")]
    pub stock: u32,
    #[serde(rename = "proveedor", default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
}

/// Oversold products come back with negative stock; they have none to sell.
fn deserialize_stock<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(u32::try_from(raw.max(0)).unwrap_or(u32::MAX))
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price,
            stock,
            supplier: None,
        }
    }

    /// Label shown in the product picker, e.g. `Cafe - $4.50`.
    pub fn option_label(&self) -> String {
        format!("{} - {}", self.name, format_money(self.price))
    }
}

/// Payload for registering a new product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "precio", with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i64,
    #[serde(rename = "proveedor")]
    pub supplier: String,
}

impl NewProduct {
    /// Name is required; description and supplier may be empty.
    pub fn validated(self) -> Result<Self, String> {
        let form = Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            supplier: self.supplier.trim().to_string(),
            ..self
        };

        if form.name.is_empty() {
            return Err("nombre is required".to_string());
        }
        if form.price < Decimal::ZERO {
            return Err(format!("precio must not be negative: {}", form.price));
        }
        if form.stock < 0 {
            return Err(format!("stock must not be negative: {}", form.stock));
        }
        Ok(form)
    }
}
