use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::round_cents;
use super::product::Product;

/// One product/quantity/price entry of a pending sale.
///
/// The unit price is copied from the catalog snapshot when the line is added
/// and never re-read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub line_id: u64,
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

impl LineItem {
    pub fn new(line_id: u64, product: &Product, quantity: u32) -> Self {
        Self {
            line_id,
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            unit_price: product.price,
            subtotal: round_cents(product.price * Decimal::from(quantity)),
        }
    }
}

/// A line of the sale as the backend expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    #[serde(rename = "producto_id")]
    pub product_id: String,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "precio", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
}

impl From<&LineItem> for SaleItem {
    fn from(line: &LineItem) -> Self {
        Self {
            product_id: line.product_id.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            subtotal: line.subtotal,
        }
    }
}

/// The whole sale, sent to the backend as one transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleSubmission {
    #[serde(rename = "numero_factura")]
    pub invoice_number: String,
    #[serde(rename = "cliente_id")]
    pub customer_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub items: Vec<SaleItem>,
}
