use rust_decimal::Decimal;
use std::fmt;

use crate::catalog::{CatalogSummary, SelectOption};
use crate::domain::{format_amount, format_money, LineItem};

/// Snapshot of the sale screen, rendered from the builder after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleView {
    pub invoice_number: String,
    pub customer: Option<SelectOption>,
    pub product: Option<SelectOption>,
    pub quantity: i64,
    pub rows: Vec<LineItem>,
    pub total: Decimal,
}

impl SaleView {
    pub fn formatted_total(&self) -> String {
        format_amount(self.total)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Table cells of one line: product, quantity, unit price, subtotal.
pub fn row_cells(line: &LineItem) -> [String; 4] {
    [
        line.product_id.clone(),
        line.quantity.to_string(),
        format_money(line.unit_price),
        format_money(line.subtotal),
    ]
}

impl fmt::Display for SaleView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let invoice = if self.invoice_number.is_empty() { "-" } else { &self.invoice_number };
        let customer = self
            .customer
            .as_ref()
            .map(|c| format!("{} ({})", c.label, c.value))
            .unwrap_or_else(|| "-".to_string());
        let product = self
            .product
            .as_ref()
            .map(|p| format!("{} ({})", p.label, p.value))
            .unwrap_or_else(|| "-".to_string());

        writeln!(f, "Invoice: {}  Client: {}", invoice, customer)?;
        writeln!(f, "Product: {}  Quantity: {}", product, self.quantity)?;

        if self.rows.is_empty() {
            writeln!(f, "  (no products added)")?;
        } else {
            writeln!(f, "{:>4}  {:<10} {:<20} {:>6} {:>12} {:>12}", "line", "id", "product", "qty", "price", "subtotal")?;
            for row in &self.rows {
                let [id, quantity, price, subtotal] = row_cells(row);
                writeln!(
                    f,
                    "{:>4}  {:<10} {:<20} {:>6} {:>12} {:>12}",
                    row.line_id, id, row.product_name, quantity, price, subtotal
                )?;
            }
        }
        write!(f, "Total: {}", self.formatted_total())
    }
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReceipt {
    /// Message returned by the backend.
    pub message: String,
    /// The sale after reset.
    pub view: SaleView,
    /// Catalog counts after the post-sale reload.
    pub catalog: CatalogSummary,
}
