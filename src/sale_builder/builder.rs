use rust_decimal::Decimal;

use crate::catalog::{Catalog, SelectOption};
use crate::domain::{LineItem, SaleItem, SaleSubmission};
use crate::error::SaleError;

use super::view::SaleView;

/// Quantity the input goes back to after each successful add.
pub const DEFAULT_QUANTITY: i64 = 1;

/// Authoritative state of the pending sale.
///
/// The line list is the only record of what is in the sale: the total, the
/// rendered view and the submission payload are all derived from it.
#[derive(Debug, Clone)]
pub struct SaleBuilder {
    catalog: Catalog,
    invoice_number: String,
    customer_id: Option<String>,
    product_id: Option<String>,
    quantity: i64,
    lines: Vec<LineItem>,
    next_line_id: u64,
}

impl SaleBuilder {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            invoice_number: String::new(),
            customer_id: None,
            product_id: None,
            quantity: DEFAULT_QUANTITY,
            lines: Vec::new(),
            next_line_id: 1,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// Swaps in a fresh snapshot. Lines keep the prices they were added with;
    /// selections that no longer exist are dropped.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        if let Some(id) = &self.customer_id {
            if self.catalog.customer(id).is_none() {
                self.customer_id = None;
            }
        }
        if let Some(id) = &self.product_id {
            if self.catalog.product(id).is_none() {
                self.product_id = None;
            }
        }
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    pub fn set_invoice_number(&mut self, number: impl Into<String>) {
        self.invoice_number = number.into().trim().to_string();
    }

    /// Selects a client from the snapshot; an empty id clears the selection.
    pub fn select_customer(&mut self, id: &str) -> Result<(), SaleError> {
        let id = id.trim();
        if id.is_empty() {
            self.customer_id = None;
            return Ok(());
        }
        if self.catalog.customer(id).is_none() {
            return Err(SaleError::UnknownCustomer(id.to_string()));
        }
        self.customer_id = Some(id.to_string());
        Ok(())
    }

    /// Selects a product from the snapshot; an empty id clears the selection.
    pub fn select_product(&mut self, id: &str) -> Result<(), SaleError> {
        let id = id.trim();
        if id.is_empty() {
            self.product_id = None;
            return Ok(());
        }
        if self.catalog.product(id).is_none() {
            return Err(SaleError::UnknownProduct(id.to_string()));
        }
        self.product_id = Some(id.to_string());
        Ok(())
    }

    /// Stores the quantity input as typed; it is checked when a line is added.
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Adds the selected product with the current quantity.
    ///
    /// Checks, in order: a client is selected, a product is selected, the
    /// quantity is positive, the quantity fits the product's recorded stock.
    /// Any failure leaves the sale untouched.
    pub fn add_line_item(&mut self) -> Result<&LineItem, SaleError> {
        if self.customer_id.is_none() {
            return Err(SaleError::NoCustomerSelected);
        }
        let product_id = self.product_id.as_deref().ok_or(SaleError::NoProductSelected)?;
        if self.quantity <= 0 {
            return Err(SaleError::InvalidQuantity(self.quantity.to_string()));
        }
        let product = self
            .catalog
            .product(product_id)
            .ok_or_else(|| SaleError::UnknownProduct(product_id.to_string()))?;

        let insufficient = SaleError::InsufficientStock {
            requested: self.quantity,
            available: product.stock,
        };
        let quantity = u32::try_from(self.quantity).map_err(|_| insufficient.clone())?;
        if quantity > product.stock {
            return Err(insufficient);
        }

        let line = LineItem::new(self.next_line_id, product, quantity);
        self.next_line_id += 1;
        self.lines.push(line);
        self.quantity = DEFAULT_QUANTITY;
        Ok(&self.lines[self.lines.len() - 1])
    }

    pub fn remove_line_item(&mut self, line_id: u64) -> Result<LineItem, SaleError> {
        let index = self
            .lines
            .iter()
            .position(|line| line.line_id == line_id)
            .ok_or(SaleError::LineNotFound(line_id))?;
        Ok(self.lines.remove(index))
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(|line| line.subtotal).sum()
    }

    /// Builds the payload from the current lines, in display order.
    pub fn submission(&self) -> Result<SaleSubmission, SaleError> {
        let customer_id = self.customer_id.clone().ok_or(SaleError::NoCustomerSelected)?;
        if self.lines.is_empty() {
            return Err(SaleError::EmptySale);
        }

        Ok(SaleSubmission {
            invoice_number: self.invoice_number.clone(),
            customer_id,
            total: self.total(),
            items: self.lines.iter().map(SaleItem::from).collect(),
        })
    }

    /// Back to an empty sale with the given invoice number.
    pub fn reset(&mut self, invoice_number: impl Into<String>) {
        self.invoice_number = invoice_number.into();
        self.customer_id = None;
        self.product_id = None;
        self.quantity = DEFAULT_QUANTITY;
        self.lines.clear();
    }

    pub fn view(&self) -> SaleView {
        let customer = self.customer_id.as_deref().and_then(|id| self.catalog.customer(id)).map(|c| {
            SelectOption { value: c.id.clone(), label: c.name.clone() }
        });
        let product = self.product_id.as_deref().and_then(|id| self.catalog.product(id)).map(|p| {
            SelectOption { value: p.id.clone(), label: p.option_label() }
        });

        SaleView {
            invoice_number: self.invoice_number.clone(),
            customer,
            product,
            quantity: self.quantity,
            rows: self.lines.clone(),
            total: self.total(),
        }
    }
}
