//! Catalog snapshot: the clients and products offered by the sale screen.
//!
//! Loaded from the structured listing endpoints; entries keep the order the
//! backend sent them in and an identifier is only ever inserted once.

use indexmap::IndexMap;
use tracing::{error, info, instrument};

use crate::backend::InventoryBackend;
use crate::domain::{Customer, Product};

/// One choice of a picker: the identifier and what the user sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    pub customers: usize,
    pub products: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    customers: IndexMap<String, Customer>,
    products: IndexMap<String, Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts customers whose id is not present yet; returns how many were added.
    pub fn add_customers(&mut self, customers: impl IntoIterator<Item = Customer>) -> usize {
        insert_new(&mut self.customers, customers.into_iter().map(|c| (c.id.clone(), c)))
    }

    /// Inserts products whose id is not present yet; returns how many were added.
    pub fn add_products(&mut self, products: impl IntoIterator<Item = Product>) -> usize {
        insert_new(&mut self.products, products.into_iter().map(|p| (p.id.clone(), p)))
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.get(id)
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn customer_options(&self) -> Vec<SelectOption> {
        self.customers()
            .map(|c| SelectOption { value: c.id.clone(), label: c.name.clone() })
            .collect()
    }

    pub fn product_options(&self) -> Vec<SelectOption> {
        self.products()
            .map(|p| SelectOption { value: p.id.clone(), label: p.option_label() })
            .collect()
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary { customers: self.customers.len(), products: self.products.len() }
    }
}

fn insert_new<T>(map: &mut IndexMap<String, T>, entries: impl Iterator<Item = (String, T)>) -> usize {
    let mut added = 0;
    for (id, entry) in entries {
        if id.is_empty() || map.contains_key(&id) {
            continue;
        }
        map.insert(id, entry);
        added += 1;
    }
    added
}

/// Fills `catalog` from the backend listings.
///
/// A failing listing is logged and leaves its half of the catalog as it was;
/// nothing is reported to the user.
#[instrument(name = "catalog_loader", skip_all)]
pub async fn populate(catalog: &mut Catalog, backend: &dyn InventoryBackend) -> CatalogSummary {
    match backend.fetch_customers().await {
        Ok(customers) => {
            let added = catalog.add_customers(customers);
            info!(added, "Customers loaded");
        }
        Err(e) => error!(error = %e, "Failed to load customers"),
    }

    match backend.fetch_products().await {
        Ok(products) => {
            let added = catalog.add_products(products);
            info!(added, "Products loaded");
        }
        Err(e) => error!(error = %e, "Failed to load products"),
    }

    catalog.summary()
}
