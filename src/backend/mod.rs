//! The seam between the terminal and the inventory backend.
//!
//! [`InventoryBackend`] lists every call the application makes; [`HttpBackend`]
//! implements it over REST+JSON and tests substitute a scripted mock.

mod http;

pub use http::HttpBackend;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{Customer, NewCustomer, NewProduct, Product, SaleSubmission};
use crate::error::ApiError;

/// `{success, message}` body returned by every mutating endpoint.
///
/// Delete endpoints only send `message`, so `success` defaults to `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiReply {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

fn default_success() -> bool {
    true
}

impl ApiReply {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into() }
    }
}

/// Reports the backend renders on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    SalesExcel,
    InventoryExcel,
    SalesPdf,
    InventoryPdf,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::SalesExcel,
        ReportKind::InventoryExcel,
        ReportKind::SalesPdf,
        ReportKind::InventoryPdf,
    ];

    pub fn path(self) -> &'static str {
        match self {
            ReportKind::SalesExcel => "api/reportes/ventas-excel",
            ReportKind::InventoryExcel => "api/reportes/inventario-excel",
            ReportKind::SalesPdf => "api/reportes/ventas-pdf",
            ReportKind::InventoryPdf => "api/reportes/inventario-pdf",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ReportKind::SalesExcel => "sales-excel",
            ReportKind::InventoryExcel => "inventory-excel",
            ReportKind::SalesPdf => "sales-pdf",
            ReportKind::InventoryPdf => "inventory-pdf",
        }
    }

    /// File name the backend suggests for the download, e.g. `Reporte_Ventas_20261019.pdf`.
    pub fn default_file_name(self, date: NaiveDate) -> String {
        let (subject, extension) = match self {
            ReportKind::SalesExcel => ("Ventas", "xlsx"),
            ReportKind::InventoryExcel => ("Inventario", "xlsx"),
            ReportKind::SalesPdf => ("Ventas", "pdf"),
            ReportKind::InventoryPdf => ("Inventario", "pdf"),
        };
        format!("Reporte_{}_{}.{}", subject, date.format("%Y%m%d"), extension)
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = ReportKind::ALL.iter().map(|k| k.name()).collect();
                format!("unknown report '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

#[async_trait]
pub trait InventoryBackend: Send + Sync {
    async fn fetch_customers(&self) -> Result<Vec<Customer>, ApiError>;
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError>;
    async fn create_customer(&self, customer: &NewCustomer) -> Result<ApiReply, ApiError>;
    async fn delete_customer(&self, id: &str) -> Result<ApiReply, ApiError>;
    async fn create_product(&self, product: &NewProduct) -> Result<ApiReply, ApiError>;
    async fn delete_product(&self, id: &str) -> Result<ApiReply, ApiError>;
    async fn register_sale(&self, sale: &SaleSubmission) -> Result<ApiReply, ApiError>;
    async fn download_report(&self, report: ReportKind) -> Result<Vec<u8>, ApiError>;
}
