use tokio::sync::oneshot;

use crate::catalog::{Catalog, CatalogSummary};
use crate::error::SaleError;
use crate::sale_builder::{SaleView, SubmitReceipt};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Requests handled by the sale service, one at a time, in arrival order.
#[derive(Debug)]
pub enum SaleRequest {
    LoadCatalog {
        respond_to: ServiceResponse<CatalogSummary, SaleError>,
    },
    ReloadCatalog {
        respond_to: ServiceResponse<CatalogSummary, SaleError>,
    },
    GetCatalog {
        respond_to: ServiceResponse<Catalog, SaleError>,
    },
    SetInvoiceNumber {
        number: String,
        respond_to: ServiceResponse<SaleView, SaleError>,
    },
    SelectCustomer {
        id: String,
        respond_to: ServiceResponse<SaleView, SaleError>,
    },
    SelectProduct {
        id: String,
        respond_to: ServiceResponse<SaleView, SaleError>,
    },
    SetQuantity {
        quantity: i64,
        respond_to: ServiceResponse<SaleView, SaleError>,
    },
    AddLineItem {
        respond_to: ServiceResponse<SaleView, SaleError>,
    },
    RemoveLineItem {
        line_id: u64,
        respond_to: ServiceResponse<SaleView, SaleError>,
    },
    GetView {
        respond_to: ServiceResponse<SaleView, SaleError>,
    },
    Submit {
        respond_to: ServiceResponse<SubmitReceipt, SaleError>,
    },
    Clear {
        respond_to: ServiceResponse<SaleView, SaleError>,
    },
    Shutdown,
    #[cfg(test)]
    GetLineCount {
        respond_to: ServiceResponse<usize, SaleError>,
    },
}
