use tokio::sync::mpsc;
use tracing::{debug, instrument};

use super::macros::client_method;
use crate::catalog::{Catalog, CatalogSummary};
use crate::error::SaleError;
use crate::messages::SaleRequest;
use crate::sale_builder::{SaleView, SubmitReceipt};

/// Handle to the sale service. Cheap to clone; every clone talks to the same
/// pending sale.
#[derive(Clone)]
pub struct SaleClient {
    sender: mpsc::Sender<SaleRequest>,
}

impl SaleClient {
    pub fn new(sender: mpsc::Sender<SaleRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), SaleError> {
        debug!("Sending shutdown request");
        self.sender
            .send(SaleRequest::Shutdown)
            .await
            .map_err(|_| SaleError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(SaleClient => fn load_catalog() -> CatalogSummary as SaleRequest::LoadCatalog, Error = SaleError);
client_method!(SaleClient => fn reload_catalog() -> CatalogSummary as SaleRequest::ReloadCatalog, Error = SaleError);
client_method!(SaleClient => fn get_catalog() -> Catalog as SaleRequest::GetCatalog, Error = SaleError);
client_method!(SaleClient => fn set_invoice_number(number: String) -> SaleView as SaleRequest::SetInvoiceNumber, Error = SaleError);
client_method!(SaleClient => fn select_customer(id: String) -> SaleView as SaleRequest::SelectCustomer, Error = SaleError);
client_method!(SaleClient => fn select_product(id: String) -> SaleView as SaleRequest::SelectProduct, Error = SaleError);
client_method!(SaleClient => fn set_quantity(quantity: i64) -> SaleView as SaleRequest::SetQuantity, Error = SaleError);
client_method!(SaleClient => fn add_line_item() -> SaleView as SaleRequest::AddLineItem, Error = SaleError);
client_method!(SaleClient => fn remove_line_item(line_id: u64) -> SaleView as SaleRequest::RemoveLineItem, Error = SaleError);
client_method!(SaleClient => fn get_view() -> SaleView as SaleRequest::GetView, Error = SaleError);
client_method!(SaleClient => fn submit() -> SubmitReceipt as SaleRequest::Submit, Error = SaleError);
client_method!(SaleClient => fn clear() -> SaleView as SaleRequest::Clear, Error = SaleError);

// Test-only method for internal state inspection
#[cfg(test)]
client_method!(SaleClient => fn get_line_count() -> usize as SaleRequest::GetLineCount, Error = SaleError);
