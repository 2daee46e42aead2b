use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use super::builder::SaleBuilder;
use super::view::{SaleView, SubmitReceipt};
use crate::backend::InventoryBackend;
use crate::catalog::{self, Catalog, CatalogSummary};
use crate::clients::SaleClient;
use crate::domain::next_invoice_number;
use crate::error::SaleError;
use crate::messages::{SaleRequest, ServiceResponse};

/// Task owning the pending sale. Requests are handled strictly one after the
/// other, so a submission waiting on the backend holds back everything queued
/// behind it.
pub struct SaleService {
    receiver: mpsc::Receiver<SaleRequest>,
    backend: Arc<dyn InventoryBackend>,
    builder: SaleBuilder,
}

impl SaleService {
    pub fn new(buffer_size: usize, backend: Arc<dyn InventoryBackend>) -> (Self, SaleClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            backend,
            builder: SaleBuilder::new(Catalog::new()),
        };
        let client = SaleClient::new(sender);
        (service, client)
    }

    #[instrument(name = "sale_service", skip(self))]
    pub async fn run(mut self) {
        info!("SaleService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SaleRequest::LoadCatalog { respond_to } => {
                    self.handle_load_catalog(respond_to).await;
                }
                SaleRequest::ReloadCatalog { respond_to } => {
                    let summary = self.reload_catalog().await;
                    let _ = respond_to.send(Ok(summary));
                }
                SaleRequest::GetCatalog { respond_to } => {
                    let _ = respond_to.send(Ok(self.builder.catalog().clone()));
                }
                SaleRequest::SetInvoiceNumber { number, respond_to } => {
                    self.builder.set_invoice_number(number);
                    let _ = respond_to.send(Ok(self.builder.view()));
                }
                SaleRequest::SelectCustomer { id, respond_to } => {
                    self.handle_select_customer(id, respond_to);
                }
                SaleRequest::SelectProduct { id, respond_to } => {
                    self.handle_select_product(id, respond_to);
                }
                SaleRequest::SetQuantity { quantity, respond_to } => {
                    self.builder.set_quantity(quantity);
                    let _ = respond_to.send(Ok(self.builder.view()));
                }
                SaleRequest::AddLineItem { respond_to } => {
                    self.handle_add_line_item(respond_to);
                }
                SaleRequest::RemoveLineItem { line_id, respond_to } => {
                    self.handle_remove_line_item(line_id, respond_to);
                }
                SaleRequest::GetView { respond_to } => {
                    let _ = respond_to.send(Ok(self.builder.view()));
                }
                SaleRequest::Submit { respond_to } => {
                    self.handle_submit(respond_to).await;
                }
                SaleRequest::Clear { respond_to } => {
                    self.handle_clear(respond_to);
                }
                SaleRequest::Shutdown => {
                    info!("SaleService shutting down");
                    break;
                }
                #[cfg(test)]
                SaleRequest::GetLineCount { respond_to } => {
                    let _ = respond_to.send(Ok(self.builder.lines().len()));
                }
            }
        }
        info!("SaleService stopped");
    }

    #[instrument(skip(self, respond_to))]
    async fn handle_load_catalog(&mut self, respond_to: ServiceResponse<CatalogSummary, SaleError>) {
        debug!("Processing load_catalog request");
        let summary = catalog::populate(self.builder.catalog_mut(), self.backend.as_ref()).await;
        info!(customers = summary.customers, products = summary.products, "Catalog loaded");
        let _ = respond_to.send(Ok(summary));
    }

    /// Fetches a fresh snapshot and swaps it in.
    async fn reload_catalog(&mut self) -> CatalogSummary {
        let mut fresh = Catalog::new();
        let summary = catalog::populate(&mut fresh, self.backend.as_ref()).await;
        self.builder.replace_catalog(fresh);
        info!(customers = summary.customers, products = summary.products, "Catalog reloaded");
        summary
    }

    #[instrument(fields(customer_id = %id), skip(self, respond_to))]
    fn handle_select_customer(&mut self, id: String, respond_to: ServiceResponse<SaleView, SaleError>) {
        debug!("Processing select_customer request");
        let result = self.builder.select_customer(&id).map(|_| self.builder.view());
        if let Err(e) = &result {
            warn!(error = %e, "Client selection rejected");
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_select_product(&mut self, id: String, respond_to: ServiceResponse<SaleView, SaleError>) {
        debug!("Processing select_product request");
        let result = self.builder.select_product(&id).map(|_| self.builder.view());
        if let Err(e) = &result {
            warn!(error = %e, "Product selection rejected");
        }
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_add_line_item(&mut self, respond_to: ServiceResponse<SaleView, SaleError>) {
        debug!("Processing add_line_item request");
        let result = match self.builder.add_line_item() {
            Ok(line) => {
                info!(
                    line_id = line.line_id,
                    product_id = %line.product_id,
                    quantity = line.quantity,
                    subtotal = %line.subtotal,
                    "Line item added"
                );
                Ok(self.builder.view())
            }
            Err(e) => {
                warn!(error = %e, "Line item rejected");
                Err(e)
            }
        };
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_remove_line_item(&mut self, line_id: u64, respond_to: ServiceResponse<SaleView, SaleError>) {
        debug!("Processing remove_line_item request");
        let result = match self.builder.remove_line_item(line_id) {
            Ok(line) => {
                info!(product_id = %line.product_id, "Line item removed");
                Ok(self.builder.view())
            }
            Err(e) => {
                warn!(error = %e, "Line item removal rejected");
                Err(e)
            }
        };
        let _ = respond_to.send(result);
    }

    #[instrument(fields(invoice = %self.builder.invoice_number()), skip(self, respond_to))]
    async fn handle_submit(&mut self, respond_to: ServiceResponse<SubmitReceipt, SaleError>) {
        debug!("Processing submit request");
        let result = self.submit().await;
        match &result {
            Ok(receipt) => info!(message = %receipt.message, "Sale registered"),
            Err(e) => error!(error = %e, "Sale not registered"),
        }
        let _ = respond_to.send(result);
    }

    async fn submit(&mut self) -> Result<SubmitReceipt, SaleError> {
        let sale = self.builder.submission()?;
        info!(items = sale.items.len(), total = %sale.total, "Submitting sale");

        let reply = self.backend.register_sale(&sale).await?;
        if !reply.success {
            return Err(SaleError::Rejected(reply.message));
        }

        self.builder.reset(next_invoice_number(&sale.invoice_number).unwrap_or_default());
        let catalog = self.reload_catalog().await;

        Ok(SubmitReceipt {
            message: reply.message,
            view: self.builder.view(),
            catalog,
        })
    }

    #[instrument(skip(self, respond_to))]
    fn handle_clear(&mut self, respond_to: ServiceResponse<SaleView, SaleError>) {
        debug!("Processing clear request");
        self.builder.reset(String::new());
        let _ = respond_to.send(Ok(self.builder.view()));
    }
}
