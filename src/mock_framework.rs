//! # Mock Framework
//!
//! Utilities for testing services and the shell in isolation.
//!
//! [`MockBackend`] stands in for the HTTP backend: listings and replies are
//! scripted with builder methods and every call is recorded for assertions.
//!
//! [`create_mock_client`] returns a [`SaleClient`] wired to a receiver the test
//! controls, so front-end code can be checked without a running service.

use async_trait::async_trait;
use std::sync::Mutex;
use tokio::sync::mpsc;

use crate::backend::{ApiReply, InventoryBackend, ReportKind};
use crate::clients::SaleClient;
use crate::domain::{Customer, NewCustomer, NewProduct, Product, SaleSubmission};
use crate::error::ApiError;
use crate::messages::SaleRequest;

/// One call received by [`MockBackend`], reduced to what tests compare on.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    FetchCustomers,
    FetchProducts,
    CreateCustomer(String),
    DeleteCustomer(String),
    CreateProduct(String),
    DeleteProduct(String),
    RegisterSale(String),
    DownloadReport(ReportKind),
}

pub struct MockBackend {
    customers: Mutex<Result<Vec<Customer>, ApiError>>,
    products: Mutex<Result<Vec<Product>, ApiError>>,
    customer_reply: ApiReply,
    product_reply: ApiReply,
    sale_reply: Result<ApiReply, ApiError>,
    report: Result<Vec<u8>, ApiError>,
    calls: Mutex<Vec<RecordedCall>>,
    sales: Mutex<Vec<SaleSubmission>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Empty listings, every mutation accepted with an empty message.
    pub fn new() -> Self {
        Self {
            customers: Mutex::new(Ok(Vec::new())),
            products: Mutex::new(Ok(Vec::new())),
            customer_reply: ApiReply::ok(""),
            product_reply: ApiReply::ok(""),
            sale_reply: Ok(ApiReply::ok("Venta registrada correctamente")),
            report: Ok(Vec::new()),
            calls: Mutex::new(Vec::new()),
            sales: Mutex::new(Vec::new()),
        }
    }

    pub fn with_customers(self, customers: Vec<Customer>) -> Self {
        *self.customers.lock().unwrap() = Ok(customers);
        self
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        *self.products.lock().unwrap() = Ok(products);
        self
    }

    pub fn failing_customers(self, error: ApiError) -> Self {
        *self.customers.lock().unwrap() = Err(error);
        self
    }

    pub fn failing_products(self, error: ApiError) -> Self {
        *self.products.lock().unwrap() = Err(error);
        self
    }

    /// Reply for client create and delete.
    pub fn with_customer_reply(mut self, reply: ApiReply) -> Self {
        self.customer_reply = reply;
        self
    }

    /// Reply for product create and delete.
    pub fn with_product_reply(mut self, reply: ApiReply) -> Self {
        self.product_reply = reply;
        self
    }

    pub fn with_sale_reply(mut self, reply: Result<ApiReply, ApiError>) -> Self {
        self.sale_reply = reply;
        self
    }

    pub fn with_report(mut self, bytes: Vec<u8>) -> Self {
        self.report = Ok(bytes);
        self
    }

    pub fn with_report_error(mut self, error: ApiError) -> Self {
        self.report = Err(error);
        self
    }

    /// Swaps the product listing served from now on, as if the backend changed.
    pub fn replace_products(&self, products: Vec<Product>) {
        *self.products.lock().unwrap() = Ok(products);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn submitted_sales(&self) -> Vec<SaleSubmission> {
        self.sales.lock().unwrap().clone()
    }

    pub fn product_fetches(&self) -> usize {
        self.calls().iter().filter(|c| **c == RecordedCall::FetchProducts).count()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl InventoryBackend for MockBackend {
    async fn fetch_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.record(RecordedCall::FetchCustomers);
        self.customers.lock().unwrap().clone()
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        self.record(RecordedCall::FetchProducts);
        self.products.lock().unwrap().clone()
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<ApiReply, ApiError> {
        self.record(RecordedCall::CreateCustomer(customer.name.clone()));
        Ok(self.customer_reply.clone())
    }

    async fn delete_customer(&self, id: &str) -> Result<ApiReply, ApiError> {
        self.record(RecordedCall::DeleteCustomer(id.to_string()));
        Ok(self.customer_reply.clone())
    }

    async fn create_product(&self, product: &NewProduct) -> Result<ApiReply, ApiError> {
        self.record(RecordedCall::CreateProduct(product.name.clone()));
        Ok(self.product_reply.clone())
    }

    async fn delete_product(&self, id: &str) -> Result<ApiReply, ApiError> {
        self.record(RecordedCall::DeleteProduct(id.to_string()));
        Ok(self.product_reply.clone())
    }

    async fn register_sale(&self, sale: &SaleSubmission) -> Result<ApiReply, ApiError> {
        self.record(RecordedCall::RegisterSale(sale.invoice_number.clone()));
        self.sales.lock().unwrap().push(sale.clone());
        self.sale_reply.clone()
    }

    async fn download_report(&self, report: ReportKind) -> Result<Vec<u8>, ApiError> {
        self.record(RecordedCall::DownloadReport(report));
        self.report.clone()
    }
}

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the service: it pulls requests off the receiver, checks
/// them, and answers (or drops) the responder.
pub fn create_mock_client(buffer_size: usize) -> (SaleClient, mpsc::Receiver<SaleRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (SaleClient::new(sender), receiver)
}

/// Next request, whatever it is.
pub async fn expect_request(receiver: &mut mpsc::Receiver<SaleRequest>) -> Option<SaleRequest> {
    receiver.recv().await
}

/// Helper to verify that the next message is a SelectProduct request
pub async fn expect_select_product(
    receiver: &mut mpsc::Receiver<SaleRequest>,
) -> Option<(String, tokio::sync::oneshot::Sender<Result<crate::sale_builder::SaleView, crate::error::SaleError>>)> {
    match receiver.recv().await {
        Some(SaleRequest::SelectProduct { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Submit request
pub async fn expect_submit(
    receiver: &mut mpsc::Receiver<SaleRequest>,
) -> Option<tokio::sync::oneshot::Sender<Result<crate::sale_builder::SubmitReceipt, crate::error::SaleError>>> {
    match receiver.recv().await {
        Some(SaleRequest::Submit { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SaleError;
    use crate::sale_builder::SaleView;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let select_task = tokio::spawn(async move { client.select_product("P1".into()).await });

        let (id, responder) = expect_select_product(&mut receiver).await.expect("Expected SelectProduct request");
        assert_eq!(id, "P1");
        responder.send(Err(SaleError::UnknownProduct(id))).unwrap();

        let result: Result<SaleView, SaleError> = select_task.await.unwrap();
        assert_eq!(result, Err(SaleError::UnknownProduct("P1".into())));
    }

    #[tokio::test]
    async fn dropped_responder_is_a_communication_error() {
        let (client, mut receiver) = create_mock_client(10);
        let submit_task = tokio::spawn(async move { client.submit().await });

        drop(expect_submit(&mut receiver).await.expect("Expected Submit request"));

        let err = submit_task.await.unwrap().unwrap_err();
        assert_eq!(err, SaleError::ActorCommunicationError("Actor dropped".into()));
    }

    #[tokio::test]
    async fn backend_records_calls() {
        let backend = MockBackend::new();
        backend.fetch_products().await.unwrap();
        backend.delete_customer("C9").await.unwrap();
        assert_eq!(
            backend.calls(),
            vec![RecordedCall::FetchProducts, RecordedCall::DeleteCustomer("C9".into())]
        );
    }
}
