use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::{ApiReply, InventoryBackend, ReportKind};
use crate::config::BackendSettings;
use crate::domain::{Customer, NewCustomer, NewProduct, Product, SaleSubmission};
use crate::error::ApiError;

const USER_AGENT: &str = concat!("inventix/", env!("CARGO_PKG_VERSION"));

/// REST+JSON client for the inventory backend.
#[derive(Clone)]
pub struct HttpBackend {
    http: Client,
    base_url: Url,
    customers_path: String,
    products_path: String,
}

impl HttpBackend {
    pub fn new(settings: &BackendSettings) -> Result<Self, ApiError> {
        let mut base = settings.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base, e)))?;

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if settings.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(settings.timeout_secs));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url,
            customers_path: settings.customers_path.trim_start_matches('/').to_string(),
            products_path: settings.products_path.trim_start_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))
    }

    /// `{collection}/{id}` with the id as a single escaped path segment.
    fn entity_url(&self, collection: &str, id: &str) -> Result<Url, ApiError> {
        if id.is_empty() || id == "." || id == ".." {
            return Err(ApiError::InvalidUrl(format!("{}/{}", collection, id)));
        }
        let mut url = self.url(collection)?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .push(id);
        Ok(url)
    }

    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let response = self.http.get(self.url(path)?).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status: status.as_u16(), message });
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Decodes `{success, message}` whatever the status; the backend answers
/// business failures with 400 and a JSON body.
async fn read_reply(response: Response) -> Result<ApiReply, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    match serde_json::from_str::<ApiReply>(&body) {
        Ok(reply) => Ok(reply),
        Err(e) if status.is_success() => Err(ApiError::Decode(e.to_string())),
        Err(_) => {
            warn!(status = status.as_u16(), "Backend error without a JSON reply");
            Err(ApiError::Status { status: status.as_u16(), message: body })
        }
    }
}

#[async_trait]
impl InventoryBackend for HttpBackend {
    #[instrument(skip(self))]
    async fn fetch_customers(&self) -> Result<Vec<Customer>, ApiError> {
        debug!("Sending request");
        self.fetch_list(&self.customers_path).await
    }

    #[instrument(skip(self))]
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        debug!("Sending request");
        self.fetch_list(&self.products_path).await
    }

    #[instrument(fields(customer_name = %customer.name), skip(self, customer))]
    async fn create_customer(&self, customer: &NewCustomer) -> Result<ApiReply, ApiError> {
        debug!("Sending request");
        let response = self.http.post(self.url("api/clientes")?).json(customer).send().await?;
        read_reply(response).await
    }

    #[instrument(skip(self))]
    async fn delete_customer(&self, id: &str) -> Result<ApiReply, ApiError> {
        debug!("Sending request");
        let response = self.http.delete(self.entity_url("api/clientes", id)?).send().await?;
        read_reply(response).await
    }

    #[instrument(fields(product_name = %product.name), skip(self, product))]
    async fn create_product(&self, product: &NewProduct) -> Result<ApiReply, ApiError> {
        debug!("Sending request");
        let response = self.http.post(self.url("api/productos")?).json(product).send().await?;
        read_reply(response).await
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: &str) -> Result<ApiReply, ApiError> {
        debug!("Sending request");
        let response = self.http.delete(self.entity_url("api/productos", id)?).send().await?;
        read_reply(response).await
    }

    #[instrument(
        fields(invoice = %sale.invoice_number, customer_id = %sale.customer_id, items = sale.items.len()),
        skip(self, sale)
    )]
    async fn register_sale(&self, sale: &SaleSubmission) -> Result<ApiReply, ApiError> {
        debug!("Sending request");
        let response = self.http.post(self.url("api/ventas")?).json(sale).send().await?;
        read_reply(response).await
    }

    #[instrument(skip(self, report), fields(report = report.name()))]
    async fn download_report(&self, report: ReportKind) -> Result<Vec<u8>, ApiError> {
        debug!("Sending request");
        let response = self.http.get(self.url(report.path())?).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.bytes().await?.to_vec());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiReply>(&body)
            .map(|reply| reply.message)
            .unwrap_or(body);
        Err(ApiError::Status { status: status.as_u16(), message })
    }
}
