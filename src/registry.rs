//! Client and product registration screens: create, delete, list, plus the
//! report downloads offered next to them.

use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::backend::{ApiReply, InventoryBackend, ReportKind};
use crate::domain::{Customer, NewCustomer, NewProduct, Product};
use crate::error::{ApiError, RegistryError};

#[derive(Clone)]
pub struct Registry {
    backend: Arc<dyn InventoryBackend>,
}

impl Registry {
    pub fn new(backend: Arc<dyn InventoryBackend>) -> Self {
        Self { backend }
    }

    #[instrument(skip(self))]
    pub async fn customers(&self) -> Result<Vec<Customer>, RegistryError> {
        Ok(self.backend.fetch_customers().await?)
    }

    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, RegistryError> {
        Ok(self.backend.fetch_products().await?)
    }

    /// Validates the form, then registers the client. Returns the backend's message.
    #[instrument(fields(customer_name = %form.name), skip(self, form))]
    pub async fn register_customer(&self, form: NewCustomer) -> Result<String, RegistryError> {
        let form = form.validated().map_err(RegistryError::Validation)?;
        let reply = self.backend.create_customer(&form).await?;
        accepted(reply, "Client registered")
    }

    #[instrument(skip(self))]
    pub async fn delete_customer(&self, id: &str) -> Result<String, RegistryError> {
        let id = required_id(id)?;
        let reply = self.backend.delete_customer(id).await?;
        accepted(reply, "Client deleted")
    }

    #[instrument(fields(product_name = %form.name), skip(self, form))]
    pub async fn register_product(&self, form: NewProduct) -> Result<String, RegistryError> {
        let form = form.validated().map_err(RegistryError::Validation)?;
        let reply = self.backend.create_product(&form).await?;
        accepted(reply, "Product registered")
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> Result<String, RegistryError> {
        let id = required_id(id)?;
        let reply = self.backend.delete_product(id).await?;
        accepted(reply, "Product deleted")
    }

    /// Downloads a report and writes it to `target`, or to the backend's
    /// default file name in the working directory. Returns the written path.
    #[instrument(skip(self, report, target), fields(report = report.name()))]
    pub async fn save_report(&self, report: ReportKind, target: Option<&Path>) -> Result<PathBuf, RegistryError> {
        let bytes = self.backend.download_report(report).await.map_err(|e| match e {
            ApiError::Status { message, .. } if !message.is_empty() => RegistryError::Rejected(message),
            other => RegistryError::Backend(other),
        })?;

        let path = target
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(report.default_file_name(Local::now().date_naive())));
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| RegistryError::Io(format!("{}: {}", path.display(), e)))?;

        info!(path = %path.display(), bytes = bytes.len(), "Report saved");
        Ok(path)
    }
}

fn required_id(id: &str) -> Result<&str, RegistryError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(RegistryError::Validation("id is required".to_string()));
    }
    Ok(id)
}

fn accepted(reply: ApiReply, fallback: &str) -> Result<String, RegistryError> {
    if !reply.success {
        warn!(message = %reply.message, "Backend rejected the request");
        return Err(RegistryError::Rejected(reply.message));
    }
    info!(message = %reply.message, "Request accepted");
    if reply.message.is_empty() {
        Ok(fallback.to_string())
    } else {
        Ok(reply.message)
    }
}
