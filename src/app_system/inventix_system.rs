use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::backend::InventoryBackend;
use crate::clients::SaleClient;
use crate::config::Settings;
use crate::registry::Registry;
use crate::sale_builder::SaleService;

/// The running application: the sale service task plus the handles the
/// front-end talks to.
pub struct InventixSystem {
    pub sale_client: SaleClient,
    pub registry: Registry,
    handles: Vec<JoinHandle<()>>,
}

impl InventixSystem {
    pub fn new(settings: &Settings, backend: Arc<dyn InventoryBackend>) -> Self {
        let (sale_service, sale_client) = SaleService::new(settings.sale.mailbox_size, backend.clone());
        let sale_handle = tokio::spawn(sale_service.run());

        let registry = Registry::new(backend);

        Self {
            sale_client,
            registry,
            handles: vec![sale_handle],
        }
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        // Clones of the client can outlive the system.
        if let Err(e) = self.sale_client.shutdown().await {
            info!(error = %e, "Sale service already stopped");
        }
        drop(self.sale_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Service task failed: {:?}", e);
                return Err(format!("Service task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_framework::MockBackend;

    #[tokio::test]
    async fn shutdown_waits_for_service() {
        let system = InventixSystem::new(&Settings::default(), Arc::new(MockBackend::new()));
        let client = system.sale_client.clone();

        system.shutdown().await.unwrap();
        assert!(client.get_view().await.is_err());
    }
}
