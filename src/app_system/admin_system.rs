use tracing::{error, info, instrument, warn};

use crate::clients::ProductClient;
use crate::config::AdminConfig;
use crate::controller::PageController;
use crate::error::ProductError;
use crate::http_service::{HttpClient, HttpService};
use crate::renderer::Renderer;

/// Starts the HTTP service, hands out clients and shuts the service down.
pub struct AdminSystem {
    pub product_client: ProductClient,
    http_client: HttpClient,
    config: AdminConfig,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl AdminSystem {
    #[instrument(name = "admin_system", skip(config), fields(base_url = %config.base_url))]
    pub fn new(config: AdminConfig) -> Result<Self, ProductError> {
        info!("Starting admin system");

        let (http_service, http_client) = HttpService::new(
            config.channel_buffer,
            config.base_url.clone(),
            config.request_timeout(),
        )?;
        let handles = vec![tokio::spawn(http_service.run())];
        let product_client = ProductClient::new(http_client.clone());

        info!("Admin system started successfully");

        Ok(Self {
            product_client,
            http_client,
            config,
            handles,
        })
    }

    /// A page controller wired to this system's client and settings.
    pub fn controller<R: Renderer>(&self, renderer: R) -> PageController<R> {
        PageController::from_config(self.product_client.clone(), renderer, &self.config)
    }

    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down admin system");

        if let Err(e) = self.http_client.shutdown().await {
            warn!(error = %e, "HTTP service already stopped");
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
                return Err(format!("Service task failed: {:?}", e));
            }
        }

        info!("Admin system shutdown complete");
        Ok(())
    }
}
