//! Shared wiring handed to every component

use std::sync::Arc;

use crate::api::{HorseApi, HttpClient, OwnerApi};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::ui::{Confirmer, Navigator, Notifier};

/// Services and collaborators a component needs. Cloning is cheap.
#[derive(Clone)]
pub struct AppContext {
    pub horses: Arc<dyn HorseApi>,
    pub owners: Arc<dyn OwnerApi>,
    pub notifier: Arc<dyn Notifier>,
    pub confirmer: Arc<dyn Confirmer>,
    pub navigator: Arc<dyn Navigator>,
    pub config: ClientConfig,
}

impl AppContext {
    pub fn new(
        horses: Arc<dyn HorseApi>,
        owners: Arc<dyn OwnerApi>,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
        navigator: Arc<dyn Navigator>,
        config: ClientConfig,
    ) -> Self {
        Self {
            horses,
            owners,
            notifier,
            confirmer,
            navigator,
            config,
        }
    }

    /// Context backed by a single `HttpClient` for both services
    pub fn over_http(
        config: ClientConfig,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let client = Arc::new(HttpClient::new(&config)?);
        Ok(Self::new(
            client.clone(),
            client,
            notifier,
            confirmer,
            navigator,
            config,
        ))
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("backend_url", &self.config.backend_url)
            .finish_non_exhaustive()
    }
}
