use std::sync::Arc;

use reqwest::Client;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::{
    config::Config,
    country::{CountryExtractor, PatternExtractor},
    error::{ConfigError, LoadError},
    gate::{AccessGate, SessionStore},
    loader::{CsvSource, load},
    models::Dataset,
};

pub struct AppState {
    pub config: Config,
    pub gate: AccessGate,
    pub sessions: SessionStore,
    source: CsvSource,
    client: Client,
    extractor: Box<dyn CountryExtractor>,
    dataset: OnceCell<Dataset>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Arc<Self>> {
        let extractor =
            PatternExtractor::new(&config.country_pattern).map_err(ConfigError::Pattern)?;

        Self::with_extractor(config, Box::new(extractor))
    }

    pub fn with_extractor(
        config: Config,
        extractor: Box<dyn CountryExtractor>,
    ) -> anyhow::Result<Arc<Self>> {
        let client = Client::builder().timeout(config.fetch_timeout).build()?;
        let source = CsvSource::parse(&config.csv_url);

        Ok(Arc::new(Self {
            gate: AccessGate::new(config.password.clone()),
            sessions: SessionStore::new(),
            source,
            client,
            extractor,
            dataset: OnceCell::new(),
            config,
        }))
    }

    /// Loads the CSV on first use. Failures are not cached, the next call retries.
    pub async fn dataset(&self) -> Result<&Dataset, LoadError> {
        self.dataset
            .get_or_try_init(|| async {
                info!("Loading addresses...");
                load(&self.source, &self.client, self.extractor.as_ref())
                    .await
                    .inspect_err(|e| warn!("Failed to load addresses: {e}"))
            })
            .await
    }
}
