//! One discovery call: parse input, load stanzas, select, resolve.
//!
//! Stanzas are re-read on every call; nothing is cached between calls.

use std::path::PathBuf;

use crate::config::AbdSettings;
use crate::error::DiscoverError;
use crate::identifier::DiscoveryRequest;
use crate::schema::Metadata;
use crate::sources;
use crate::strategy::{ProcessStrategy, Strategy};

pub struct Discoverer<S> {
    config_dir: PathBuf,
    strategy: S,
}

impl Discoverer<ProcessStrategy> {
    /// Discoverer that runs strategy programs from `settings.strategy_dir`.
    pub fn from_settings(settings: &AbdSettings) -> Self {
        Self::new(
            settings.config_dir.clone(),
            ProcessStrategy::new(settings.strategy_dir.clone()),
        )
    }
}

impl<S: Strategy> Discoverer<S> {
    pub fn new(config_dir: impl Into<PathBuf>, strategy: S) -> Self {
        Self {
            config_dir: config_dir.into(),
            strategy,
        }
    }

    /// Resolves `identifier,label=value,...` to metadata.
    ///
    /// Input is validated before any stanza is read so a malformed request
    /// never reaches a strategy.
    pub fn discover(&self, input: &str) -> Result<Metadata, DiscoverError> {
        let request = DiscoveryRequest::parse(input)?;
        let configs = sources::load_all(&self.config_dir)?;
        let config = sources::select(&request.identifier, &configs)?;
        tracing::info!(
            "identifier {} matched prefix {:?}, using strategy {}",
            request.identifier,
            config.prefix,
            config.strategy
        );
        self.strategy.resolve(&request, config)
    }
}

/// Convenience wrapper: discover with process-backed strategies.
pub fn discover(input: &str, settings: &AbdSettings) -> Result<Metadata, DiscoverError> {
    Discoverer::from_settings(settings).discover(input)
}
