//! Strategy interface for turning a discovery request into metadata.
//!
//! The discovery pipeline only depends on this trait. The shipped
//! implementation runs an external program ([`ProcessStrategy`]); tests and
//! embedders can resolve in-process instead.

mod process;

pub use process::ProcessStrategy;

use crate::error::DiscoverError;
use crate::identifier::DiscoveryRequest;
use crate::schema::Metadata;
use crate::sources::StrategyConfig;

/// Prefix of every strategy program's file name.
pub const BINARY_PREFIX: &str = "abd-";

/// Returns the file name of the program implementing `strategy`.
pub fn binary_name(strategy: &str) -> String {
    format!("{BINARY_PREFIX}{strategy}")
}

/// Resolves a request using the stanza that selected this strategy.
pub trait Strategy {
    fn resolve(
        &self,
        request: &DiscoveryRequest,
        config: &StrategyConfig,
    ) -> Result<Metadata, DiscoverError>;
}

impl<S: Strategy + ?Sized> Strategy for &S {
    fn resolve(
        &self,
        request: &DiscoveryRequest,
        config: &StrategyConfig,
    ) -> Result<Metadata, DiscoverError> {
        (**self).resolve(request, config)
    }
}
