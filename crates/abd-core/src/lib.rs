//! ABD resolves `identifier,label=value,...` strings to downloadable mirrors by
//! delegating to strategy programs selected through prefix-matched stanzas.

pub mod config;
pub mod discover;
pub mod error;
pub mod identifier;
pub mod logging;
pub mod plugin;
pub mod schema;
pub mod sources;
pub mod strategy;
pub mod template;
pub mod walkup;

pub use discover::{discover, Discoverer};
pub use error::DiscoverError;
pub use schema::{Labels, Metadata, Mirror, PluginError};
