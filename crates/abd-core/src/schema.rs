//! Wire types shared by the resolver and strategy programs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Label name to label value. Ordered so JSON output and query strings are stable.
pub type Labels = BTreeMap<String, String>;

/// Result of a discovery: where an artifact and its signature can be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub identifier: String,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub mirrors: Vec<Mirror>,
}

/// One candidate download location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mirror {
    pub artifact: String,
    pub signature: String,
}

/// Error body a strategy prints on stdout before exiting non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{error}")]
pub struct PluginError {
    pub error: String,
}

impl PluginError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl From<crate::error::DiscoverError> for PluginError {
    fn from(e: crate::error::DiscoverError) -> Self {
        PluginError::new(e.to_string())
    }
}
