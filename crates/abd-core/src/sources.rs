//! Strategy stanzas: loading from the config directory and prefix selection.
//!
//! Each file in the directory is a JSON object binding an identifier prefix
//! to a strategy. Order matters: selection walks stanzas in directory listing
//! order and the first match wins, so stanzas are kept in a `Vec` end to end.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::DiscoverError;

/// Prefix that matches every identifier.
pub const WILDCARD_PREFIX: &str = "*";

/// Fields every stanza must carry. Strategy-specific fields are ignored here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct StanzaHeader {
    prefix: String,
    #[serde(alias = "strategyName")]
    strategy: String,
}

/// A parsed stanza plus its verbatim bytes, which are what the strategy receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyConfig {
    pub prefix: String,
    pub strategy: String,
    pub raw: Vec<u8>,
}

impl StrategyConfig {
    /// Parses a stanza, or `None` if the bytes are not a valid stanza.
    pub fn from_bytes(raw: Vec<u8>) -> Option<Self> {
        let header: StanzaHeader = serde_json::from_slice(&raw).ok()?;
        Some(Self {
            prefix: header.prefix,
            strategy: header.strategy,
            raw,
        })
    }

    pub fn matches(&self, identifier: &str) -> bool {
        self.prefix == WILDCARD_PREFIX || identifier.starts_with(&self.prefix)
    }
}

/// Loads every valid stanza in `dir`, in listing order.
///
/// Files that do not parse (editor swap files, notes) are skipped. Fails if the
/// directory cannot be listed or nothing in it parses.
pub fn load_all(dir: &Path) -> Result<Vec<StrategyConfig>, DiscoverError> {
    let unreadable = |source| DiscoverError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    };
    let entries = fs::read_dir(dir).map_err(unreadable)?;

    let mut configs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(unreadable)?;
        let path = entry.path();
        if !path.is_file() {
            tracing::debug!("skipping non-file config entry {}", path.display());
            continue;
        }

        let raw = fs::read(&path).map_err(|source| DiscoverError::ConfigUnreadable {
            path: path.clone(),
            source,
        })?;
        match StrategyConfig::from_bytes(raw) {
            Some(config) => {
                tracing::debug!(
                    "loaded stanza {} (prefix={:?}, strategy={})",
                    path.display(),
                    config.prefix,
                    config.strategy
                );
                configs.push(config);
            }
            None => tracing::debug!("skipping unparseable config file {}", path.display()),
        }
    }

    if configs.is_empty() {
        return Err(DiscoverError::NoValidConfigs(dir.to_path_buf()));
    }
    Ok(configs)
}

/// Picks the first stanza whose prefix matches `identifier`.
///
/// Position decides priority: a wildcard listed before a more specific prefix
/// shadows it.
pub fn select<'a>(
    identifier: &str,
    configs: &'a [StrategyConfig],
) -> Result<&'a StrategyConfig, DiscoverError> {
    configs
        .iter()
        .find(|c| c.matches(identifier))
        .ok_or_else(|| DiscoverError::NoStrategyMatched(identifier.to_string()))
}
