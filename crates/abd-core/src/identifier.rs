//! Parsing of `identifier,label=value,...` input strings.
//!
//! The same grammar is used by the resolver (to validate before launching a
//! strategy) and by every strategy program (to recover identifier and labels
//! from its single argument).

use crate::error::DiscoverError;
use crate::schema::Labels;

/// A validated discovery request. Keeps the raw input so it can be forwarded
/// to a strategy program unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryRequest {
    pub raw: String,
    pub identifier: String,
    pub labels: Labels,
}

impl DiscoveryRequest {
    pub fn parse(input: &str) -> Result<Self, DiscoverError> {
        let (identifier, labels) = parse(input)?;
        Ok(Self {
            raw: input.to_string(),
            identifier,
            labels,
        })
    }
}

/// Splits `input` into the identifier and its labels.
///
/// The label name ends at the first `=`; everything after it is the value.
pub fn parse(input: &str) -> Result<(String, Labels), DiscoverError> {
    let mut parts = input.split(',');
    let identifier = parts.next().unwrap_or_default();
    if identifier.is_empty() {
        return Err(DiscoverError::EmptyIdentifier);
    }

    let mut labels = Labels::new();
    for part in parts {
        let (name, value) = part
            .split_once('=')
            .ok_or_else(|| DiscoverError::MalformedLabel(part.to_string()))?;
        if labels.contains_key(name) {
            return Err(DiscoverError::DuplicateLabel(name.to_string()));
        }
        labels.insert(name.to_string(), value.to_string());
    }

    Ok((identifier.to_string(), labels))
}
