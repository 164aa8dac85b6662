//! Walk-up resolution: probe `domain/path`, then ever shorter paths, until a
//! lookup answers or only the bare domain is left and it fails too.
//!
//! ```text
//! Probing("example.com/a/b") --not found--> Probing("example.com/a")
//! Probing("example.com/a")   --not found--> Probing("example.com")
//! Probing("example.com")     --not found--> Exhausted
//! Probing(_)                 --found------> Done(metadata)
//! ```
//!
//! "Not found" covers any non-200 response and any body that is not a
//! metadata list. Transport failures end the walk immediately.

mod http;

pub use http::HttpLookup;

use crate::schema::{Labels, Metadata};

/// Answer of a single scoped lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(Vec<Metadata>),
    NotFound,
}

/// A metadata authority queried for one `domain` and path `location`.
pub trait MetadataLookup {
    fn lookup(
        &self,
        domain: &str,
        location: &str,
        labels: &Labels,
    ) -> anyhow::Result<LookupOutcome>;
}

/// Position of the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkState {
    Probing(String),
    Done(Metadata),
    Exhausted,
}

#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error("couldn't find artifact")]
    Exhausted,
    #[error(transparent)]
    Lookup(#[from] anyhow::Error),
}

/// Splits `domain/path` at the first `/`; the path may be empty.
pub fn split_domain(remainder: &str) -> (&str, &str) {
    remainder.split_once('/').unwrap_or((remainder, ""))
}

/// Drops the last path segment, or `None` once only the domain is left.
pub fn narrow(remainder: &str) -> Option<String> {
    let trimmed = remainder.trim_end_matches('/');
    trimmed
        .rsplit_once('/')
        .map(|(parent, _)| parent.to_string())
}

pub struct WalkUp<L> {
    lookup: L,
}

impl<L: MetadataLookup> WalkUp<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Performs the lookup for `remainder` and returns the next state.
    pub fn step(&self, remainder: &str, labels: &Labels) -> Result<WalkState, WalkError> {
        let (domain, location) = split_domain(remainder);
        if let LookupOutcome::Found(list) = self.lookup.lookup(domain, location, labels)? {
            // Only the first entry is used; further entries are discarded.
            if let Some(first) = list.into_iter().next() {
                return Ok(WalkState::Done(first));
            }
        }

        Ok(match narrow(remainder) {
            Some(shorter) => {
                tracing::debug!("no metadata at {remainder}, trying {shorter}");
                WalkState::Probing(shorter)
            }
            None => WalkState::Exhausted,
        })
    }

    /// Runs the walk from the full identifier to a terminal state.
    pub fn resolve(&self, identifier: &str, labels: &Labels) -> Result<Metadata, WalkError> {
        let mut state = WalkState::Probing(identifier.to_string());
        loop {
            state = match state {
                WalkState::Probing(remainder) => self.step(&remainder, labels)?,
                WalkState::Done(metadata) => return Ok(metadata),
                WalkState::Exhausted => return Err(WalkError::Exhausted),
            };
        }
    }
}
