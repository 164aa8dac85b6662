//! Error taxonomy for a single discovery call.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Everything that can go wrong between raw input and returned metadata.
///
/// Input errors are surfaced verbatim; configuration and selection errors are
/// fatal to the call; execution errors carry as much context as the strategy
/// program left behind (exit code, its own message).
#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("no identifier given")]
    EmptyIdentifier,

    #[error("invalid label {0}")]
    MalformedLabel(String),

    #[error("label {0} defined twice")]
    DuplicateLabel(String),

    #[error("cannot read config directory {}: {source}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read config file {}: {source}", path.display())]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no valid config files found in {}", .0.display())]
    NoValidConfigs(PathBuf),

    #[error("no strategies found for identifier {0}")]
    NoStrategyMatched(String),

    #[error("strategy binary {} not found", .0.display())]
    StrategyBinaryMissing(PathBuf),

    #[error("failed to launch strategy {}: {source}", path.display())]
    ProcessLaunch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O with strategy {} failed: {source}", path.display())]
    ProcessIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("strategy returned invalid metadata: {0}")]
    MetadataDecode(#[source] serde_json::Error),

    #[error("exit code {code}: {message}")]
    PluginFailed { code: i32, message: String },

    #[error("strategy {} failed: {status}", path.display())]
    ExecutionFailed { path: PathBuf, status: ExitStatus },
}

impl DiscoverError {
    /// True for errors caused by the caller's input rather than the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DiscoverError::EmptyIdentifier
                | DiscoverError::MalformedLabel(_)
                | DiscoverError::DuplicateLabel(_)
        )
    }
}
