//! Strategy-side half of the protocol.
//!
//! A strategy program receives exactly one argument (`identifier,label=value,...`),
//! reads its stanza from stdin, and prints either metadata (exit 0) or
//! `{"error": "..."}` (exit 1) on stdout. Diagnostics go to stderr.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use serde::de::DeserializeOwned;

use crate::identifier;
use crate::schema::{Labels, Metadata, PluginError};

/// Exit code used whenever a strategy reports an error.
pub const DEFAULT_ERROR_EXIT_CODE: u8 = 1;

/// What a strategy program was asked to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub identifier: String,
    pub labels: Labels,
    /// Raw stanza bytes; strategy-specific fields are the strategy's business.
    pub config: Vec<u8>,
}

impl Invocation {
    /// Reads the invocation from `args` (program name first) and the stanza from `stdin`.
    pub fn read<I, R>(args: I, mut stdin: R) -> Result<Self, PluginError>
    where
        I: IntoIterator<Item = String>,
        R: Read,
    {
        let args: Vec<String> = args.into_iter().collect();
        if args.len() != 2 {
            return Err(PluginError::new(format!(
                "incorrect number of args: {args:?}"
            )));
        }

        let (identifier, labels) = identifier::parse(&args[1])?;

        let mut config = Vec::new();
        stdin
            .read_to_end(&mut config)
            .map_err(|e| PluginError::new(format!("reading configuration: {e}")))?;

        Ok(Self {
            identifier,
            labels,
            config,
        })
    }

    /// Deserializes the stanza into a strategy-specific type.
    pub fn config_as<T: DeserializeOwned>(&self) -> Result<T, PluginError> {
        serde_json::from_slice(&self.config).map_err(|e| PluginError::new(e.to_string()))
    }
}

/// Prints the outcome in protocol form and returns the exit code to use.
pub fn write_outcome<W: Write>(
    out: &mut W,
    outcome: Result<Metadata, PluginError>,
) -> io::Result<u8> {
    let (body, code) = match outcome.map(|m| serde_json::to_string(&m)) {
        Ok(Ok(body)) => (body, 0),
        Ok(Err(e)) => (error_body(&PluginError::new(e.to_string())), DEFAULT_ERROR_EXIT_CODE),
        Err(e) => (error_body(&e), DEFAULT_ERROR_EXIT_CODE),
    };
    writeln!(out, "{body}")?;
    out.flush()?;
    Ok(code)
}

fn error_body(e: &PluginError) -> String {
    // A struct with one string field always serializes.
    serde_json::to_string(e).unwrap_or_else(|_| r#"{"error":"unknown error"}"#.to_string())
}

/// Runs a strategy against the current process's arguments and stdin.
///
/// Intended as the whole body of a strategy's `main`.
pub fn run<F>(strategy: F) -> ExitCode
where
    F: FnOnce(Invocation) -> Result<Metadata, PluginError>,
{
    let args = std::env::args_os().map(|a| a.to_string_lossy().into_owned());
    let outcome = Invocation::read(args, io::stdin().lock()).and_then(strategy);
    if let Err(e) = &outcome {
        tracing::debug!("strategy failed: {e}");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match write_outcome(&mut out, outcome) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("cannot write result to stdout: {e}");
            ExitCode::from(DEFAULT_ERROR_EXIT_CODE)
        }
    }
}
