//! `abd-https-dns`: walk-up lookup of `https://<domain>/.abd/<path>`, shortening
//! the path one segment at a time until the domain answers.

use std::process::ExitCode;

use abd_core::logging;
use abd_core::plugin;
use abd_core::schema::PluginError;
use abd_core::walkup::{HttpLookup, WalkUp};

fn main() -> ExitCode {
    logging::init_plugin_logging();

    plugin::run(|invocation| {
        tracing::debug!("walking up from {}", invocation.identifier);
        WalkUp::new(HttpLookup::default())
            .resolve(&invocation.identifier, &invocation.labels)
            .map_err(|e| PluginError::new(format!("{e:#}")))
    })
}
