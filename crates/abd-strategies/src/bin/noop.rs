//! `abd-noop`: refuses every request. Useful as a catch-all stanza that stops
//! discovery from falling through to a network strategy.

use std::process::ExitCode;

use abd_core::logging;
use abd_core::plugin;
use abd_core::schema::PluginError;

fn main() -> ExitCode {
    logging::init_plugin_logging();

    plugin::run(|invocation| {
        Err(PluginError::new(format!(
            "refusing to discover {:?}, configured to be a noop",
            invocation.identifier
        )))
    })
}
