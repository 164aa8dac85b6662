//! `abd-template`: mirrors produced from the stanza's `template` list by
//! substituting `<identifier>` and `<label>` placeholders.

use std::process::ExitCode;

use abd_core::logging;
use abd_core::plugin;
use abd_core::template::{self, TemplateConfig};

fn main() -> ExitCode {
    logging::init_plugin_logging();

    plugin::run(|invocation| {
        let config: TemplateConfig = invocation.config_as()?;
        Ok(template::render(
            &config,
            &invocation.identifier,
            &invocation.labels,
        ))
    })
}
