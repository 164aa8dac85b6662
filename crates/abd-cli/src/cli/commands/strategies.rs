//! `abd strategies` – show stanzas in the order selection walks them.

use abd_core::config::AbdSettings;
use abd_core::sources;
use abd_core::strategy::ProcessStrategy;
use anyhow::Result;

pub fn run_strategies(settings: &AbdSettings) -> Result<()> {
    let configs = sources::load_all(&settings.config_dir)?;
    let runner = ProcessStrategy::new(&settings.strategy_dir);

    println!("{:<4} {:<24} {:<16} {}", "#", "PREFIX", "STRATEGY", "PROGRAM");
    for (i, c) in configs.iter().enumerate() {
        let path = runner.binary_path(&c.strategy);
        let missing = if path.exists() { "" } else { " (missing)" };
        println!(
            "{:<4} {:<24} {:<16} {}{}",
            i + 1,
            c.prefix,
            c.strategy,
            path.display(),
            missing
        );
    }
    Ok(())
}
