//! CLI command handlers. Each command is in its own file.

mod discover;
mod strategies;

pub use discover::run_discover;
pub use strategies::run_strategies;
