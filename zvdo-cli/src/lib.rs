// zvdo-cli/src/lib.rs
//
// Library portion of the zvdo CLI application.
// Contains argument definitions, the argument resolver and command logic.

pub mod args;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

// Re-export items needed by the binary or integration tests
pub use args::resolve_config;
pub use cli::Cli;
pub use commands::convert::run_convert;
