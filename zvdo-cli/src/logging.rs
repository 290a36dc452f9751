// ============================================================================
// zvdo-cli/src/logging.rs
// ============================================================================
//
// LOGGING: env_logger setup for the CLI
//
// Log records go to stdout so that stderr only ever carries the final
// diagnostic line printed by main(). Verbosity follows RUST_LOG:
// - RUST_LOG=info (default): one line per file plus a summary
// - RUST_LOG=debug: ffmpeg command lines and progress
// - RUST_LOG=trace: everything

use console::style;
use env_logger::{Builder, Env, Target};
use log::Level;
use std::io::Write;

/// Default filter when RUST_LOG is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Label printed in front of non-info records.
fn level_label(level: Level) -> String {
    let label = format!("[{}]", level);
    match level {
        Level::Error => style(label).red().bold().to_string(),
        Level::Warn => style(label).yellow().to_string(),
        Level::Info => label,
        Level::Debug => style(label).magenta().to_string(),
        Level::Trace => style(label).blue().to_string(),
    }
}

/// Initializes the global logger. Safe to call once per process.
pub fn init_logging() {
    Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .target(Target::Stdout)
        .format(|buf, record| {
            if record.level() == Level::Info {
                writeln!(buf, "{}", record.args())
            } else {
                writeln!(buf, "{} {}", level_label(record.level()), record.args())
            }
        })
        .init();
}
