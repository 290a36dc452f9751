// zvdo-cli/src/main.rs
//
// Entry point for the zvdo binary.
//
// Parses arguments, resolves them into a CoreConfig, runs the conversion and
// maps the outcome to an exit status: 0 on success (and for --help and
// --version), 1 for any failure with a single diagnostic line on stderr.
// This is the only place the process exits explicitly.

use clap::Parser;
use console::style;
use std::process;

use zvdo_cli::{Cli, logging, resolve_config, run_convert};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    logging::init_logging();

    let result = resolve_config(cli).and_then(|config| run_convert(&config));

    if let Err(e) = result {
        eprintln!("{}", style(format!("Error: {e}")).for_stderr().red().bold());
        process::exit(1);
    }
}
