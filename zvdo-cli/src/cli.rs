// zvdo-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use zvdo_core::config::{DEFAULT_OUTPUT_DIR, DEFAULT_OVERLAY};

const HELP_TEMPLATE: &str = "\
{name}/{version}

Usage:
  {usage}

{all-args}{after-help}";

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    name = "zvdo",
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "zvdo: convert numbered MP4 files into HLS segments and a YAML playlist",
    help_template = HELP_TEMPLATE,
    disable_version_flag = true
)]
pub struct Cli {
    /// Current working directory, default is the process's current directory
    #[arg(value_name = "CWD")]
    pub cwd: Option<PathBuf>,

    /// Base URL for m3u8 files
    #[arg(short, long, value_name = "URL")]
    pub base: Option<String>,

    /// Output directory for m3u8 files, relative to CWD
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Segment time in seconds for m3u8 files
    // Kept as text: validation and its diagnostic belong to the resolver.
    #[arg(short, long, value_name = "SECONDS", default_value = "30")]
    pub segment: String,

    /// Watermark image path, relative to CWD
    #[arg(short, long, value_name = "PATH")]
    pub watermark: Option<PathBuf>,

    /// Overlay position for the watermark
    #[arg(long, value_name = "X:Y", default_value = DEFAULT_OVERLAY)]
    pub overlay: String,

    /// Display version number
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["zvdo", "--base", "https://cdn/"]);

        assert!(cli.cwd.is_none());
        assert_eq!(cli.base.as_deref(), Some("https://cdn/"));
        assert_eq!(cli.output, PathBuf::from("output"));
        assert_eq!(cli.segment, "30");
        assert!(cli.watermark.is_none());
        assert_eq!(cli.overlay, "1780:940");
    }

    #[test]
    fn test_parse_all_options() {
        let cli = Cli::parse_from([
            "zvdo", "videos", "-b", "https://cdn/", "-o", "hls", "-s", "10", "-w", "logo.png",
            "--overlay", "10:20",
        ]);

        assert_eq!(cli.cwd, Some(PathBuf::from("videos")));
        assert_eq!(cli.output, PathBuf::from("hls"));
        assert_eq!(cli.segment, "10");
        assert_eq!(cli.watermark, Some(PathBuf::from("logo.png")));
        assert_eq!(cli.overlay, "10:20");
    }

    #[test]
    fn test_missing_base_is_left_to_resolver() {
        let cli = Cli::try_parse_from(["zvdo"]).unwrap();
        assert!(cli.base.is_none());
    }

    #[test]
    fn test_help_and_version_short_circuit() {
        let help = Cli::try_parse_from(["zvdo", "-h", "--segment", "0"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);
        assert!(!help.use_stderr());

        let version = Cli::try_parse_from(["zvdo", "-v"]).unwrap_err();
        assert_eq!(version.kind(), ErrorKind::DisplayVersion);
        assert!(!version.use_stderr());
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let err = Cli::try_parse_from(["zvdo", "--base", "u", "--bogus"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert!(err.use_stderr());
    }
}
