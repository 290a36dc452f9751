// zvdo-cli/src/args.rs
//
// Turns parsed command-line arguments into a validated CoreConfig.
//
// Validation order: base URL, segment time, working directory. Nothing on
// disk is touched here.

use crate::cli::Cli;
use crate::error::{CliErrorContext, CliResult};

use std::path::PathBuf;

use zvdo_core::config::{CoreConfig, parse_segment_time, resolve_against};
use zvdo_core::CoreError;

/// Resolves `cli` against the process's current directory.
pub fn resolve_config(cli: Cli) -> CliResult<CoreConfig> {
    let current_dir = std::env::current_dir()
        .cli_with_context(|| "Failed to determine current directory")?;
    resolve_config_in(cli, current_dir)
}

/// Resolves `cli` with `current_dir` standing in for the process's current directory.
pub fn resolve_config_in(cli: Cli, current_dir: PathBuf) -> CliResult<CoreConfig> {
    let base_url = cli.base.ok_or(CoreError::MissingBaseUrl)?;
    let segment_secs = parse_segment_time(&cli.segment)?;

    let requested_dir = match cli.cwd {
        Some(dir) => resolve_against(&current_dir, &dir),
        None => current_dir,
    };
    if !requested_dir.is_dir() {
        return Err(CoreError::NotADirectory(requested_dir));
    }
    let working_dir = requested_dir
        .canonicalize()
        .cli_with_context(|| format!("Invalid working directory '{}'", requested_dir.display()))?;

    let config = CoreConfig {
        output_dir: resolve_against(&working_dir, &cli.output),
        watermark: cli.watermark.map(|w| resolve_against(&working_dir, &w)),
        base_url,
        segment_secs,
        overlay: cli.overlay,
        working_dir,
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["zvdo"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn test_defaults_resolve_against_working_dir() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();

        let config = resolve_config_in(parse(&["-b", "https://cdn/"]), root.clone()).unwrap();

        assert_eq!(config.working_dir, root);
        assert_eq!(config.output_dir, root.join("output"));
        assert_eq!(config.base_url, "https://cdn/");
        assert_eq!(config.segment_secs, 30);
        assert_eq!(config.overlay, "1780:940");
        assert!(config.watermark.is_none());
    }

    #[test]
    fn test_positional_cwd_and_relative_paths() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        std::fs::create_dir(root.join("videos")).unwrap();

        let cli = parse(&["videos", "-b", "u/", "-o", "../hls", "-w", "logo.png", "-s", "12"]);
        let config = resolve_config_in(cli, root.clone()).unwrap();

        let videos = root.join("videos");
        assert_eq!(config.working_dir, videos);
        assert_eq!(config.output_dir, videos.join("../hls"));
        assert_eq!(config.watermark, Some(videos.join("logo.png")));
        assert_eq!(config.segment_secs, 12);
    }

    #[test]
    fn test_absolute_output_is_kept() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("elsewhere");
        let cli = parse(&["-b", "u/", "-o", out.to_str().unwrap()]);

        let config = resolve_config_in(cli, dir.path().to_path_buf()).unwrap();
        assert_eq!(config.output_dir, out);
    }

    #[test]
    fn test_missing_base() {
        let dir = tempdir().unwrap();
        let result = resolve_config_in(parse(&["-s", "0"]), dir.path().to_path_buf());
        // Base is checked before the segment time.
        assert!(matches!(result, Err(CoreError::MissingBaseUrl)));
    }

    #[test]
    fn test_empty_base_is_accepted() {
        let dir = tempdir().unwrap();
        let config = resolve_config_in(parse(&["-b", ""]), dir.path().to_path_buf()).unwrap();
        assert_eq!(config.base_url, "");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_output_is_rejected() {
        use std::ffi::{OsStr, OsString};
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        let args: Vec<OsString> = vec![
            "zvdo".into(),
            "-b".into(),
            "u/".into(),
            "-o".into(),
            OsStr::from_bytes(b"hls\xff").to_os_string(),
        ];

        let result = resolve_config_in(Cli::parse_from(args), dir.path().to_path_buf());
        assert!(matches!(result, Err(CoreError::NonUtf8Path(_))));
        assert!(!dir.path().join(OsStr::from_bytes(b"hls\xff")).exists());
    }

    #[test]
    fn test_invalid_segment() {
        let dir = tempdir().unwrap();
        for bad in ["0", "abc", "-3"] {
            let segment = format!("--segment={bad}");
            let result =
                resolve_config_in(parse(&["-b", "u/", &segment]), dir.path().to_path_buf());
            assert!(matches!(result, Err(CoreError::InvalidSegmentTime(_))), "segment {bad}");
        }
    }

    #[test]
    fn test_working_dir_must_be_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("file.mp4"), "x").unwrap();

        let missing = resolve_config_in(parse(&["nope", "-b", "u/"]), dir.path().to_path_buf());
        assert!(matches!(missing, Err(CoreError::NotADirectory(_))));

        let file = resolve_config_in(parse(&["file.mp4", "-b", "u/"]), dir.path().to_path_buf());
        assert!(matches!(file, Err(CoreError::NotADirectory(_))));
    }
}
