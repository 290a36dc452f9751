//! FFprobe integration for reading media durations.
//!
//! The duration comes from the container's `format.duration` field, which
//! ffprobe reports as fractional seconds. A missing or non-numeric value is
//! recorded as 0; only a failing ffprobe run is an error.
use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use crate::external::check_dependency;
use ffprobe::{FfProbeError, ffprobe};
use std::path::Path;

/// Trait for ffprobe-backed queries, so tests can substitute canned answers.
pub trait FfprobeExecutor {
    /// Returns the duration of `input_path` in (fractional) seconds.
    fn get_duration(&self, input_path: &Path) -> CoreResult<f64>;

    /// Verifies the ffprobe backend can be used.
    fn check_available(&self) -> CoreResult<()> {
        Ok(())
    }
}

/// `FfprobeExecutor` backed by the `ffprobe` crate.
#[derive(Debug, Clone, Default)]
pub struct CrateFfprobeExecutor;

impl CrateFfprobeExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl FfprobeExecutor for CrateFfprobeExecutor {
    fn get_duration(&self, input_path: &Path) -> CoreResult<f64> {
        log::debug!(
            "Running ffprobe (via crate) for duration on: {}",
            input_path.display()
        );
        match ffprobe(input_path) {
            Ok(metadata) => Ok(duration_from_report(
                metadata.format.duration.as_deref(),
                input_path,
            )),
            Err(err) => {
                log::error!("ffprobe failed for duration on {}: {:?}", input_path.display(), err);
                Err(map_ffprobe_error(err, "duration"))
            }
        }
    }

    fn check_available(&self) -> CoreResult<()> {
        check_dependency("ffprobe")
    }
}

/// Parses ffprobe's textual duration (e.g. `"12.700000"`).
pub fn parse_duration(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

/// Seconds for the `format.duration` ffprobe reported for `input_path`,
/// or 0 (with a warning) when it is absent or not a number.
pub fn duration_from_report(raw: Option<&str>, input_path: &Path) -> f64 {
    match raw.map(|r| (r, parse_duration(r))) {
        Some((_, Some(seconds))) => seconds,
        Some((r, None)) => {
            log::warn!("Unparseable duration '{}' for {}, using 0", r, input_path.display());
            0.0
        }
        None => {
            log::warn!("No duration reported for {}, using 0", input_path.display());
            0.0
        }
    }
}

/// Whole seconds, truncated toward zero. Negative and non-finite values become 0.
pub fn truncate_duration(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    }
}

fn map_ffprobe_error(err: FfProbeError, context: &str) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => command_start_error(format!("ffprobe ({context})"), io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error(format!("ffprobe ({context})"), output.status, stderr)
        }
        FfProbeError::Deserialize(err) => {
            CoreError::FfprobeParse(format!("ffprobe {context} output deserialization: {err}"))
        }
        #[allow(unreachable_patterns)]
        _ => CoreError::FfprobeParse(format!("Unknown ffprobe error during {context}: {err:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("12.700000"), Some(12.7));
        assert_eq!(parse_duration(" 5.2\n"), Some(5.2));
        assert_eq!(parse_duration("N/A"), None);
    }

    #[test]
    fn test_duration_from_report_falls_back_to_zero() {
        let path = Path::new("/videos/01-Intro.mp4");
        assert_eq!(duration_from_report(Some("12.700000"), path), 12.7);
        assert_eq!(duration_from_report(Some("N/A"), path), 0.0);
        assert_eq!(duration_from_report(Some(""), path), 0.0);
        assert_eq!(duration_from_report(None, path), 0.0);
    }

    #[test]
    fn test_truncate_duration() {
        assert_eq!(truncate_duration(12.7), 12);
        assert_eq!(truncate_duration(5.2), 5);
        assert_eq!(truncate_duration(0.99), 0);
        assert_eq!(truncate_duration(-3.5), 0);
        assert_eq!(truncate_duration(f64::NAN), 0);
    }
}
