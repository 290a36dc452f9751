// ============================================================================
// zvdo-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Core Configuration Structure and Defaults
//
// CoreConfig is built once by the consumer (zvdo-cli) and never mutated.
// Paths are expected to be absolute by the time they reach the core; the
// CLI resolves `output` and `watermark` against the working directory.

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Output directory name used when `--output` is not given.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Target segment duration in seconds.
pub const DEFAULT_SEGMENT_SECS: u32 = 30;

/// Watermark overlay position (`x:y`), handed to ffmpeg's overlay filter as-is.
pub const DEFAULT_OVERLAY: &str = "1780:940";

/// File name of the aggregate manifest inside the output directory.
pub const PLAYLIST_FILENAME: &str = "_playlist.yml";

// ============================================================================
// CORE CONFIGURATION
// ============================================================================

/// Configuration for a single conversion run.
///
/// # Examples
///
/// ```rust
/// use zvdo_core::CoreConfig;
/// use std::path::PathBuf;
///
/// let config = CoreConfig::new(PathBuf::from("/videos"), "https://cdn.example.com/");
/// assert_eq!(config.output_dir, PathBuf::from("/videos/output"));
/// assert_eq!(config.segment_secs, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Directory containing the source `.mp4` files
    pub working_dir: PathBuf,

    /// Directory that receives segments, segment indexes and the playlist
    pub output_dir: PathBuf,

    /// Prefix for every `source` URL in the playlist
    pub base_url: String,

    /// Target duration of each transport-stream segment
    pub segment_secs: u32,

    /// Optional overlay image burned into every output
    pub watermark: Option<PathBuf>,

    /// Overlay position in `x:y` form
    pub overlay: String,
}

impl CoreConfig {
    /// Creates a configuration with default output directory, segment time and overlay.
    pub fn new(working_dir: PathBuf, base_url: impl Into<String>) -> Self {
        let output_dir = working_dir.join(DEFAULT_OUTPUT_DIR);
        Self {
            working_dir,
            output_dir,
            base_url: base_url.into(),
            segment_secs: DEFAULT_SEGMENT_SECS,
            watermark: None,
            overlay: DEFAULT_OVERLAY.to_string(),
        }
    }

    /// Checks the invariants the pipeline relies on.
    ///
    /// Runs before any side effect; a failure here leaves the file system untouched.
    /// An empty `base_url` is allowed and yields relative `source` values.
    pub fn validate(&self) -> CoreResult<()> {
        if self.segment_secs == 0 {
            return Err(CoreError::InvalidSegmentTime(self.segment_secs.to_string()));
        }
        if !self.working_dir.is_dir() {
            return Err(CoreError::NotADirectory(self.working_dir.clone()));
        }
        // Paths are handed to ffmpeg as text.
        let paths = [Some(&self.working_dir), Some(&self.output_dir), self.watermark.as_ref()];
        for path in paths.into_iter().flatten() {
            if path.to_str().is_none() {
                return Err(CoreError::NonUtf8Path(path.clone()));
            }
        }
        Ok(())
    }

    /// Full path of the playlist manifest.
    pub fn playlist_path(&self) -> PathBuf {
        self.output_dir.join(PLAYLIST_FILENAME)
    }

    /// Full path of a source file inside the working directory.
    pub fn source_path(&self, file_name: &str) -> PathBuf {
        self.working_dir.join(file_name)
    }
}

/// Resolves `path` against `base` unless it is already absolute.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Parses a segment duration.
///
/// Accepts what a lenient integer parse would: leading whitespace, an optional
/// sign, then the longest run of digits; anything after the digits is ignored.
/// No digits, zero, negative or out-of-range values are rejected.
pub fn parse_segment_time(raw: &str) -> CoreResult<u32> {
    let invalid = || CoreError::InvalidSegmentTime(raw.to_string());

    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = unsigned
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return Err(invalid());
    }

    let value: u64 = unsigned[..digits_len].parse().map_err(|_| invalid())?;
    if negative || value == 0 {
        return Err(invalid());
    }
    u32::try_from(value).map_err(|_| invalid())
}
