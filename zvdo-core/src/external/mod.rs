// ============================================================================
// zvdo-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffprobe and ffmpeg
//
// The pipeline only talks to media binaries through the MediaTool trait, so
// the naming and manifest logic can be tested without real executables.
//
// KEY COMPONENTS:
// - MediaTool: probe a duration, segment a file, check the binaries exist
// - FfmpegMediaTool: MediaTool built from an FfprobeExecutor and an FfmpegSpawner
// - Dependency checking
// - Mocks for tests (feature "test-mocks")

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Contains the segment command builder and its parameters
pub mod ffmpeg;

/// Contains traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

/// Contains traits and implementations for executing ffprobe commands
pub mod ffprobe_executor;

#[cfg(feature = "test-mocks")]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg::{SegmentParams, build_segment_command};
pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner, run_ffmpeg};
pub use ffprobe_executor::{
    CrateFfprobeExecutor, FfprobeExecutor, duration_from_report, truncate_duration,
};

// ============================================================================
// MEDIA TOOL ABSTRACTION
// ============================================================================

/// The media capabilities the conversion pipeline needs.
pub trait MediaTool {
    /// Duration of `input_path` in fractional seconds.
    fn probe_duration(&self, input_path: &Path) -> CoreResult<f64>;

    /// Writes the segment list and the segments described by `params`.
    fn segment(&self, params: &SegmentParams) -> CoreResult<()>;

    /// Verifies the underlying executables can be started.
    fn check_available(&self) -> CoreResult<()> {
        Ok(())
    }
}

/// `MediaTool` backed by ffprobe and ffmpeg.
///
/// # Examples
///
/// ```rust,no_run
/// use zvdo_core::external::{FfmpegMediaTool, MediaTool};
/// use std::path::Path;
///
/// let tool = FfmpegMediaTool::system();
/// tool.check_available().unwrap();
/// let seconds = tool.probe_duration(Path::new("/videos/01-Intro.mp4")).unwrap();
/// println!("{seconds}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FfmpegMediaTool<P = CrateFfprobeExecutor, S = SidecarSpawner> {
    prober: P,
    spawner: S,
}

impl FfmpegMediaTool {
    /// Uses the `ffprobe` and `ffmpeg` executables found on the PATH.
    pub fn system() -> Self {
        Self::default()
    }
}

impl<P: FfprobeExecutor, S: FfmpegSpawner> FfmpegMediaTool<P, S> {
    pub fn new(prober: P, spawner: S) -> Self {
        Self { prober, spawner }
    }
}

impl<P: FfprobeExecutor, S: FfmpegSpawner> MediaTool for FfmpegMediaTool<P, S> {
    fn probe_duration(&self, input_path: &Path) -> CoreResult<f64> {
        self.prober.get_duration(input_path)
    }

    fn segment(&self, params: &SegmentParams) -> CoreResult<()> {
        run_ffmpeg(&self.spawner, build_segment_command(params), "segment")
    }

    fn check_available(&self) -> CoreResult<()> {
        self.prober.check_available()?;
        self.spawner.check_available()
    }
}

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that `cmd_name` can be started by running it with `-version`.
///
/// # Returns
///
/// * `Ok(())` - The command started
/// * `Err(CoreError::DependencyNotFound)` - The command is not on the PATH
/// * `Err(CoreError::CommandStart)` - The command exists but failed to start
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", cmd_name);
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", cmd_name, e);
            Err(CoreError::CommandStart(cmd_name.to_string(), e))
        }
    }
}
