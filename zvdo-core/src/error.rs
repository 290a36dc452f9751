// ============================================================================
// zvdo-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Core Error Type and Constructors
//
// Every failure in the conversion pipeline is a CoreError. Configuration
// errors are raised before any side effect, input errors after the output
// directory has been prepared, and external-tool errors abort the run
// before the playlist is written.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors produced by the zvdo core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path error: {0}")]
    PathError(String),

    // ---- Configuration ----
    #[error("Missing base URL")]
    MissingBaseUrl,

    #[error("Invalid segment time '{0}'")]
    InvalidSegmentTime(String),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    // ---- Input ----
    #[error("No mp4 files found in {}", .0.display())]
    NoFilesFound(PathBuf),

    #[error("Invalid source file name '{0}': expected <index>-<title>.mp4")]
    InvalidSourceName(String),

    // ---- External tools ----
    #[error("Required dependency '{0}' not found")]
    DependencyNotFound(String),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("Failed waiting for {0}: {1}")]
    CommandWait(String, #[source] std::io::Error),

    #[error("{0} exited with {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("Failed reading output of {0}: {1}")]
    CommandOutput(String, String),

    #[error("ffprobe output error: {0}")]
    FfprobeParse(String),

    // ---- Manifest ----
    #[error("Failed to serialize playlist: {0}")]
    Manifest(#[from] serde_yaml::Error),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result alias used throughout zvdo-core.
pub type CoreResult<T> = Result<T, CoreError>;

/// Builds a `CommandStart` error for a process that could not be spawned.
pub fn command_start_error(cmd: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

/// Builds a `CommandWait` error for a process whose exit could not be collected.
pub fn command_wait_error(cmd: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

/// Builds a `CommandFailed` error for a process that exited unsuccessfully.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(cmd.into(), status, stderr.into())
}
