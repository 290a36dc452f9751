// ============================================================================
// zvdo-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: FFmpeg Process Management and Abstraction
//
// This module provides abstractions for spawning and interacting with FFmpeg
// processes. Commands are built with ffmpeg-sidecar's FfmpegCommand and run
// to completion; the event stream is drained so ffmpeg never blocks on a
// full stderr pipe.
//
// KEY COMPONENTS:
// - FfmpegProcess: Trait representing an active FFmpeg process
// - FfmpegSpawner: Trait for creating new FFmpeg processes
// - SidecarSpawner: Concrete implementation using ffmpeg-sidecar
// - run_ffmpeg: Spawn, drain events, wait and check the exit status

use crate::error::{
    CoreError, CoreResult, command_failed_error, command_start_error, command_wait_error,
};
use crate::external::check_dependency;
use ffmpeg_sidecar::child::FfmpegChild as SidecarChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use std::fmt;
use std::process::ExitStatus;

// --- FFmpeg Execution Abstraction ---

/// Trait representing an active ffmpeg process instance.
pub trait FfmpegProcess {
    /// Processes events from the running command using a provided handler closure.
    fn handle_events<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>;

    /// Waits for the command to complete and returns its exit status.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Trait representing something that can spawn an FfmpegProcess.
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;
    /// Spawns the ffmpeg command, consuming the command object.
    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;

    /// Verifies the ffmpeg backend can be used.
    fn check_available(&self) -> CoreResult<()> {
        Ok(())
    }
}

// --- Concrete Implementation using ffmpeg-sidecar ---

fn iterator_error(err: impl fmt::Display) -> CoreError {
    CoreError::CommandOutput("ffmpeg (sidecar)".to_string(), err.to_string())
}

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild` implementing `FfmpegProcess`.
pub struct SidecarProcess(SidecarChild);

impl FfmpegProcess for SidecarProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let iterator = self.0.iter().map_err(|e| {
            log::error!("Failed to get ffmpeg event iterator: {}", e);
            iterator_error(e)
        })?;
        for event in iterator {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.0
            .wait()
            .map_err(|e| command_wait_error("ffmpeg (sidecar)", e))
    }
}

/// Concrete implementation of `FfmpegSpawner` using `ffmpeg-sidecar`.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        cmd.spawn()
            .map(SidecarProcess)
            .map_err(|e| command_start_error("ffmpeg (sidecar)", e))
    }

    fn check_available(&self) -> CoreResult<()> {
        check_dependency("ffmpeg")
    }
}

/// Runs `cmd` to completion through `spawner`.
///
/// Error lines reported by ffmpeg are logged and kept; the last one becomes
/// the message of the returned error if the process exits unsuccessfully.
pub fn run_ffmpeg<S: FfmpegSpawner>(
    spawner: &S,
    cmd: FfmpegCommand,
    context: &str,
) -> CoreResult<()> {
    log::debug!("Running ffmpeg ({}): {:?}", context, cmd);

    let mut process = spawner.spawn(cmd)?;
    let mut last_error: Option<String> = None;

    process.handle_events(|event| {
        match event {
            FfmpegEvent::Error(line)
            | FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, line) => {
                log::warn!("ffmpeg: {}", line);
                last_error = Some(line);
            }
            FfmpegEvent::Progress(progress) => {
                log::debug!("ffmpeg progress: time={} speed={}x", progress.time, progress.speed);
            }
            _ => {}
        }
        Ok(())
    })?;

    let status = process.wait()?;
    if !status.success() {
        log::error!("ffmpeg ({}) failed: {}", context, status);
        return Err(command_failed_error(
            format!("ffmpeg ({context})"),
            status,
            last_error.unwrap_or_else(|| "no error output".to_string()),
        ));
    }
    Ok(())
}
