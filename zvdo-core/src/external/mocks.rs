// zvdo-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled only with the "test-mocks" feature (see external/mod.rs).

use super::{FfmpegProcess, FfmpegSpawner, FfprobeExecutor, duration_from_report};
use crate::error::{CoreError, CoreResult};
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::cell::RefCell;
use std::collections::HashMap;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::rc::Rc;

/// Mock implementation of FfmpegProcess.
#[derive(Clone)]
pub struct MockFfmpegProcess {
    /// Events to emit when handle_events is called.
    pub events_to_emit: Rc<RefCell<Vec<FfmpegEvent>>>,
    /// Exit status to return when wait is called.
    pub exit_status: ExitStatus,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let events = self.events_to_emit.borrow().clone();
        for event in events {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

/// Represents an expected ffmpeg command call and its mock result.
pub struct MockFfmpegExpectation {
    pub arg_pattern: String,
    pub result: CoreResult<MockFfmpegProcess>,
    pub create_dummy_output: bool,
}

/// Mock implementation of FfmpegSpawner supporting multiple expectations.
///
/// Each spawned command is matched against the first expectation whose
/// pattern is contained in one of its arguments; the expectation is consumed.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    expectations: Rc<RefCell<Vec<MockFfmpegExpectation>>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_expectation(
        &self,
        arg_pattern: &str,
        result: CoreResult<MockFfmpegProcess>,
        create_dummy_output: bool,
    ) {
        self.expectations.borrow_mut().push(MockFfmpegExpectation {
            arg_pattern: arg_pattern.to_string(),
            result,
            create_dummy_output,
        });
    }

    /// Expect a successful run. With `create_dummy_output`, the segment list
    /// and the first segment are written to the paths found in the arguments.
    pub fn add_success_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        create_dummy_output: bool,
    ) {
        let process = MockFfmpegProcess {
            events_to_emit: Rc::new(RefCell::new(events)),
            exit_status: ExitStatus::from_raw(0),
        };
        self.add_expectation(arg_pattern, Ok(process), create_dummy_output);
    }

    pub fn add_spawn_error_expectation(&self, arg_pattern: &str, error: CoreError) {
        self.add_expectation(arg_pattern, Err(error), false);
    }

    /// Expect a run that exits with `exit_code`.
    pub fn add_exit_error_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        exit_code: i32,
    ) {
        let process = MockFfmpegProcess {
            events_to_emit: Rc::new(RefCell::new(events)),
            // wait(2) status layout: exit code in the second byte
            exit_status: ExitStatus::from_raw(exit_code << 8),
        };
        self.add_expectation(arg_pattern, Ok(process), false);
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }

    pub fn remaining_expectations(&self) -> usize {
        self.expectations.borrow().len()
    }
}

fn write_dummy_segments(args: &[String]) {
    let segment_list = args
        .windows(2)
        .find(|w| w[0] == "-segment_list")
        .map(|w| PathBuf::from(&w[1]));
    let first_segment = args.last().map(|pattern| PathBuf::from(pattern.replace("%03d", "000")));

    if let (Some(list), Some(segment)) = (segment_list, first_segment) {
        let segment_name = segment
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let playlist = format!("#EXTM3U\n#EXTINF:1.0,\n{segment_name}\n#EXT-X-ENDLIST\n");
        for (path, contents) in [(&list, playlist.as_bytes()), (&segment, b"ts".as_slice())] {
            if let Err(e) = std::fs::write(path, contents) {
                log::error!("MockFfmpegSpawner failed to create dummy output {:?}: {}", path, e);
            }
        }
    } else {
        log::warn!("MockFfmpegSpawner couldn't find output paths in args to create dummy files.");
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        self.received_calls.borrow_mut().push(args.clone());

        let mut expectations = self.expectations.borrow_mut();
        let found_index = expectations
            .iter()
            .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)));

        let Some(index) = found_index else {
            panic!("MockFfmpegSpawner: No expectation found for command args: {:?}", args);
        };

        let expectation = expectations.remove(index);
        log::info!(
            "MockFfmpegSpawner: Matched expectation with pattern '{}'",
            expectation.arg_pattern
        );
        if expectation.result.is_ok() && expectation.create_dummy_output {
            write_dummy_segments(&args);
        }
        expectation.result
    }
}

/// Mock implementation of FfprobeExecutor.
#[derive(Clone, Default)]
pub struct MockFfprobeExecutor {
    duration_results: Rc<RefCell<HashMap<PathBuf, CoreResult<f64>>>>,
    received_calls: Rc<RefCell<Vec<PathBuf>>>,
}

impl MockFfprobeExecutor {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add an expected result for get_duration for a specific input path.
    pub fn expect_duration(&self, input_path: &Path, result: CoreResult<f64>) {
        self.duration_results
            .borrow_mut()
            .insert(input_path.to_path_buf(), result);
    }

    /// Answer for `input_path` as if ffprobe reported `raw` as `format.duration`.
    pub fn expect_reported_duration(&self, input_path: &Path, raw: Option<&str>) {
        let seconds = duration_from_report(raw, input_path);
        self.expect_duration(input_path, Ok(seconds));
    }

    pub fn get_received_calls(&self) -> Vec<PathBuf> {
        self.received_calls.borrow().clone()
    }
}

impl FfprobeExecutor for MockFfprobeExecutor {
    fn get_duration(&self, input_path: &Path) -> CoreResult<f64> {
        log::info!("MockFfprobeExecutor::get_duration called for: {}", input_path.display());
        self.received_calls.borrow_mut().push(input_path.to_path_buf());
        match self.duration_results.borrow().get(input_path) {
            Some(Ok(seconds)) => Ok(*seconds),
            // CoreError is not Clone; reconstruct a probe error carrying the message.
            Some(Err(err)) => Err(CoreError::FfprobeParse(format!(
                "Mock ffprobe error for {}: {}",
                input_path.display(),
                err
            ))),
            None => Err(CoreError::FfprobeParse(format!(
                "MockFfprobeExecutor: No expectation set for path {}",
                input_path.display()
            ))),
        }
    }
}
