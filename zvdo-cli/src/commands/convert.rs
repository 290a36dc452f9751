//! The conversion run: hands the resolved configuration to zvdo-core and
//! reports the outcome.

use crate::error::CliResult;

use log::info;
use zvdo_core::external::{FfmpegMediaTool, MediaTool};
use zvdo_core::{CoreConfig, format_duration};

/// Runs the conversion with the system ffprobe/ffmpeg.
pub fn run_convert(config: &CoreConfig) -> CliResult<()> {
    run_convert_with(config, &FfmpegMediaTool::system())
}

/// Runs the conversion with an explicit media tool.
pub fn run_convert_with<M: MediaTool>(config: &CoreConfig, tool: &M) -> CliResult<()> {
    info!("Working directory: {}", config.working_dir.display());
    info!("Output directory: {}", config.output_dir.display());
    if let Some(watermark) = &config.watermark {
        info!("Watermark: {} at {}", watermark.display(), config.overlay);
    }

    let summary = zvdo_core::run(config, tool)?;

    info!(
        "Wrote {} section(s) to {}",
        summary.sections.len(),
        summary.playlist_path.display()
    );
    info!(
        "Total execution time: {}",
        format_duration(summary.elapsed.as_secs_f64())
    );
    Ok(())
}
