// ============================================================================
// zvdo-core/src/processing.rs
// ============================================================================
//
// PROCESSING: The Conversion Pipeline
//
// run() executes the whole pipeline for one configuration:
//
//   prepare output dir -> find sources -> check tools -> per-file loop -> playlist
//
// Every step returns on the first error. Segments already written stay on
// disk; the playlist is only written once all files have succeeded.

use crate::config::CoreConfig;
use crate::discovery::{find_source_files, prepare_output_dir};
use crate::error::CoreResult;
use crate::external::{MediaTool, SegmentParams, truncate_duration};
use crate::manifest::{Playlist, Section, write_playlist};
use crate::naming::{generate_section_id, parse_source_name};
use crate::utils::format_duration;

use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub playlist_path: PathBuf,
    pub sections: Vec<Section>,
    pub elapsed: Duration,
}

/// Converts a single source file and returns its playlist record.
pub fn process_file<M: MediaTool>(
    config: &CoreConfig,
    file_name: &str,
    tool: &M,
) -> CoreResult<Section> {
    let name = parse_source_name(file_name)?;
    let id = generate_section_id();
    let input_path = config.source_path(file_name);

    let seconds = tool.probe_duration(&input_path)?;
    let duration = truncate_duration(seconds);

    let params = SegmentParams {
        input_path,
        output_dir: config.output_dir.clone(),
        section_id: id.clone(),
        segment_secs: config.segment_secs,
        watermark: config.watermark.clone(),
        overlay: config.overlay.clone(),
    };
    tool.segment(&params)?;

    Ok(Section {
        slug: name.slug(),
        description: name.title.clone(),
        title: name.title,
        duration,
        source: format!("{}{}.m3u8", config.base_url, id),
    })
}

/// Converts `files` in order, stopping at the first failure.
pub fn process_files<M: MediaTool>(
    config: &CoreConfig,
    files: &[String],
    tool: &M,
) -> CoreResult<Vec<Section>> {
    let mut sections = Vec::with_capacity(files.len());
    for (position, file_name) in files.iter().enumerate() {
        log::info!("Processing: {} ({}/{})", file_name, position + 1, files.len());
        let section = process_file(config, file_name, tool)?;
        log::info!(
            "  {} [{}] {}",
            section.slug,
            format_duration(section.duration as f64),
            section.title
        );
        sections.push(section);
    }
    Ok(sections)
}

/// Runs the full pipeline for `config`.
///
/// # Examples
///
/// ```rust,no_run
/// use zvdo_core::{CoreConfig, run};
/// use zvdo_core::external::FfmpegMediaTool;
/// use std::path::PathBuf;
///
/// let config = CoreConfig::new(PathBuf::from("/videos"), "https://cdn.example.com/");
/// let summary = run(&config, &FfmpegMediaTool::system()).unwrap();
/// println!("{} sections -> {}", summary.sections.len(), summary.playlist_path.display());
/// ```
pub fn run<M: MediaTool>(config: &CoreConfig, tool: &M) -> CoreResult<RunSummary> {
    let start = Instant::now();
    config.validate()?;

    prepare_output_dir(&config.output_dir)?;
    log::debug!("Prepared output directory {}", config.output_dir.display());

    let files = find_source_files(&config.working_dir)?;
    log::info!("Found {} file(s) to process.", files.len());

    tool.check_available()?;

    let sections = process_files(config, &files, tool)?;
    let playlist = Playlist::new(sections);
    let playlist_path = write_playlist(&config.output_dir, &playlist)?;

    Ok(RunSummary {
        playlist_path,
        sections: playlist.sections,
        elapsed: start.elapsed(),
    })
}
