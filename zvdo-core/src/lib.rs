//! Core library for converting numbered MP4 files into HLS segment sets.
//!
//! Given a directory of `<index>-<title>.mp4` files, each file is cut into
//! MPEG-TS segments with an `.m3u8` segment list, optionally with a watermark
//! burned in, and a `_playlist.yml` manifest describing every section is
//! written at the end.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use zvdo_core::{CoreConfig, run};
//! use zvdo_core::external::FfmpegMediaTool;
//! use std::path::PathBuf;
//!
//! let mut config = CoreConfig::new(
//!     PathBuf::from("/path/to/videos"),
//!     "https://cdn.example.com/videos/",
//! );
//! config.segment_secs = 10;
//! config.validate().unwrap();
//!
//! let summary = run(&config, &FfmpegMediaTool::system()).unwrap();
//! for section in &summary.sections {
//!     println!("{} {} {}", section.slug, section.duration, section.source);
//! }
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod manifest;
pub mod naming;
pub mod processing;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, parse_segment_time};
pub use discovery::{find_source_files, locale_compare, prepare_output_dir, root_collator};
pub use error::{CoreError, CoreResult};
pub use manifest::{Playlist, Section, write_playlist};
pub use naming::{SourceName, generate_section_id, make_slug, parse_source_name};
pub use processing::{RunSummary, process_file, process_files, run};
pub use utils::format_duration;
