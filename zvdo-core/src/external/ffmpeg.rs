//! FFmpeg command building for HLS segmentation.
//!
//! Without a watermark the source streams are copied as-is. With one, the
//! image is overlaid and the result re-encoded with NVENC (video) and AAC
//! (audio). Either way the output goes through ffmpeg's segment muxer into
//! MPEG-TS segments plus an `.m3u8` segment list.

use ffmpeg_sidecar::command::FfmpegCommand;

use std::path::{Path, PathBuf};

/// Hardware video encoder used when a watermark forces a re-encode.
pub const WATERMARK_VIDEO_CODEC: &str = "h264_nvenc";

/// Audio encoder used when a watermark forces a re-encode.
pub const WATERMARK_AUDIO_CODEC: &str = "aac";

/// Parameters for segmenting one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentParams {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    /// Basename shared by the segment list and the segments.
    pub section_id: String,
    pub segment_secs: u32,
    pub watermark: Option<PathBuf>,
    /// `x:y` position for the overlay filter.
    pub overlay: String,
}

impl SegmentParams {
    /// `<output_dir>/<id>.m3u8`
    pub fn segment_list_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.m3u8", self.section_id))
    }

    /// `<output_dir>/<id>-%03d.ts`, expanded by ffmpeg to `-000.ts`, `-001.ts`, ...
    pub fn segment_pattern(&self) -> PathBuf {
        self.output_dir.join(format!("{}-%03d.ts", self.section_id))
    }
}

// CoreConfig::validate rejects non UTF-8 paths, so this never substitutes.
fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Builds the ffmpeg invocation for one source file.
pub fn build_segment_command(params: &SegmentParams) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.arg("-y");
    cmd.input(path_arg(&params.input_path));

    match &params.watermark {
        Some(watermark) => {
            cmd.input(path_arg(watermark));
            cmd.args(["-filter_complex", &format!("overlay={}", params.overlay)]);
            cmd.args(["-c:v", WATERMARK_VIDEO_CODEC]);
            cmd.args(["-c:a", WATERMARK_AUDIO_CODEC]);
        }
        None => {
            cmd.args(["-c", "copy"]);
        }
    }

    cmd.args(["-map", "0"]);
    cmd.args(["-f", "segment"]);
    cmd.args(["-segment_time", &params.segment_secs.to_string()]);
    cmd.args(["-segment_list", &path_arg(&params.segment_list_path())]);
    cmd.args(["-segment_format", "mpegts"]);
    cmd.output(path_arg(&params.segment_pattern()));
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(watermark: Option<&str>) -> SegmentParams {
        SegmentParams {
            input_path: PathBuf::from("/videos/01-Intro.mp4"),
            output_dir: PathBuf::from("/videos/output"),
            section_id: "abc123".to_string(),
            segment_secs: 30,
            watermark: watermark.map(PathBuf::from),
            overlay: "1780:940".to_string(),
        }
    }

    fn args_of(cmd: &FfmpegCommand) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    fn has_pair(args: &[String], flag: &str, value: &str) -> bool {
        args.windows(2).any(|w| w[0] == flag && w[1] == value)
    }

    #[test]
    fn test_copy_command() {
        let args = args_of(&build_segment_command(&params(None)));

        assert!(has_pair(&args, "-i", "/videos/01-Intro.mp4"));
        assert!(has_pair(&args, "-c", "copy"));
        assert!(has_pair(&args, "-map", "0"));
        assert!(has_pair(&args, "-f", "segment"));
        assert!(has_pair(&args, "-segment_time", "30"));
        assert!(has_pair(&args, "-segment_list", "/videos/output/abc123.m3u8"));
        assert!(has_pair(&args, "-segment_format", "mpegts"));
        assert_eq!(args.last().map(String::as_str), Some("/videos/output/abc123-%03d.ts"));
        assert!(!args.iter().any(|a| a == "-filter_complex"));
        assert_eq!(args.iter().filter(|a| *a == "-i").count(), 1);
    }

    #[test]
    fn test_watermark_command() {
        let args = args_of(&build_segment_command(&params(Some("/videos/logo.png"))));

        assert!(has_pair(&args, "-i", "/videos/logo.png"));
        assert!(has_pair(&args, "-filter_complex", "overlay=1780:940"));
        assert!(has_pair(&args, "-c:v", "h264_nvenc"));
        assert!(has_pair(&args, "-c:a", "aac"));
        assert!(!has_pair(&args, "-c", "copy"));

        // Source first, watermark second.
        let inputs: Vec<&String> = args
            .windows(2)
            .filter(|w| w[0] == "-i")
            .map(|w| &w[1])
            .collect();
        assert_eq!(inputs, ["/videos/01-Intro.mp4", "/videos/logo.png"]);
    }
}
