//! The YAML playlist manifest.
//!
//! The manifest is a mapping with one key, `sections`, holding one record per
//! converted file in processing order. It is written once, after every file
//! has been converted.

use crate::config::PLAYLIST_FILENAME;
use crate::error::{CoreError, CoreResult};

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// One converted video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub slug: String,
    pub description: String,
    /// Whole seconds, truncated toward zero.
    pub duration: u64,
    /// Playback URL of the section's segment index.
    pub source: String,
}

/// The document written to `_playlist.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub sections: Vec<Section>,
}

impl Playlist {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Serializes the playlist to YAML text.
    pub fn to_yaml(&self) -> CoreResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Writes `playlist` to `_playlist.yml` inside `output_dir`, replacing any
/// existing file. The text goes to a temporary file first and is renamed into
/// place, so the manifest either appears complete or not at all.
pub fn write_playlist(output_dir: &Path, playlist: &Playlist) -> CoreResult<PathBuf> {
    let yaml = playlist.to_yaml()?;
    let target = output_dir.join(PLAYLIST_FILENAME);

    let mut temp = NamedTempFile::new_in(output_dir)?;
    temp.write_all(yaml.as_bytes())?;
    temp.flush()?;
    temp.persist(&target).map_err(|e| {
        CoreError::PathError(format!(
            "Failed to write playlist '{}': {}",
            target.display(),
            e.error
        ))
    })?;

    log::debug!("Wrote {} section(s) to {}", playlist.sections.len(), target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn section(title: &str, slug: &str, duration: u64, source: &str) -> Section {
        Section {
            title: title.to_string(),
            slug: slug.to_string(),
            description: title.to_string(),
            duration,
            source: source.to_string(),
        }
    }

    #[test]
    fn test_yaml_layout() {
        let playlist = Playlist::new(vec![
            section("Intro", "v01", 12, "https://cdn.example.com/abc.m3u8"),
            section("Outro", "v02", 5, "https://cdn.example.com/def.m3u8"),
        ]);

        let yaml = playlist.to_yaml().unwrap();
        assert!(yaml.starts_with("sections:\n"));

        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        let sections = value["sections"].as_sequence().unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0]["title"].as_str(), Some("Intro"));
        assert_eq!(sections[0]["duration"].as_u64(), Some(12));
        assert_eq!(sections[1]["slug"].as_str(), Some("v02"));

        // Field order follows the record definition.
        let first = sections[0].as_mapping().unwrap();
        let keys: Vec<&str> = first.keys().filter_map(|k| k.as_str()).collect();
        assert_eq!(keys, ["title", "slug", "description", "duration", "source"]);
    }

    #[test]
    fn test_yaml_quotes_ambiguous_titles() {
        let playlist = Playlist::new(vec![section("yes: no", "v01", 1, "u")]);
        let parsed: Playlist = serde_yaml::from_str(&playlist.to_yaml().unwrap()).unwrap();
        assert_eq!(parsed, playlist);
    }

    #[test]
    fn test_write_playlist_overwrites() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(PLAYLIST_FILENAME), "stale").unwrap();

        let playlist = Playlist::new(vec![section("Intro", "v01", 12, "u")]);
        let path = write_playlist(dir.path(), &playlist).unwrap();

        assert_eq!(path, dir.path().join(PLAYLIST_FILENAME));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("stale"));
        let parsed: Playlist = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed, playlist);

        // No temporary files left behind.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
