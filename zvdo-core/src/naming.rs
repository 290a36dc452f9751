//! Naming rules for sections: file name parsing, slugs and identifiers.

use crate::discovery::SOURCE_EXTENSION;
use crate::error::{CoreError, CoreResult};

use uuid::Uuid;

/// The two tokens carried by a source file name `<index>-<title>.mp4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceName {
    /// Everything before the first `-`; not required to be numeric.
    pub index: String,
    /// Everything after the first `-`, without the `.mp4` suffix.
    pub title: String,
}

impl SourceName {
    /// Slug for this source, see [`make_slug`].
    pub fn slug(&self) -> String {
        make_slug(&self.index)
    }
}

/// Splits a file name at its first `-` into index and title.
///
/// ```rust
/// use zvdo_core::naming::parse_source_name;
///
/// let name = parse_source_name("01-Getting-Started.mp4").unwrap();
/// assert_eq!(name.index, "01");
/// assert_eq!(name.title, "Getting-Started");
/// ```
pub fn parse_source_name(file_name: &str) -> CoreResult<SourceName> {
    let (index, rest) = file_name
        .split_once('-')
        .ok_or_else(|| CoreError::InvalidSourceName(file_name.to_string()))?;
    let title = rest.strip_suffix(SOURCE_EXTENSION).unwrap_or(rest);

    Ok(SourceName {
        index: index.to_string(),
        title: title.to_string(),
    })
}

/// `v` followed by the index token left-padded with `0` to two characters.
///
/// Padding counts characters, not numeric value: `"7"` → `v07`,
/// `"123"` → `v123`, `"a"` → `v0a`.
pub fn make_slug(index: &str) -> String {
    format!("v{index:0>2}")
}

/// Generates a fresh section identifier: a UUID v4 in simple (32 hex digit) form.
///
/// The id names the segment index, the segment files and the playlist
/// `source` of one section. Ids are random and never checked for collisions;
/// with 122 random bits the chance of a clash among n files is about n²/2¹²³.
pub fn generate_section_id() -> String {
    Uuid::new_v4().simple().to_string()
}
