//! Source discovery and output directory preparation.
//!
//! Only the top level of the working directory is scanned. A name qualifies
//! when it ends with `.mp4` exactly (case-sensitive); the returned order is the
//! processing order and therefore the order of the playlist sections.

use crate::error::{CoreError, CoreResult};

use icu_collator::{Collator, CollatorOptions};

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

/// Suffix a file name must carry to be converted.
pub const SOURCE_EXTENSION: &str = ".mp4";

/// Removes `output_dir` recursively (if present) and recreates it empty,
/// including missing parents.
pub fn prepare_output_dir(output_dir: &Path) -> CoreResult<()> {
    match fs::remove_dir_all(output_dir) {
        Ok(()) => log::debug!("Removed previous output directory {}", output_dir.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(CoreError::PathError(format!(
                "Failed to clean output directory '{}': {}",
                output_dir.display(),
                e
            )));
        }
    }

    fs::create_dir_all(output_dir).map_err(|e| {
        CoreError::PathError(format!(
            "Failed to create output directory '{}': {}",
            output_dir.display(),
            e
        ))
    })
}

/// Lists the `.mp4` file names in `dir`, sorted with [`locale_compare`].
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Bare file names (not paths), in processing order
/// * `Err(CoreError::NoFilesFound)` - If no name ends with `.mp4`
/// * `Err(CoreError::Io)` - If the directory cannot be read
///
/// # Examples
///
/// ```rust,no_run
/// use zvdo_core::find_source_files;
/// use std::path::Path;
///
/// let files = find_source_files(Path::new("/path/to/videos")).unwrap();
/// for name in files {
///     println!("{name}");
/// }
/// ```
pub fn find_source_files(dir: &Path) -> CoreResult<Vec<String>> {
    let mut files: Vec<String> = fs::read_dir(dir)?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            match entry.file_name().into_string() {
                Ok(name) => Some(name),
                Err(raw) => {
                    log::debug!("Skipping non UTF-8 file name {:?}", raw);
                    None
                }
            }
        })
        .filter(|name| name.ends_with(SOURCE_EXTENSION))
        .collect();

    if files.is_empty() {
        return Err(CoreError::NoFilesFound(dir.to_path_buf()));
    }

    let collator = root_collator()?;
    files.sort_by(|a, b| locale_compare(&collator, a, b));
    Ok(files)
}

/// Loads the root (language-neutral) Unicode collation at default strength.
pub fn root_collator() -> CoreResult<Collator> {
    Collator::try_new(&Default::default(), CollatorOptions::new()).map_err(|e| {
        CoreError::OperationFailed(format!("Failed to load collation data: {:?}", e))
    })
}

/// Compares two names with `collator`; byte order breaks collation ties.
pub fn locale_compare(collator: &Collator, a: &str, b: &str) -> Ordering {
    collator.compare(a, b).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut names: Vec<&str>) -> Vec<&str> {
        let collator = root_collator().unwrap();
        names.sort_by(|a, b| locale_compare(&collator, a, b));
        names
    }

    #[test]
    fn test_locale_compare_ignores_case_first() {
        assert_eq!(
            sorted(vec!["03-beta.mp4", "01-Zeta.mp4", "02-alpha.mp4"]),
            vec!["01-Zeta.mp4", "02-alpha.mp4", "03-beta.mp4"]
        );
        assert_eq!(sorted(vec!["b.mp4", "A.mp4", "a2.mp4"]), vec!["A.mp4", "a2.mp4", "b.mp4"]);
    }

    #[test]
    fn test_locale_compare_lowercase_before_uppercase() {
        let collator = root_collator().unwrap();
        assert_eq!(locale_compare(&collator, "intro", "Intro"), Ordering::Less);
        assert_eq!(locale_compare(&collator, "Intro", "Intro"), Ordering::Equal);
    }

    #[test]
    fn test_locale_compare_punctuation_before_digits() {
        let collator = root_collator().unwrap();
        assert_eq!(locale_compare(&collator, "_x", "0x"), Ordering::Less);
        assert_eq!(locale_compare(&collator, "9-a", "a-a"), Ordering::Less);
    }

    #[test]
    fn test_locale_compare_orders_punctuation_by_collation_table() {
        // Root collation: '_' < '-' < '.' < '+', unlike code point order.
        assert_eq!(
            sorted(vec!["1-a.mp4", "1_b-x.mp4", "1+c-x.mp4", "1.5-x.mp4"]),
            vec!["1_b-x.mp4", "1-a.mp4", "1.5-x.mp4", "1+c-x.mp4"]
        );
    }
}
