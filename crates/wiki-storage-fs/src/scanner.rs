//! Page discovery by globbing the pages directory.
//!
//! The scanner only identifies which titles exist. Reading page bodies is
//! left to `FsStorage::load`.

use std::path::Path;

use wiki_storage::is_valid_title;

/// Discovers page titles by matching `{pages_dir}/*.{extension}`.
pub(crate) struct Scanner {
    pattern: String,
    extension: &'static str,
}

impl Scanner {
    /// Create a new Scanner.
    ///
    /// # Arguments
    ///
    /// * `pages_dir` - Directory holding one file per page
    /// * `extension` - Recognized file extension, without the dot
    pub(crate) fn new(pages_dir: &Path, extension: &'static str) -> Self {
        let escaped_dir = glob::Pattern::escape(&pages_dir.to_string_lossy());
        Self {
            pattern: format!("{escaped_dir}/*.{extension}"),
            extension,
        }
    }

    /// Scan the pages directory and return the sorted titles found there.
    ///
    /// Returns an empty Vec if the directory doesn't exist. Entries that can't
    /// be read are skipped with a warning. Files whose stem is not a valid
    /// title are skipped, since no route could ever reach them.
    pub(crate) fn scan(&self) -> Result<Vec<String>, glob::PatternError> {
        let mut titles: Vec<String> = glob::glob(&self.pattern)?
            .filter_map(|entry| match entry {
                Ok(path) => self.title_from_path(&path),
                Err(e) => {
                    tracing::warn!(
                        path = %e.path().display(),
                        error = %e.error(),
                        "Skipping unreadable entry"
                    );
                    None
                }
            })
            .collect();
        titles.sort();
        Ok(titles)
    }

    /// Derive a page title from a matched file path.
    fn title_from_path(&self, path: &Path) -> Option<String> {
        if path.extension().is_none_or(|ext| ext != self.extension) {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        if is_valid_title(stem) {
            Some(stem.to_owned())
        } else {
            tracing::debug!(path = %path.display(), "Skipping file with invalid page title");
            None
        }
    }

    /// The glob pattern used for discovery.
    #[cfg(test)]
    pub(crate) fn pattern(&self) -> std::path::PathBuf {
        std::path::PathBuf::from(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_scan_missing_dir() {
        let scanner = Scanner::new(Path::new("/nonexistent/pages"), "txt");

        assert!(scanner.scan().unwrap().is_empty());
    }

    #[test]
    fn test_scan_finds_txt_files_sorted() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("Zebra.txt"), "z").unwrap();
        fs::write(temp_dir.path().join("Apple.txt"), "a").unwrap();
        fs::write(temp_dir.path().join("notes.md"), "ignored").unwrap();

        let scanner = Scanner::new(temp_dir.path(), "txt");

        assert_eq!(scanner.scan().unwrap(), vec!["Apple", "Zebra"]);
    }

    #[test]
    fn test_scan_skips_invalid_titles() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("Good.txt"), "ok").unwrap();
        fs::write(temp_dir.path().join("has-dash.txt"), "no").unwrap();
        fs::write(temp_dir.path().join("with space.txt"), "no").unwrap();

        let scanner = Scanner::new(temp_dir.path(), "txt");

        assert_eq!(scanner.scan().unwrap(), vec!["Good"]);
    }

    #[test]
    fn test_scan_does_not_recurse() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir(temp_dir.path().join("nested")).unwrap();
        fs::write(temp_dir.path().join("nested/Deep.txt"), "x").unwrap();

        let scanner = Scanner::new(temp_dir.path(), "txt");

        assert!(scanner.scan().unwrap().is_empty());
    }

    #[test]
    fn test_pattern_escapes_glob_metacharacters() {
        let scanner = Scanner::new(Path::new("/data/[wiki]"), "txt");

        assert_eq!(scanner.pattern(), std::path::PathBuf::from("/data/[[]wiki[]]/*.txt"));
    }
}
