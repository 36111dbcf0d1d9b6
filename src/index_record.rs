// src/index_record.rs
//! Records flowing through the pipeline: discovered files and their snippets.

use serde::{Deserialize, Serialize};
use std::path::{
    Path,
    PathBuf
};
use crate::util::normalize_rel;

/// A file picked up by discovery.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileEntry {
    /// Display path relative to the scan root, `/`-separated, non-UTF-8 bytes escaped.
    pub path: String,
    /// Where the file actually lives; reads go through this, never through `path`.
    pub location: PathBuf,
}

impl FileEntry {
    pub fn new(root: &Path, location: impl Into<PathBuf>) -> Self {
        let location = location.into();
        Self { path: normalize_rel(root, &location), location }
    }

    /// Lowercased extension without the dot (derived, not stored).
    pub fn extension(&self) -> Option<String> {
        self.location
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }
}

/// One section of the index document. This is also the JSONL unit.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct IndexRecord {
    pub path: String,
    /// Single-line header snippet; empty when nothing usable was found.
    pub snippet: String,
}

impl IndexRecord {
    pub fn new(entry: FileEntry, snippet: String) -> Self {
        Self { path: entry.path, snippet }
    }
}

/* ================================== Tests ================================== */

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rel: &str) -> FileEntry {
        FileEntry::new(Path::new("/repo"), Path::new("/repo").join(rel))
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(entry("web/App.JSX").extension().as_deref(), Some("jsx"));
        assert_eq!(entry("a/b.tar.gz").extension().as_deref(), Some("gz"));
    }

    #[test]
    fn dotfiles_have_no_extension() {
        assert_eq!(entry(".js").extension(), None);
        assert_eq!(entry("Makefile").extension(), None);
    }

    #[test]
    fn entry_keeps_display_and_location() {
        let e = entry("src/x.py");
        assert_eq!(e.path, "src/x.py");
        assert_eq!(e.location, PathBuf::from("/repo/src/x.py"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_name_keeps_real_location() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        let name = OsStr::from_bytes(b"caf\xe9.py");
        let e = FileEntry::new(Path::new("/repo"), Path::new("/repo").join(name));
        assert_eq!(e.path, "caf\\xE9.py");
        assert_eq!(e.location.file_name(), Some(name));
        assert_eq!(e.extension().as_deref(), Some("py"));
    }

    #[test]
    fn record_takes_entry_path() {
        let r = IndexRecord::new(entry("src/x.py"), "# hi".into());
        assert_eq!(r.path, "src/x.py");
        assert_eq!(r.snippet, "# hi");
    }

    #[test]
    fn missing_fields_deserialize_to_default() {
        let r: IndexRecord = serde_json::from_str(r#"{"path":"a.go"}"#).unwrap();
        assert_eq!(r.path, "a.go");
        assert!(r.snippet.is_empty());
    }
}
