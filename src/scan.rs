// src/scan.rs

use anyhow::Result;
use std::path::Path;
use walkdir::{
    DirEntry,
    WalkDir
};
use crate::{
    index_record::{
        FileEntry,
        IndexRecord
    },
    render::{
        self,
        IndexFormat
    },
    snippet,
};

/// Extensions (lowercase, no dot) eligible for the index.
pub const EXT_WHITELIST: &[&str] = &[
    "js", "ts", "py", "java", "jsp", "jsx", "tsx", "go", "rb", "php", "html", "css", "scss",
];

/// Any path with one of these segments is left out; the directories are never descended.
pub const IGNORED_DIRS: &[&str] = &["node_modules", ".git"];

/// Discover, snippet, and write the index to `out`. Returns the number of entries written.
pub fn scan_and_write_index(root: &Path, out: &Path, format: IndexFormat) -> Result<usize> {
    let mut files = discover_files(root);
    // A previous index written with an allow-listed extension is not a source file.
    files.retain(|f| f.location.as_path() != out);
    let records = index_files(root, files);

    render::write_index(&records, out, format)?;
    Ok(records.len())
}

/// Every allow-listed file under `root` with its snippet, sorted by path.
pub fn index_project(root: &Path) -> Vec<IndexRecord> {
    index_files(root, discover_files(root))
}

fn index_files(root: &Path, files: Vec<FileEntry>) -> Vec<IndexRecord> {
    let mut records: Vec<IndexRecord> = files
        .into_iter()
        .map(|entry| {
            let snip = snippet::header_snippet(&entry.location);
            IndexRecord::new(entry, snip)
        })
        .collect();
    // Deterministic output: sort by path
    records.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::info!("indexed {} files under {}", records.len(), root.display());
    records
}

/// Walk `root` and keep allow-listed regular files. Order is unspecified.
/// Unreadable directories and other walk errors are skipped.
pub fn discover_files(root: &Path) -> Vec<FileEntry> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_ignored(e));

    for dent in walker {
        let dent = match dent {
            Ok(d) => d,
            Err(e) => {
                tracing::debug!("walk error under {}: {}", root.display(), e);
                continue;
            }
        };
        // Follows symlinks, so a link to a regular file counts.
        if !dent.path().is_file() {
            continue;
        }

        let entry = FileEntry::new(root, dent.path());
        if !has_allowed_ext(&entry) {
            continue;
        }
        files.push(entry);
    }

    tracing::debug!("discovered {} candidate files", files.len());
    files
}

/* ----------------------------- helpers ----------------------------- */

fn is_ignored(dent: &DirEntry) -> bool {
    // The root itself is never filtered, whatever it is called.
    dent.depth() > 0
        && dent
            .file_name()
            .to_str()
            .map(|name| IGNORED_DIRS.contains(&name))
            .unwrap_or(false)
}

fn has_allowed_ext(entry: &FileEntry) -> bool {
    entry
        .extension()
        .map(|ext| EXT_WHITELIST.contains(&ext.as_str()))
        .unwrap_or(false)
}

/* ================================== Tests ================================== */
