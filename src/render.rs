// src/render.rs

use anyhow::{
    Context,
    Result
};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};
use crate::index_record::IndexRecord;

pub const DEFAULT_OUTPUT: &str = "CODE_INDEX.md";
pub const TITLE: &str = "# CODE_INDEX";
pub const DESCRIPTION: &str =
    "Generated index of code files with header snippets. Use this to give AI quick context.";

/// Shape of the written index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum IndexFormat {
    /// Title, description, then one `## path` section per file
    #[default]
    Markdown,
    /// One JSON object (`path`, `snippet`) per line
    Jsonl,
}

/// Render the markdown document. Records are expected sorted by path.
///
/// ```text
/// # CODE_INDEX
///
/// Generated index of code files ...
///
/// ## src/app.js
///
/// // App entry
///
/// ```
pub fn render_markdown<W: Write>(records: &[IndexRecord], out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{TITLE}\n")?;
    writeln!(out, "{DESCRIPTION}\n")?;
    for r in records {
        writeln!(out, "## {}\n", r.path)?;
        writeln!(out, "{}\n", r.snippet)?;
    }
    Ok(())
}

pub fn render_jsonl<W: Write>(records: &[IndexRecord], out: &mut W) -> Result<()> {
    for r in records {
        serde_json::to_writer(&mut *out, r)
            .with_context(|| format!("serializing record {}", r.path))?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn render<W: Write>(records: &[IndexRecord], format: IndexFormat, out: &mut W) -> Result<()> {
    match format {
        IndexFormat::Markdown => render_markdown(records, out)?,
        IndexFormat::Jsonl => render_jsonl(records, out)?,
    }
    out.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the whole index into it.
pub fn write_index(records: &[IndexRecord], path: &Path, format: IndexFormat) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let f = File::create(path)
        .with_context(|| format!("creating index file {}", path.display()))?;
    let mut w = BufWriter::new(f);
    render(records, format, &mut w)
        .with_context(|| format!("writing index file {}", path.display()))
}

/* ================================== Tests ================================== */
