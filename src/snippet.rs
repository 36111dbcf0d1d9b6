// src/snippet.rs
//! Header snippet extraction: the leading comment of a file, or its first lines.

use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    fs,
    io::{
        self,
        BufRead,
        BufReader
    },
    path::Path,
};
use crate::util::truncate_chars;

pub const MAX_HEAD_LINES: usize = 30;    // window searched for a header comment
pub const MAX_SNIPPET_CHARS: usize = 400;
const FALLBACK_LINES: usize = 3;
const FALLBACK_SEP: &str = " | ";

// Block comment (may span lines, stops at the first `*/`), then `#` line, then `//` line.
// Leftmost match wins; on a tie the earlier alternative wins.
static HEADER_COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?sm)(/\*.*?\*/)|(^\s*#.*?$)|(^\s*//.*?$)")
        .expect("header comment pattern compiles")
});

/// Snippet for the file at `path`. Never fails: unreadable files yield `""`.
pub fn header_snippet(path: &Path) -> String {
    let lines = match fs::File::open(path)
        .and_then(|f| read_head_lines(BufReader::new(f), MAX_HEAD_LINES))
    {
        Ok(lines) => lines,
        Err(e) => {
            tracing::debug!("no snippet for {}: {}", path.display(), e);
            return String::new();
        }
    };
    snippet_from_lines(&lines)
}

/// Read up to `max` lines, trailing whitespace removed. `\n`, `\r\n` and a
/// lone `\r` all end a line. Invalid UTF-8 is replaced with U+FFFD instead
/// of failing the read.
pub fn read_head_lines<R: BufRead>(mut reader: R, max: usize) -> io::Result<Vec<String>> {
    let mut lines = Vec::with_capacity(max);
    let mut buf = Vec::new();
    let mut after_cr = false;
    while lines.len() < max {
        let chunk = reader.fill_buf()?;
        if chunk.is_empty() {
            break;
        }
        let mut used = 0;
        for &b in chunk {
            used += 1;
            if after_cr {
                after_cr = false;
                if b == b'\n' {
                    continue; // second half of \r\n
                }
            }
            match b {
                b'\n' => push_line(&mut lines, &mut buf),
                b'\r' => {
                    push_line(&mut lines, &mut buf);
                    after_cr = true;
                }
                _ => buf.push(b),
            }
            if lines.len() >= max {
                break;
            }
        }
        reader.consume(used);
    }
    if lines.len() < max && !buf.is_empty() {
        push_line(&mut lines, &mut buf);
    }
    Ok(lines)
}

fn push_line(lines: &mut Vec<String>, buf: &mut Vec<u8>) {
    lines.push(String::from_utf8_lossy(buf).trim_end().to_string());
    buf.clear();
}

/// Pick the snippet from an already-read head window.
pub fn snippet_from_lines(lines: &[String]) -> String {
    let text = lines.join("\n");
    if let Some(m) = HEADER_COMMENT.find(&text) {
        let flat = m.as_str().trim().replace('\n', " ");
        return truncate_chars(&flat, MAX_SNIPPET_CHARS).to_string();
    }

    // No comment: first few non-empty lines.
    let joined = lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .take(FALLBACK_LINES)
        .collect::<Vec<_>>()
        .join(FALLBACK_SEP);
    truncate_chars(&joined, MAX_SNIPPET_CHARS).to_string()
}

/* ================================== Tests ================================== */
