// src/util.rs

use std::{
    borrow::Cow,
    ffi::OsStr,
    path::{
        Component,
        Path
    },
};

/// Path relative to `root`, with `/` separators regardless of platform.
/// Bytes that are not UTF-8 are written as `\xNN`, so distinct names stay distinct.
pub fn normalize_rel(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(escape_os(s)),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(unix)]
fn escape_os(s: &OsStr) -> Cow<'_, str> {
    use std::os::unix::ffi::OsStrExt;

    let mut bytes = s.as_bytes();
    if let Ok(valid) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(valid);
    }
    let mut out = String::with_capacity(bytes.len() + 8);
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                out.push_str(valid);
                break;
            }
            Err(e) => {
                let (good, rest) = bytes.split_at(e.valid_up_to());
                out.push_str(&String::from_utf8_lossy(good));
                let bad = e.error_len().unwrap_or(rest.len());
                for b in &rest[..bad] {
                    out.push_str(&format!("\\x{b:02X}"));
                }
                bytes = &rest[bad..];
            }
        }
    }
    Cow::Owned(out)
}

#[cfg(not(unix))]
fn escape_os(s: &OsStr) -> Cow<'_, str> {
    s.to_string_lossy()
}

/// Keep at most `max` characters (not bytes), never splitting a code point.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/* ================================== Tests ================================== */

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn rel_paths_use_forward_slashes() {
        let root = PathBuf::from("/repo");
        let p = root.join("src").join("app").join("main.ts");
        assert_eq!(normalize_rel(&root, &p), "src/app/main.ts");
    }

    #[test]
    fn rel_path_drops_dot_prefix() {
        let root = PathBuf::from(".");
        assert_eq!(normalize_rel(&root, Path::new("./a.py")), "a.py");
    }

    #[cfg(unix)]
    #[test]
    fn invalid_bytes_are_escaped_not_merged() {
        use std::os::unix::ffi::OsStrExt;
        let root = PathBuf::from("/repo");
        let a = root.join("d\u{e9}r").join(OsStr::from_bytes(b"caf\xe9.py"));
        let b = root.join(OsStr::from_bytes(b"caf\xff\xfe.py"));
        assert_eq!(normalize_rel(&root, &a), "d\u{e9}r/caf\\xE9.py");
        assert_eq!(normalize_rel(&root, &b), "caf\\xFF\\xFE.py");
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
        let long = "é".repeat(500);
        assert_eq!(truncate_chars(&long, 400).chars().count(), 400);
    }
}
