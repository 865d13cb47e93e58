//! Lexical path helpers. Nothing here touches the filesystem.

use std::path::{MAIN_SEPARATOR, Path};

/// Express `path` relative to `root`.
///
/// Comparison is per path component, so `/a/bc` is not under `/a/b`. When
/// `path` is not nested under `root` (different drive, relative vs absolute,
/// unrelated tree) it is returned unchanged. `path == root` yields `"."`.
pub fn relativize(path: &str, root: &str) -> String {
    match Path::new(path).strip_prefix(root) {
        Ok(rest) if rest.as_os_str().is_empty() => ".".to_string(),
        Ok(rest) => rest.to_string_lossy().into_owned(),
        Err(_) => path.to_string(),
    }
}

/// Decode a project directory name from `~/.claude/projects/`.
///
/// Claude Code encodes a project path by replacing separators (and dots) with
/// `-`, so both `-` and `--` decode to one separator. A leading `C--` is a
/// Windows drive prefix `C:\`. Dashes that were part of the original path
/// cannot be told apart and decode as separators too.
pub fn decode_project_path(encoded: &str) -> String {
    let separator = MAIN_SEPARATOR.to_string();
    let decode = |s: &str| s.replace("--", "\0").replace('-', &separator).replace('\0', &separator);

    match (encoded.chars().next(), encoded.get(1..3)) {
        (Some(letter), Some("--")) if letter.is_ascii_alphabetic() => {
            format!("{}:{}{}", letter, separator, decode(&encoded[3..]))
        }
        _ => decode(encoded),
    }
}
