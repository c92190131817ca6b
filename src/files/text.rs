use crate::error::Result;
use crate::files::helpers::{assert_file_exists, read_file_sync, write_file_sync};
use regex::RegexBuilder;
use std::path::{Path, PathBuf};

/// Replace the first occurrence of each key with its value, in order
///
/// Replacements are applied one after another, so a later key can match
/// text produced by an earlier replacement.
pub fn replace_in_file_sync<I, K, V>(path: impl AsRef<Path>, replacements: I) -> Result<()>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let path = path.as_ref();
    assert_file_exists(path)?;

    let mut content = read_file_sync(path)?.unwrap_or_default();
    for (key, value) in replacements {
        content = content.replacen(key.as_ref(), value.as_ref(), 1);
    }

    write_file_sync(path, &content)
}

/// All non-overlapping matches of `pattern` in the file, in order
///
/// The pattern always runs in multi-line mode, so `^` and `$` anchor at
/// line boundaries.
pub fn find_matches(path: impl AsRef<Path>, pattern: &str) -> Result<Vec<String>> {
    let path = path.as_ref();
    assert_file_exists(path)?;

    let regex = RegexBuilder::new(pattern).multi_line(true).build()?;
    let content = read_file_sync(path)?.unwrap_or_default();

    Ok(regex
        .find_iter(&content)
        .map(|m| m.as_str().to_string())
        .collect())
}

/// Join two segments with exactly one slash at the boundary
///
/// Only the boundary is touched: one trailing slash of `left` and one
/// leading slash of `right` are dropped. Separators elsewhere are kept.
pub fn join_path(left: impl AsRef<Path>, right: impl AsRef<Path>) -> PathBuf {
    let left = left.as_ref().to_string_lossy();
    let right = right.as_ref().to_string_lossy();

    let left = left.strip_suffix('/').unwrap_or(&left);
    let right = right.strip_prefix('/').unwrap_or(&right);

    PathBuf::from(format!("{}/{}", left, right))
}

/// Left fold of [`join_path`] over any number of segments
pub fn join_paths<I, P>(segments: I) -> PathBuf
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut segments = segments.into_iter();
    let Some(first) = segments.next() else {
        return PathBuf::new();
    };

    segments.fold(first.as_ref().to_path_buf(), |acc, segment| {
        join_path(acc, segment)
    })
}
