use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::image_pipeline::common::error::{MergeError, Result};

static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("digit pattern is valid"));

/// Expands `pattern` and optionally orders the matches by their trailing number.
///
/// Without `sort` the paths come back in the order the glob walker produced
/// them, which is not something callers should rely on.
pub fn resolve_inputs(pattern: &str, sort: bool) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern)
        .map_err(|e| MergeError::InvalidPattern(format!("{pattern}: {e}")))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| MergeError::InputReadError(e.to_string()))?;
        if path.is_file() {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        return Err(MergeError::NoInputs(pattern.to_string()));
    }
    info!("Found {} input files matching {}", paths.len(), pattern);

    if sort {
        paths = sort_by_trailing_number(paths)?;
    }
    Ok(paths)
}

/// Last run of decimal digits in the file name of `path`.
pub fn trailing_number(path: &Path) -> Option<u64> {
    let name = path.file_name()?.to_string_lossy();
    DIGITS_RE.find_iter(&name).last()?.as_str().parse().ok()
}

/// Orders paths ascending by [`trailing_number`]; equal keys keep their order.
pub fn sort_by_trailing_number(paths: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
    let mut keyed = paths
        .into_iter()
        .map(|path| match trailing_number(&path) {
            Some(key) => Ok((key, path)),
            None => Err(MergeError::MissingSortKey(path.display().to_string())),
        })
        .collect::<Result<Vec<_>>>()?;

    keyed.sort_by_key(|(key, _)| *key);
    debug!("Sorted order: {:?}", keyed.iter().map(|(k, _)| k).collect::<Vec<_>>());

    Ok(keyed.into_iter().map(|(_, path)| path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_sort_is_numeric_not_lexical() {
        let sorted = sort_by_trailing_number(paths(&["a_3.tif", "a_10.tif", "a_2.tif"])).unwrap();
        assert_eq!(sorted, paths(&["a_2.tif", "a_3.tif", "a_10.tif"]));
    }

    #[test]
    fn test_sort_uses_last_digit_run_of_file_name() {
        let sorted = sort_by_trailing_number(paths(&[
            "run7/cam2_x9_5.tif",
            "run1/cam2_x1_12.tif",
            "run9/cam2_x3_1.tif",
        ]))
        .unwrap();
        assert_eq!(
            sorted,
            paths(&["run9/cam2_x3_1.tif", "run7/cam2_x9_5.tif", "run1/cam2_x1_12.tif"])
        );
    }

    #[test]
    fn test_sort_ignores_digits_in_directories() {
        assert_eq!(trailing_number(Path::new("batch42/spool.tif")), None);
        assert_eq!(trailing_number(Path::new("batch42/spool_0007.tif")), Some(7));
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let sorted = sort_by_trailing_number(paths(&["b_1.tif", "a_1.tif", "c_0.tif"])).unwrap();
        assert_eq!(sorted, paths(&["c_0.tif", "b_1.tif", "a_1.tif"]));
    }

    #[test]
    fn test_sort_fails_without_number() {
        let err = sort_by_trailing_number(paths(&["a_1.tif", "spool.tif"])).unwrap_err();
        match err {
            MergeError::MissingSortKey(name) => assert_eq!(name, "spool.tif"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_inputs_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["spool_10.tif", "spool_2.tif", "spool_1.tif", "notes.txt"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let pattern = format!("{}/*.tif", dir.path().display());
        let resolved = resolve_inputs(&pattern, true).unwrap();
        let names: Vec<_> = resolved
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["spool_1.tif", "spool_2.tif", "spool_10.tif"]);
    }

    #[test]
    fn test_resolve_inputs_no_match() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.tif", dir.path().display());
        assert!(matches!(resolve_inputs(&pattern, false), Err(MergeError::NoInputs(_))));
    }

    #[test]
    fn test_resolve_inputs_bad_pattern() {
        assert!(matches!(
            resolve_inputs("[unclosed", false),
            Err(MergeError::InvalidPattern(_))
        ));
    }
}
