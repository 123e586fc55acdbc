//! Discovery of stylesheets to process.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Extension of the files `prune` rewrites.
pub const LESS_EXTENSION: &str = "less";

/// Finds every `.less` file under `dir`, sorted by path.
///
/// Dependency and build output directories (`node_modules`, `dist`, ...) are
/// not descended into.
pub fn find_less_files(dir: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_ignored_dir(e))
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) == Some(LESS_EXTENSION) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Check if a directory should be skipped.
fn is_ignored_dir(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    matches!(
        name.as_ref(),
        "node_modules" | ".git" | "dist" | "build" | "coverage" | "bower_components"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_finds_less_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("components/button")).unwrap();
        fs::write(dir.path().join("main.less"), "").unwrap();
        fs::write(dir.path().join("components/button/button.less"), "").unwrap();
        fs::write(dir.path().join("components/card.less"), "").unwrap();
        fs::write(dir.path().join("components/card.css"), "").unwrap();
        fs::write(dir.path().join("notes.less.txt"), "").unwrap();

        let files = find_less_files(dir.path()).unwrap();
        let relative: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            relative,
            vec![
                PathBuf::from("components/button/button.less"),
                PathBuf::from("components/card.less"),
                PathBuf::from("main.less"),
            ]
        );
    }

    #[test]
    fn test_skips_ignored_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("node_modules/bootstrap/less")).unwrap();
        fs::create_dir_all(dir.path().join("dist")).unwrap();
        fs::write(dir.path().join("node_modules/bootstrap/less/mixins.less"), "").unwrap();
        fs::write(dir.path().join("dist/out.less"), "").unwrap();
        fs::write(dir.path().join("site.less"), "").unwrap();

        let files = find_less_files(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("site.less")]);
    }

    #[test]
    fn test_root_named_like_ignored_dir_is_still_searched() {
        let dir = tempfile::tempdir().unwrap();
        let build = dir.path().join("build");
        fs::create_dir_all(&build).unwrap();
        fs::write(build.join("theme.less"), "").unwrap();

        assert_eq!(find_less_files(&build).unwrap(), vec![build.join("theme.less")]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_less_files(&dir.path().join("missing")).is_err());
    }
}
