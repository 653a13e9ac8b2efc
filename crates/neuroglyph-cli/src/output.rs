//! Output locations.

use std::path::{Path, PathBuf};

use tracing::debug;

use neuroglyph_error::{Error, Result};

/// An explicit `-o` path wins; otherwise the fixed file name under `out_dir`.
pub fn target_path(out_dir: &Path, output: Option<&Path>, file_name: &str) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => out_dir.join(file_name),
    }
}

/// Create the parent directory of `path` if it does not exist yet.
pub fn prepare_output(path: &Path) -> Result<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if parent.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|e| {
        Error::from(e)
            .with_operation("output::prepare")
            .with_context("dir", parent.display().to_string())
    })?;
    debug!(dir = %parent.display(), "created output directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn explicit_output_wins() {
        let out = target_path(Path::new("assets"), Some(Path::new("x.svg")), "brain.svg");
        assert_eq!(out, PathBuf::from("x.svg"));
        let out = target_path(Path::new("assets"), None, "brain.svg");
        assert_eq!(out, PathBuf::from("assets/brain.svg"));
    }

    #[test]
    fn creates_nested_parent() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("a").join("b").join("out.svg");
        prepare_output(&path).expect("prepare");
        assert!(dir.path().join("a/b").is_dir());
        // idempotent
        prepare_output(&path).expect("prepare again");
    }

    #[test]
    fn bare_file_name_needs_no_directory() {
        prepare_output(Path::new("out.svg")).expect("prepare");
    }
}
