use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Creates an empty file with the given name inside `dir` and returns its path.
pub fn touch(dir: &Path, name: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, "")?;
    Ok(path)
}

/// Builds a directory tree for traversal tests and returns the created file
/// paths.
///
/// Directories are laid out as chains of `max_depth` nested directories
/// hanging off the root, `dir_count` directories in total. Files carry an
/// index and a (past) embedded date, and are distributed round-robin across
/// all directories including the root, so every run over the tree has a
/// deterministic expected result set.
pub fn build_dated_tree(
    root: &Path,
    dir_count: usize,
    file_count: usize,
    max_depth: usize,
) -> Result<Vec<PathBuf>> {
    assert!(max_depth >= 1);

    let mut dirs: Vec<PathBuf> = Vec::with_capacity(dir_count);
    let mut parent = root.to_path_buf();
    for i in 0..dir_count {
        if i % max_depth == 0 {
            parent = root.to_path_buf();
        }
        let dir = parent.join(format!("d{:03}", i));
        fs::create_dir(&dir)?;
        parent = dir.clone();
        dirs.push(dir);
    }

    let mut files = Vec::with_capacity(file_count);
    for i in 0..file_count {
        let dir = if dirs.is_empty() {
            root
        } else if i % (dirs.len() + 1) == 0 {
            root
        } else {
            &dirs[i % (dirs.len() + 1) - 1]
        };
        let month = 1 + (i / 28) % 12;
        let day = 1 + i % 28;
        let name = format!("log_{:04}_2023-{:02}-{:02}.txt", i, month, day);
        files.push(touch(dir, &name)?);
    }

    Ok(files)
}
