//! Path building and directory traversal helpers layered on [`crate::io::files`]

use crate::error::AssertError;
use crate::io::files;
use crate::lang::{assert, strings};
use std::fs;
use std::path::{MAIN_SEPARATOR_STR, Path, PathBuf};
use walkdir::WalkDir;

/// Decide whether a path takes part in a listing
pub trait FileFilter {
    fn accept(&self, path: &Path) -> bool;
}

impl<F> FileFilter for F
where
    F: Fn(&Path) -> bool,
{
    fn accept(&self, path: &Path) -> bool {
        self(path)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AllFiles;

impl FileFilter for AllFiles {
    fn accept(&self, _path: &Path) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileOnly;

impl FileFilter for FileOnly {
    fn accept(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryOnly;

impl FileFilter for DirectoryOnly {
    fn accept(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

pub fn user_home_directory() -> Option<PathBuf> {
    dirs::home_dir()
}

pub fn user_working_directory() -> Option<PathBuf> {
    std::env::current_dir().ok()
}

/// Join `elements` onto `base`, inserting a separator only where one is missing
pub fn append_to_path(base: Option<&str>, elements: &[&str]) -> String {
    let mut path = strings::default_if_blank(&[base, Some(MAIN_SEPARATOR_STR)])
        .unwrap_or(MAIN_SEPARATOR_STR)
        .to_string();

    for element in elements {
        if !path.ends_with(MAIN_SEPARATOR_STR) {
            path.push_str(MAIN_SEPARATOR_STR);
        }
        path.push_str(element);
    }

    path
}

pub fn create_path(elements: &[&str]) -> String {
    create_path_with(elements, None)
}

/// Prefix every element with `separator` (the platform separator by default)
pub fn create_path_with(elements: &[&str], separator: Option<&str>) -> String {
    let separator = separator.unwrap_or(MAIN_SEPARATOR_STR);
    elements
        .iter()
        .fold(String::new(), |mut path, element| {
            path.push_str(separator);
            path.push_str(element);
            path
        })
}

/// Delete `path` and everything beneath it; `false` if anything could not be removed
pub fn delete_recursive(path: Option<&Path>) -> Result<bool, AssertError> {
    let path = assert::not_null(path, "The file system path to delete cannot be null!")?;
    Ok(delete_path(path))
}

fn delete_path(path: &Path) -> bool {
    let mut success = true;

    // Symlinks are removed as links; their targets are never visited
    for entry in WalkDir::new(path).contents_first(true) {
        let removed = match entry {
            Ok(entry) if entry.file_type().is_dir() => fs::remove_dir(entry.path()),
            Ok(entry) => fs::remove_file(entry.path()),
            Err(err) => Err(err.into()),
        };
        success &= removed.is_ok();
    }

    if !success {
        log::debug!("Failed to completely delete {}", path.display());
    }

    success
}

/// The ancestor of `path` that sits directly under the working directory,
/// or `path` itself when it is not a directory below it
pub fn root_relative_to_working_directory(path: &Path) -> PathBuf {
    root_relative_to(path, user_working_directory().as_deref())
}

fn root_relative_to(path: &Path, working_directory: Option<&Path>) -> PathBuf {
    if files::is_directory(Some(path)) {
        if let Some(working_directory) = working_directory {
            return path
                .ancestors()
                .find(|ancestor| ancestor.parent() == Some(working_directory))
                .unwrap_or(path)
                .to_path_buf();
        }
    }

    path.to_path_buf()
}

/// Files beneath `directory` accepted by `filter`, descending only into accepted directories.
/// With no filter only the directory's own files are listed.
pub fn list_files(
    directory: &Path,
    filter: Option<&dyn FileFilter>,
) -> Result<Vec<PathBuf>, AssertError> {
    assert::legal_argument(
        files::is_directory(Some(directory)),
        format!(
            "The File ({}) does not refer to a valid directory!",
            directory.display()
        ),
    )?;

    let filter = filter.unwrap_or(&FileOnly);

    let results = WalkDir::new(directory)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || filter.accept(entry.path()))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.depth() > 0 && !entry.file_type().is_dir())
        .map(|entry| entry.into_path())
        .collect();

    Ok(results)
}
