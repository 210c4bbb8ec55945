//! File system utilities for output directory management and file names.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Makes sure `path` is an existing, empty directory.
///
/// The directory is created if absent. Every entry already inside it, files
/// and sub-directories alike, is removed.
///
/// # Errors
///
/// Returns an error of kind [`io::ErrorKind::NotADirectory`] if `path` exists
/// but is not a directory, or any IO error raised while creating or emptying it.
///
/// # Examples
///
/// ```no_run
/// use cutil::fs::prepare_empty_dir;
///
/// prepare_empty_dir("output").unwrap();
/// ```
pub fn prepare_empty_dir(path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();

    if !path.exists() {
        return fs::create_dir_all(path);
    }

    if !path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotADirectory,
            format!("`{}` exists and is not a directory", path.display()),
        ));
    }

    remove_dir_entries(path)
}

/// Removes every file and sub-directory inside `path`, keeping `path` itself.
///
/// # Examples
///
/// ```no_run
/// use cutil::fs::remove_dir_entries;
///
/// remove_dir_entries("/path/to/temp").unwrap();
/// ```
pub fn remove_dir_entries(path: impl AsRef<Path>) -> io::Result<()> {
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

/// Extracts the file name from a path.
///
/// Returns an empty string if the path has no file name.
///
/// # Examples
///
/// ```
/// use cutil::fs::file_name;
///
/// assert_eq!(file_name("/path/to/file.txt"), "file.txt");
/// assert_eq!(file_name("/path/to/directory/"), "directory");
/// ```
pub fn file_name(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Extracts the file name and strips every trailing `.jpg` / `.png` suffix.
///
/// Other extensions are kept as they are.
///
/// # Examples
///
/// ```
/// use cutil::fs::file_name_without_image_ext;
///
/// assert_eq!(file_name_without_image_ext("/out/orig-cat.jpg.jpg"), "orig-cat");
/// assert_eq!(file_name_without_image_ext("dog.png"), "dog");
/// assert_eq!(file_name_without_image_ext("raw.tiff"), "raw.tiff");
/// ```
pub fn file_name_without_image_ext(path: impl AsRef<Path>) -> String {
    let name = file_name(path);
    let mut stem = name.as_str();

    while let Some(s) = stem
        .strip_suffix(".jpg")
        .or_else(|| stem.strip_suffix(".png"))
    {
        stem = s;
    }

    stem.to_string()
}

/// Joins `dir` with a file name built from `parts`.
///
/// # Examples
///
/// ```
/// use cutil::fs::join_file_name;
/// use std::path::PathBuf;
///
/// assert_eq!(
///     join_file_name("output", &["img-", "3", "-cat", ".jpg"]),
///     PathBuf::from("output/img-3-cat.jpg")
/// );
/// ```
pub fn join_file_name(dir: impl AsRef<Path>, parts: &[&str]) -> PathBuf {
    dir.as_ref().join(parts.concat())
}
