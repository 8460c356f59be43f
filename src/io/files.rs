use crate::error::{AssertError, FileError};
use crate::lang::{assert, strings};
use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

fn io_error(path: &Path, source: std::io::Error) -> FileError {
    FileError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Ensure `path` is a directory, creating missing parents
pub fn create_directory(path: Option<&Path>) -> bool {
    path.is_some_and(|path| path.is_dir() || fs::create_dir_all(path).is_ok())
}

pub fn create_file(pathname: &str) -> PathBuf {
    PathBuf::from(pathname)
}

/// Text after the last '.' of the file name; `None` when there is no dot
pub fn file_extension(path: Option<&Path>) -> Result<Option<String>, AssertError> {
    let path = assert::not_null(path, "The File must not be null!")?;
    assert::legal_argument(path.is_file(), "The File must be a file!")?;

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(filename
        .rfind('.')
        .map(|index| filename[index + 1..].to_string()))
}

pub fn filename(pathname: Option<&str>) -> Option<&str> {
    match pathname {
        Some(value) if strings::has_text(Some(value)) => Some(
            value
                .rfind(MAIN_SEPARATOR)
                .map_or(value, |index| &value[index + MAIN_SEPARATOR.len_utf8()..]),
        ),
        other => other,
    }
}

pub fn exists(path: Option<&Path>) -> bool {
    path.is_some_and(Path::exists)
}

pub fn exists_pathname(pathname: Option<&str>) -> bool {
    strings::has_text(pathname) && exists(pathname.map(Path::new))
}

pub fn is_directory(path: Option<&Path>) -> bool {
    path.is_some_and(Path::is_dir)
}

pub fn is_file(path: Option<&Path>) -> bool {
    path.is_some_and(Path::is_file)
}

/// Read a text file line by line, joined with the platform line separator and trimmed
pub fn read(path: Option<&Path>) -> crate::Result<String> {
    assert::legal_argument(
        is_file(path),
        format!(
            "The File reference ({}) from which to read the contents is not a valid file!",
            path.map_or_else(|| "null".to_string(), |path| path.display().to_string())
        ),
    )?;
    let path = assert::not_null(path, "The File must not be null!")?;

    let file = fs::File::open(path).map_err(|source| io_error(path, source))?;
    let mut buffer = String::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|source| io_error(path, source))?;
        buffer.push_str(&line);
        buffer.push_str(strings::LINE_SEPARATOR);
    }

    Ok(buffer.trim().to_string())
}

pub fn canonical_or_absolute_path(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

pub fn verify_exists(pathname: Option<&str>) -> Result<&str, FileError> {
    match pathname {
        Some(value) if exists_pathname(Some(value)) => Ok(value),
        other => Err(FileError::NotFound {
            path: other.unwrap_or("null").to_string(),
        }),
    }
}

pub fn write(path: Option<&Path>, contents: Option<&str>) -> crate::Result<()> {
    let path = assert::not_null(path, "The File to write to must not be null!")?;
    assert::legal_argument(
        strings::has_text(contents),
        "The 'contents' of the file cannot be null or empty!",
    )?;

    let file = fs::File::create(path).map_err(|source| io_error(path, source))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents.unwrap_or_default().as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|source| io_error(path, source))?;

    Ok(())
}
