use crate::error::{ArchiveError, AssertError, FileError};
use crate::io::{files, streams};
use crate::lang::assert;
use ::zip::ZipArchive;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// Extract every entry of `archive` beneath `directory`, creating it if needed.
/// Entries whose names would resolve outside `directory` are rejected.
pub fn unzip(archive: Option<&Path>, directory: &Path) -> crate::Result<usize> {
    let archive = assert::not_null(archive, "The ZIP archive must not be null!")?;
    assert::legal_argument(
        files::create_directory(Some(directory)),
        format!(
            "The file system pathname ({}) is not a valid directory!",
            directory.display()
        ),
    )?;

    let file = File::open(archive).map_err(|source| FileError::Io {
        path: archive.display().to_string(),
        source,
    })?;
    let mut zip = ZipArchive::new(file).map_err(ArchiveError::from)?;
    let mut extracted = 0;

    for index in 0..zip.len() {
        let mut entry = zip.by_index(index).map_err(ArchiveError::from)?;
        let relative = entry.enclosed_name().ok_or_else(|| ArchiveError::UnsafeEntry {
            name: entry.name().to_string(),
        })?;
        let target = directory.join(relative);

        if entry.is_dir() {
            if !files::create_directory(Some(&target)) {
                return Err(AssertError::IllegalState(format!(
                    "Failed to create directory ({}) for ZIP entry!",
                    entry.name()
                ))
                .into());
            }
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(ArchiveError::from)?;
        }
        let mut output = BufWriter::new(File::create(&target).map_err(ArchiveError::from)?);
        streams::copy(&mut entry, &mut output).map_err(ArchiveError::from)?;
        log::debug!("Extracted {} to {}", entry.name(), target.display());
        extracted += 1;
    }

    Ok(extracted)
}
