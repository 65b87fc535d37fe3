use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cache directory {dir:?} unusable: {reason}")]
    OutputDir { dir: PathBuf, reason: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl PersistError {
    fn output_dir(dir: &Path, reason: impl ToString) -> Self {
        PersistError::OutputDir {
            dir: dir.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Creates `dir` (and parents) when missing and checks that files can be
/// created inside it.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if !meta.is_dir() => return Err(PersistError::output_dir(dir, "not a directory")),
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|e| PersistError::output_dir(dir, e))?;
        }
        Err(err) => return Err(PersistError::output_dir(dir, err)),
    }
    NamedTempFile::new_in(dir).map_err(|e| PersistError::output_dir(dir, e))?;
    Ok(())
}

/// Writes cache entries so they appear all at once or not at all.
///
/// Bytes go to a hidden `.partial-*.tmp` file in the same directory, are
/// synced, and only then renamed over the final name.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Opens a partial file that becomes `{dir}/{filename}` on commit.
    pub fn begin(&self, filename: &str) -> Result<PartialFile, PersistError> {
        ensure_output_dir(&self.dir)?;
        let temp = tempfile::Builder::new()
            .prefix(".partial-")
            .suffix(".tmp")
            .tempfile_in(&self.dir)?;
        Ok(PartialFile {
            temp,
            target: self.dir.join(filename),
        })
    }

    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        let mut partial = self.begin(filename)?;
        partial.write_all(content)?;
        partial.commit()
    }
}

/// A cache entry being written. Dropping it without `commit` removes the
/// partial file.
pub struct PartialFile {
    temp: NamedTempFile,
    target: PathBuf,
}

impl PartialFile {
    pub fn commit(mut self) -> Result<PathBuf, PersistError> {
        self.temp.flush()?;
        self.temp.as_file_mut().sync_all()?;
        self.temp
            .persist(&self.target)
            .map_err(|err| PersistError::Io(err.error))?;
        Ok(self.target)
    }
}

impl Write for PartialFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.temp.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.temp.flush()
    }
}
