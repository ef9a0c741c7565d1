//! Destination file for a download: bytes go to `{name}.part`, which is
//! renamed over `{name}` only once the whole body has been written.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Appended to the final filename while the body is being written.
pub const PART_SUFFIX: &str = ".part";

/// Open part file plus the final path it will be renamed to.
#[derive(Debug)]
pub struct PartFile {
    file: File,
    part_path: PathBuf,
    final_path: PathBuf,
}

impl PartFile {
    /// Create (or truncate) the part file next to `final_path`.
    /// On unix the file is created with mode 0777, masked by the umask.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let part_path = part_path_for(final_path);
        let mut opts = OpenOptions::new();
        opts.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            opts.mode(0o777);
        }
        let file = opts.open(&part_path)?;
        Ok(Self {
            file,
            part_path,
            final_path: final_path.to_path_buf(),
        })
    }

    pub fn part_path(&self) -> &Path {
        &self.part_path
    }

    pub fn final_path(&self) -> &Path {
        &self.final_path
    }

    /// Sync, close, and rename the part file to the final path, replacing
    /// any existing file there. Returns the final path. On failure the part
    /// file is removed.
    pub fn finalize(self) -> io::Result<PathBuf> {
        let PartFile {
            file,
            part_path,
            final_path,
        } = self;
        let moved = file.sync_all().and_then(|()| {
            drop(file);
            fs::rename(&part_path, &final_path)
        });
        if let Err(e) = moved {
            if let Err(rm) = fs::remove_file(&part_path) {
                tracing::warn!("could not remove {}: {}", part_path.display(), rm);
            }
            return Err(e);
        }
        Ok(final_path)
    }

    /// Close and delete the part file. The final path is left untouched.
    pub fn discard(self) -> io::Result<()> {
        let PartFile {
            file, part_path, ..
        } = self;
        drop(file);
        fs::remove_file(&part_path)
    }
}

impl Write for PartFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn part_path_for(final_path: &Path) -> PathBuf {
    let mut name = final_path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(PART_SUFFIX);
    final_path.with_file_name(name)
}
