use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{trace, warn};

use super::error::CodecError;

/// Path of the scratch file used while `path` is being written by this process.
pub fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{}.tmp", std::process::id()));
    PathBuf::from(name)
}

/// Run `work` against a buffered scratch file next to `path`, then rename the scratch file
/// onto `path`. If `work` (or the flush) fails, the scratch file is removed and `path` is
/// left untouched. An existing file at the scratch path is an error, never overwritten.
pub fn staged_write<T, F>(path: &Path, work: F) -> Result<T, CodecError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<T, CodecError>,
{
    let tmp = staging_path(path);
    trace!("Staging output in {}", tmp.display());
    let file = OpenOptions::new().write(true).create_new(true).open(&tmp)?;
    let mut f_out = BufWriter::new(file);

    let result = work(&mut f_out).and_then(|value| {
        f_out.flush()?;
        Ok(value)
    });
    // Close the file before renaming or removing it
    drop(f_out);

    match result {
        Ok(value) => {
            fs::rename(&tmp, path)?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rm) = fs::remove_file(&tmp) {
                warn!("Could not remove {}: {}", tmp.display(), rm);
            }
            Err(e)
        }
    }
}
