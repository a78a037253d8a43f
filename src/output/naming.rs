//! Export file naming

use crate::error::{Error, Result};
use crate::types::ExportMode;
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Collision suffixes tried before giving up
const MAX_SUFFIX: u32 = 1000;

/// `export_{mode}_{YYYYMMDD_HHMMSS}.xlsx`
pub fn export_file_name(mode: ExportMode, at: &DateTime<Local>) -> String {
    format!("export_{}_{}.xlsx", mode.tag(), at.format("%Y%m%d_%H%M%S"))
}

/// Claim a fresh export path inside `dir`.
///
/// The directory is created if needed. The timestamped name is used when
/// free; otherwise `_1`, `_2`, ... is appended to the stem. The file is
/// created empty so concurrent exports cannot claim the same path.
pub fn reserve_export_path(dir: &Path, mode: ExportMode, at: &DateTime<Local>) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| {
        Error::output(format!(
            "Failed to create output directory '{}': {e}",
            dir.display()
        ))
    })?;

    let name = export_file_name(mode, at);
    let stem = name.trim_end_matches(".xlsx");

    for n in 0..=MAX_SUFFIX {
        let candidate = if n == 0 {
            dir.join(&name)
        } else {
            dir.join(format!("{stem}_{n}.xlsx"))
        };

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(_) => return Ok(candidate),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(Error::Io(e)),
        }
    }

    Err(Error::output(format!(
        "No free file name for '{name}' in '{}'",
        dir.display()
    )))
}
