//! Utility functions for the CLI.

use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;
use std::ffi::OsString;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Extension given to compressed containers.
pub const CONTAINER_EXTENSION: &str = "huff";

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    match ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        Ok(style) => pb.set_style(style.progress_chars("█▓▒░ ")),
        Err(_) => pb.set_style(ProgressStyle::default_bar()),
    }
    pb
}

/// `notes.txt` -> `notes.txt.huff`
pub fn compressed_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".");
    name.push(CONTAINER_EXTENSION);
    PathBuf::from(name)
}

/// `notes.txt.huff` -> `notes.txt`; anything else gets `.out` appended.
pub fn decompressed_path(input: &Path) -> PathBuf {
    match (input.extension(), input.file_stem()) {
        (Some(ext), Some(stem)) if ext == CONTAINER_EXTENSION && !stem.is_empty() => {
            input.with_file_name(stem)
        }
        _ => {
            let mut name: OsString = input.as_os_str().to_os_string();
            name.push(".out");
            PathBuf::from(name)
        }
    }
}

/// Decide whether `path` may be written.
///
/// Missing files and `--force` always pass. Otherwise the user is asked,
/// and a non-interactive session refuses.
pub fn confirm_overwrite(path: &Path, force: bool) -> Result<(), Box<dyn Error>> {
    if force || !path.exists() {
        return Ok(());
    }
    if !io::stdin().is_terminal() {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )
        .into());
    }

    let overwrite = Confirm::new()
        .with_prompt(format!("{} already exists. Overwrite?", path.display()))
        .default(false)
        .interact()?;
    if overwrite {
        Ok(())
    } else {
        Err(format!("not overwriting {}", path.display()).into())
    }
}

/// Write `data` to `path` through a temporary file in the same directory,
/// so the destination is either the old file or the complete new one.
pub fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(data)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Human-readable byte count.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
