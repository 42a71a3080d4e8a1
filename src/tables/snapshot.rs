//! Whole-file snapshot I/O shared by the cached tables
//!
//! Snapshots are whitespace-separated text grids. Writes go to a sibling
//! temporary file that is renamed over the target only once it is complete,
//! so an interrupted save never leaves a truncated snapshot behind.

use crate::error::{AnalysisError, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Read a snapshot file, or `None` if it does not exist
pub(crate) fn read(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AnalysisError::io(path, e)),
    }
}

/// Write a snapshot atomically (temporary file, then rename)
pub(crate) fn write_atomic<F>(path: &Path, body: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| AnalysisError::io(parent, e))?;
    }

    let tmp = path.with_extension("tmp");
    let result = (|| {
        let mut out = BufWriter::new(File::create(&tmp)?);
        body(&mut out)?;
        out.into_inner().map_err(io::IntoInnerError::into_error)?.sync_all()
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(AnalysisError::io(&tmp, e));
    }

    fs::rename(&tmp, path).map_err(|e| AnalysisError::io(path, e))
}

/// Non-empty lines with their 1-based line numbers
pub(crate) fn rows(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| (i + 1, line))
}

/// Parse one whitespace-separated token, reporting its line on failure
pub(crate) fn parse_token<T: FromStr>(what: &'static str, line: usize, token: &str) -> Result<T> {
    token.parse().map_err(|_| AnalysisError::MalformedSnapshot {
        what,
        line,
        reason: format!("cannot parse '{token}'"),
    })
}

/// Write rows of displayable values, space separated, one row per line
pub(crate) fn write_rows<'a, T, R>(out: &mut dyn Write, rows: R) -> io::Result<()>
where
    T: std::fmt::Display + 'a,
    R: IntoIterator<Item = &'a [T]>,
{
    for row in rows {
        let mut first = true;
        for value in row {
            if first {
                first = false;
            } else {
                out.write_all(b" ")?;
            }
            write!(out, "{value}")?;
        }
        out.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// A unique scratch directory for file-backed tests
    pub(crate) fn scratch_dir(tag: &str) -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "wordle_adaptive_{tag}_{}_{n}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }
}
