//! Persistent log store
//!
//! Append-only record sink on durable storage. The log is the one entity
//! with a lifecycle: created with its header on first use, appended to
//! every successful cycle, wholly cleared on demand, exported as-is.
//!
//! Consistency relies on each append being a single write call; there is
//! no partial-record recovery. Clear is truncate-to-empty - an empty log
//! counts as "not present" and the next successful cycle re-creates the
//! header before appending.
//!
//! Two backends:
//! - [`MemoryStore`] (`store-memory`): heapless buffer for `no_std`
//!   targets and tests.
//! - [`FileStore`] (`store-file`, std): the `/data.txt` file on removable
//!   storage.

use crate::constants::LOG_HEADER;
use crate::errors::{StoreError, StoreResult};

/// Append-only log store.
pub trait LogStore {
    /// Whether the log exists and holds at least its header.
    fn is_present(&self) -> bool;

    /// Write the header line if the log is absent or empty.
    ///
    /// Idempotent; the header is never written twice.
    fn ensure_header(&mut self) -> StoreResult<()>;

    /// Append one CRLF-terminated record line.
    fn append_line(&mut self, line: &str) -> StoreResult<()>;

    /// Truncate the log to empty.
    fn clear(&mut self) -> StoreResult<()>;

    /// Copy the entire log, byte-identical, into `out`.
    fn read_all<W: core::fmt::Write>(&mut self, out: &mut W) -> StoreResult<()>;
}

/// In-memory log store backed by a heapless buffer.
#[cfg(feature = "store-memory")]
#[derive(Debug, Default)]
pub struct MemoryStore<const N: usize> {
    buf: heapless::String<N>,
}

#[cfg(feature = "store-memory")]
impl<const N: usize> MemoryStore<N> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            buf: heapless::String::new(),
        }
    }

    /// Current contents.
    pub fn contents(&self) -> &str {
        self.buf.as_str()
    }
}

#[cfg(feature = "store-memory")]
impl<const N: usize> LogStore for MemoryStore<N> {
    fn is_present(&self) -> bool {
        !self.buf.is_empty()
    }

    fn ensure_header(&mut self) -> StoreResult<()> {
        if self.buf.is_empty() {
            self.buf
                .push_str(LOG_HEADER)
                .map_err(|_| StoreError::Overflow)?;
        }
        Ok(())
    }

    fn append_line(&mut self, line: &str) -> StoreResult<()> {
        self.buf.push_str(line).map_err(|_| StoreError::Overflow)
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.buf.clear();
        Ok(())
    }

    fn read_all<W: core::fmt::Write>(&mut self, out: &mut W) -> StoreResult<()> {
        out.write_str(self.buf.as_str())
            .map_err(|_| StoreError::ReadFailed)
    }
}

/// File-backed log store on removable storage.
#[cfg(feature = "store-file")]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(feature = "store-file")]
impl FileStore {
    /// Open a store at the given path; the file is created lazily.
    ///
    /// Fails with [`StoreError::NotMounted`] when the parent directory is
    /// missing, which is how an unmounted card shows up.
    pub fn open(path: impl Into<std::path::PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(StoreError::NotMounted);
            }
        }
        Ok(Self { path })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(feature = "store-file")]
impl LogStore for FileStore {
    fn is_present(&self) -> bool {
        std::fs::metadata(&self.path)
            .map(|m| m.len() > 0)
            .unwrap_or(false)
    }

    fn ensure_header(&mut self) -> StoreResult<()> {
        if !self.is_present() {
            #[cfg(feature = "log")]
            log::info!("creating log at {}", self.path.display());
            std::fs::write(&self.path, LOG_HEADER).map_err(|_| StoreError::WriteFailed)?;
        }
        Ok(())
    }

    fn append_line(&mut self, line: &str) -> StoreResult<()> {
        use std::io::Write as _;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|_| StoreError::WriteFailed)?;
        file.write_all(line.as_bytes())
            .map_err(|_| StoreError::WriteFailed)
    }

    fn clear(&mut self) -> StoreResult<()> {
        match std::fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)
        {
            Ok(_) => Ok(()),
            // Clearing a log that was never created is a no-op.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(_) => Err(StoreError::ClearFailed),
        }
    }

    fn read_all<W: core::fmt::Write>(&mut self, out: &mut W) -> StoreResult<()> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound)
            }
            Err(_) => return Err(StoreError::ReadFailed),
        };
        out.write_str(&contents).map_err(|_| StoreError::ReadFailed)
    }
}
