//! Binary payloads loaded from disk.
//!
//! Accessor views borrow their bytes; [`BinarySource`] is one way for a
//! caller to own them. Views themselves never touch the file system.

use std::fs::File;
use std::io::Read;
use std::ops::Deref;
use std::path::Path;

#[cfg(feature = "mmap")]
use memmap2::Mmap;

use crate::util::{Error, Result};

/// Bytes of an external buffer (`.bin`), memory-mapped or owned.
pub struct BinarySource {
    inner: SourceInner,
}

enum SourceInner {
    /// Memory-mapped file
    #[cfg(feature = "mmap")]
    Mmap(Mmap),
    /// Bytes read into memory
    Owned(Vec<u8>),
}

impl BinarySource {
    /// Open a file, memory-mapping it when the `mmap` feature is enabled.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_opts(path, cfg!(feature = "mmap"))
    }

    /// Open a file with optional memory mapping.
    ///
    /// Empty files and builds without the `mmap` feature always read into memory.
    pub fn open_opts(path: impl AsRef<Path>, use_mmap: bool) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;
        let size = file.metadata()?.len();

        if use_mmap && size > 0 {
            if let Some(inner) = map_file(&file)? {
                tracing::debug!(path = %path.display(), size, "mapped binary source");
                return Ok(Self { inner });
            }
        }

        let mut bytes = Vec::with_capacity(size as usize);
        file.read_to_end(&mut bytes)?;
        tracing::debug!(path = %path.display(), size, "read binary source");
        Ok(Self::from_vec(bytes))
    }

    /// Wrap bytes already in memory.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self { inner: SourceInner::Owned(bytes) }
    }

    /// Returns true if the bytes are memory-mapped.
    pub fn is_mapped(&self) -> bool {
        match &self.inner {
            #[cfg(feature = "mmap")]
            SourceInner::Mmap(_) => true,
            SourceInner::Owned(_) => false,
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match &self.inner {
            #[cfg(feature = "mmap")]
            SourceInner::Mmap(mmap) => &mmap[..],
            SourceInner::Owned(bytes) => bytes.as_slice(),
        }
    }
}

#[cfg(feature = "mmap")]
fn map_file(file: &File) -> Result<Option<SourceInner>> {
    // Safety: the map is read-only; the caller must not truncate the file while mapped.
    let mmap = unsafe { Mmap::map(file) }.map_err(|e| Error::MmapFailed(e.to_string()))?;
    Ok(Some(SourceInner::Mmap(mmap)))
}

#[cfg(not(feature = "mmap"))]
fn map_file(_file: &File) -> Result<Option<SourceInner>> {
    Ok(None)
}

impl Deref for BinarySource {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for BinarySource {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Debug for BinarySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinarySource")
            .field("len", &self.as_bytes().len())
            .field("mapped", &self.is_mapped())
            .finish()
    }
}
