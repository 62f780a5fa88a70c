//! File-backed byte region
//!
//! Host-side stand-in for the EEPROM: a seven-byte file whose writes are
//! flushed to disk before returning, so a simulated power loss (process
//! restart) observes every committed byte. Used by the simulator binary.

use crate::error::StorageError;
use crate::storage::{ByteStorage, ERASED, SECRET_REGION_LEN};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Durable byte region stored in a regular file
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    file: File,
}

impl FileStorage {
    /// Open the region file, creating an erased region if it does not exist
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::WriteFailed {
                message: format!("Failed to create storage directory: {}", e),
            })?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| StorageError::ReadFailed {
                message: format!("Failed to open {}: {}", path.display(), e),
            })?;

        // A fresh or short file is padded out to a fully erased region
        let len = file
            .metadata()
            .map_err(|e| StorageError::ReadFailed {
                message: format!("Failed to stat {}: {}", path.display(), e),
            })?
            .len() as usize;

        if len < SECRET_REGION_LEN {
            debug!(path = %path.display(), "Initializing erased secret region");
            file.seek(SeekFrom::Start(len as u64))
                .and_then(|_| file.write_all(&vec![ERASED; SECRET_REGION_LEN - len]))
                .and_then(|_| file.sync_data())
                .map_err(|e| StorageError::WriteFailed {
                    message: format!("Failed to initialize {}: {}", path.display(), e),
                })?;
        }

        Ok(Self { path, file })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteStorage for FileStorage {
    fn read_byte(&self, addr: usize) -> Result<u8, StorageError> {
        if addr >= SECRET_REGION_LEN {
            return Err(StorageError::OutOfBounds {
                addr,
                region: SECRET_REGION_LEN,
            });
        }

        let mut buf = [0u8; 1];
        let mut file = &self.file;
        file.seek(SeekFrom::Start(addr as u64))
            .and_then(|_| file.read_exact(&mut buf))
            .map_err(|e| StorageError::ReadFailed {
                message: format!("Failed to read {}: {}", self.path.display(), e),
            })?;

        Ok(buf[0])
    }

    fn write_byte(&mut self, addr: usize, value: u8) -> Result<(), StorageError> {
        if addr >= SECRET_REGION_LEN {
            return Err(StorageError::OutOfBounds {
                addr,
                region: SECRET_REGION_LEN,
            });
        }

        self.file
            .seek(SeekFrom::Start(addr as u64))
            .and_then(|_| self.file.write_all(&[value]))
            .and_then(|_| self.file.sync_data())
            .map_err(|e| StorageError::WriteFailed {
                message: format!("Failed to write {}: {}", self.path.display(), e),
            })
    }
}
