//! Canonical secret ownership and persistence
//!
//! `SecretStore` owns the in-memory secret and its durable mirror. It is
//! the only component that reads or writes the byte region; the controller
//! queries it for comparison and replacement.

use crate::error::{CofreError, SecretError};
use crate::storage::{ByteStorage, ERASED, SECRET_REGION_LEN, TERMINATOR};
use crate::types::{SecretCode, MAX_SECRET_LEN, MIN_SECRET_LEN};
use tracing::{debug, info, warn};

/// Owner of the canonical secret and its persistent mirror
#[derive(Debug)]
pub struct SecretStore<S: ByteStorage> {
    storage: S,
    current: SecretCode,
    degraded: bool,
}

impl<S: ByteStorage> SecretStore<S> {
    /// Load the persisted secret, seeding the factory default first when
    /// the region is uninitialized
    ///
    /// A region whose first byte is the erased sentinel or the terminator
    /// is uninitialized. A region that parses to a non-digit byte or to a
    /// length outside the accepted bounds is treated the same way, so the
    /// load path can never yield an invalid secret.
    pub fn open(storage: S) -> Result<Self, CofreError> {
        let mut store = Self {
            storage,
            current: SecretCode::factory_default(),
            degraded: false,
        };
        store.load()?;
        Ok(store)
    }

    /// Re-read the canonical secret from the persisted copy
    ///
    /// Used at startup and whenever a stale in-memory secret must be
    /// discarded (external-authorization open and timeout paths).
    pub fn load(&mut self) -> Result<(), CofreError> {
        match Self::read_region(&self.storage)? {
            Some(code) => {
                debug!("Loaded persisted secret ({} digits)", code.len());
                self.current = code;
            }
            None => {
                info!("Secret region uninitialized, seeding factory default");
                self.current = SecretCode::factory_default();
                self.persist_current()?;
            }
        }
        Ok(())
    }

    /// Parse the region into a secret, or `None` when uninitialized/garbage
    fn read_region(storage: &S) -> Result<Option<SecretCode>, CofreError> {
        let first = storage.read_byte(0)?;
        if first == ERASED || first == TERMINATOR {
            return Ok(None);
        }

        let mut digits = String::with_capacity(MAX_SECRET_LEN);
        for addr in 0..SECRET_REGION_LEN {
            let byte = storage.read_byte(addr)?;
            if byte == TERMINATOR {
                break;
            }
            if !byte.is_ascii_digit() {
                warn!(addr, "Non-digit byte in secret region, reseeding default");
                return Ok(None);
            }
            digits.push(byte as char);
        }

        match SecretCode::new(digits) {
            Ok(code) => Ok(Some(code)),
            Err(e) => {
                warn!("Persisted secret invalid ({}), reseeding default", e);
                Ok(None)
            }
        }
    }

    /// Exact-length, exact-content match of a candidate entry
    pub fn compare(&self, candidate: &str) -> bool {
        self.current.matches(candidate)
    }

    /// Replace the canonical secret and persist it synchronously
    ///
    /// Length bounds are asserted again here even though `SecretCode::new`
    /// already validated them. On a storage write failure the new secret
    /// stays active in memory for the rest of the session, persistence is
    /// flagged as degraded and the error is surfaced to the caller.
    pub fn replace(&mut self, code: SecretCode) -> Result<(), CofreError> {
        let len = code.len();
        if len < MIN_SECRET_LEN {
            return Err(SecretError::TooShort {
                len,
                min: MIN_SECRET_LEN,
            }
            .into());
        }
        if len > MAX_SECRET_LEN {
            return Err(SecretError::TooLong {
                len,
                max: MAX_SECRET_LEN,
            }
            .into());
        }

        self.current = code;
        match self.persist_current() {
            Ok(()) => {
                info!("Secret replaced and persisted");
                self.degraded = false;
                Ok(())
            }
            Err(e) => {
                warn!("Secret replaced in memory only, persistence degraded: {}", e);
                self.degraded = true;
                Err(e)
            }
        }
    }

    /// Mirror the in-memory secret into the byte region
    fn persist_current(&mut self) -> Result<(), CofreError> {
        let bytes = self.current.expose().as_bytes().to_vec();
        for (addr, byte) in bytes.iter().enumerate() {
            self.storage.write_byte(addr, *byte)?;
        }
        self.storage.write_byte(bytes.len(), TERMINATOR)?;
        Ok(())
    }

    /// True when the last persistence attempt failed and the in-memory
    /// secret is ahead of the durable copy
    pub fn is_persistence_degraded(&self) -> bool {
        self.degraded
    }

    /// Number of digits in the canonical secret
    pub fn secret_len(&self) -> usize {
        self.current.len()
    }

    /// Read access to the underlying byte region
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
