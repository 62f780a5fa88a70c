//! Persistent byte-store seam and secret persistence
//!
//! The secret is mirrored into a small contiguous byte region that must
//! survive power loss, one byte per digit plus a terminator. The region
//! follows the device's EEPROM convention: a first byte equal to the
//! erased sentinel or the terminator marks the region as uninitialized.

use crate::error::StorageError;
use crate::types::MAX_SECRET_LEN;

pub mod file;
pub mod memory;
pub mod store;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use store::SecretStore;

/// Size of the persistent secret region: one byte per digit plus terminator
pub const SECRET_REGION_LEN: usize = MAX_SECRET_LEN + 1;

/// Value of a never-written (erased) storage byte
pub const ERASED: u8 = 0xFF;

/// Terminator byte marking the end of the stored secret
pub const TERMINATOR: u8 = 0x00;

/// Flat byte array surviving power loss
///
/// Addresses range over `0..SECRET_REGION_LEN`. Writes must be durable
/// before the call returns.
pub trait ByteStorage {
    /// Read one byte from the region
    fn read_byte(&self, addr: usize) -> Result<u8, StorageError>;

    /// Durably write one byte into the region
    fn write_byte(&mut self, addr: usize, value: u8) -> Result<(), StorageError>;
}

/// Reset a region to the erased state
///
/// The next [`SecretStore::open`] over this region reseeds the factory
/// default.
pub fn erase_region<S: ByteStorage>(storage: &mut S) -> Result<(), StorageError> {
    for addr in 0..SECRET_REGION_LEN {
        storage.write_byte(addr, ERASED)?;
    }
    Ok(())
}
