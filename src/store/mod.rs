//! Record store interface
//!
//! A `RecordStore` reads and writes the whole employee collection at once.
//! Front ends never touch the persisted representation directly; they hold
//! a store (usually through a [`Session`](crate::session::Session)) and call
//! `load` and `save`.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::codec::LoadOutcome;
use crate::error::Result;
use crate::models::Employee;

/// Whole-collection persistence for employee records
pub trait RecordStore {
    /// Read every persisted record, in persisted order
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read, or if a line
    /// is malformed and the store aborts on malformed lines
    fn load(&self) -> Result<LoadOutcome>;

    /// Replace the persisted collection with `records`
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written
    fn save(&mut self, records: &[Employee]) -> Result<()>;

    /// Human-readable location of the backing storage, for messages
    fn describe(&self) -> String;
}
