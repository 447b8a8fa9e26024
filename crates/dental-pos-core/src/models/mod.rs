//! Domain models for the mock practice-management store.
//!
//! All types serialize with the camelCase field names the persisted blob has
//! always used, so a blob written by an older build rehydrates unchanged.

mod appointment;
mod claim;
mod office;
mod patient;
mod profile;
mod provider;

pub use appointment::*;
pub use claim::*;
pub use office::*;
pub use patient::*;
pub use profile::*;
pub use provider::*;
