//! Persistent data store.
//!
//! All practice data lives in one [`StoreData`] document persisted as a
//! JSON blob under a fixed key in a single-slot SQLite backend. Reads
//! hand out a reference to the in-memory copy; every mutation goes
//! through [`DataStore::mutate`], which persists synchronously before
//! returning, so the in-memory copy and the slot never drift apart.

pub mod defaults;
mod merge;
mod slot;

pub use slot::StorageSlot;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::models::{Appointment, Claim, OfficeState, Patient, PatientProfile, Provider};

/// Slot key the store document is persisted under.
pub const STORE_KEY: &str = "dental-pos/mock-data-store";

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The whole persisted document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreData {
    #[serde(default = "defaults::default_patients")]
    pub patients: Vec<Patient>,
    #[serde(default = "defaults::default_providers")]
    pub providers: Vec<Provider>,
    #[serde(default = "defaults::default_appointments")]
    pub appointments: Vec<Appointment>,
    #[serde(default = "defaults::default_claims")]
    pub claims: Vec<Claim>,
    #[serde(default = "defaults::default_office_state")]
    pub office_state: OfficeState,
    #[serde(default = "defaults::default_patient_profile")]
    pub patient_profile: PatientProfile,
}

/// Persistent store with synchronous write-through.
pub struct DataStore {
    slot: StorageSlot,
    data: StoreData,
    next_appointment_id: i64,
    next_claim_id: i64,
}

impl DataStore {
    /// Open the store at path, loading the persisted document or seeding
    /// the defaults on first run.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Self::from_slot(StorageSlot::open(path)?)
    }

    /// Create an in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_slot(StorageSlot::open_in_memory()?)
    }

    fn from_slot(slot: StorageSlot) -> StoreResult<Self> {
        let data = match slot.read(STORE_KEY)? {
            Some(blob) => merge::decode_blob(&blob),
            None => defaults::default_store(),
        };

        let mut store = Self {
            slot,
            data,
            next_appointment_id: 0,
            next_claim_id: 0,
        };
        store.seed_counters();
        store.flush()?;
        Ok(store)
    }

    /// Id counters continue past anything already in the document, so
    /// ids stay unique across process restarts.
    fn seed_counters(&mut self) {
        self.next_appointment_id = self
            .data
            .appointments
            .iter()
            .map(|a| a.id.max(a.apt_num))
            .max()
            .unwrap_or(0)
            + 1;
        self.next_claim_id = self
            .data
            .claims
            .iter()
            .map(|c| c.id.max(c.claim_num))
            .max()
            .unwrap_or(0)
            + 1;
    }

    /// Read access to the current document.
    pub fn data(&self) -> &StoreData {
        &self.data
    }

    /// Apply a mutation and persist the result before returning.
    pub fn mutate<R>(&mut self, f: impl FnOnce(&mut StoreData) -> R) -> StoreResult<R> {
        let result = f(&mut self.data);
        self.flush()?;
        Ok(result)
    }

    /// Next unique appointment id. The following [`mutate`] call persists
    /// the record that uses it.
    ///
    /// [`mutate`]: DataStore::mutate
    pub fn allocate_appointment_id(&mut self) -> i64 {
        let id = self.next_appointment_id;
        self.next_appointment_id += 1;
        id
    }

    /// Next unique claim id.
    pub fn allocate_claim_id(&mut self) -> i64 {
        let id = self.next_claim_id;
        self.next_claim_id += 1;
        id
    }

    /// Discard all persisted state and return to the compiled defaults.
    pub fn reset(&mut self) -> StoreResult<()> {
        self.data = defaults::default_store();
        self.seed_counters();
        self.flush()
    }

    /// Serialize the document and write it to the slot.
    pub fn flush(&self) -> StoreResult<()> {
        let blob = serde_json::to_string(&self.data)?;
        self.slot.write(STORE_KEY, &blob)?;
        log::debug!("persisted store ({} bytes)", blob.len());
        Ok(())
    }
}
