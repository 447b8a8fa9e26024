//! Dental POS Core Library
//!
//! Embedded mock practice-management store backing the patient portal and
//! front-desk demo UIs. One authoritative in-memory copy of the practice
//! data, persisted synchronously to a single-slot SQLite backend after
//! every mutation.
//!
//! # Architecture
//!
//! ```text
//! UI / service layer
//!         │
//!         ▼
//!   PortalService  ── façade: snapshots, add/update, reminders
//!         │
//!         ▼
//!     resolver     ── normalize caller input, refresh derived fields
//!         │
//!         ▼
//!     DataStore    ── canonical collections, write-through persistence
//!         │
//!         ▼
//!    aggregates    ── balance, next appointment, daily statistics
//! ```
//!
//! # Core Principle
//!
//! **Every mutation persists before the call returns.** There is no write
//! queue and no consistency window; reloading the slot always yields the
//! state the last caller observed.
//!
//! # Modules
//!
//! - [`api`]: the portal façade consumers call
//! - [`models`]: domain types (Patient, Appointment, Claim, etc.)
//! - [`store`]: persistent store container and default dataset
//! - [`resolver`]: entity resolution and write-time normalization
//! - [`schedule`]: time-label parsing, timestamps, day buckets, slots
//! - [`aggregates`]: derived read-only figures

pub mod aggregates;
pub mod api;
pub mod models;
pub mod resolver;
pub mod schedule;
pub mod store;

// Re-export commonly used types
pub use aggregates::{NextAppointment, OfficeStats};
pub use api::{LogNotifier, Notifier, PortalError, PortalResult, PortalService, PortalSnapshot};
pub use models::{
    Appointment, AppointmentPatch, AppointmentStatus, Claim, ClaimPatch, ClaimStatus, DayBucket,
    NewAppointment, NewClaim, Patient, PatientProfile, PaymentStatus, Provider,
};
pub use store::{DataStore, StoreData, StoreError};
