//! Portal façade.
//!
//! The one entry point UI and service layers use. Every mutating call
//! runs caller input through the resolver, writes through the store
//! (persisting synchronously), and returns a deep copy; every read
//! assembles fresh derived values from the live collections. Callers
//! treat returned structures as immutable snapshots and re-fetch after
//! mutations.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::aggregates::{self, NextAppointment, OfficeStats};
use crate::models::{
    Appointment, AppointmentPatch, Claim, ClaimPatch, ClaimStatus, DayBucket, NewAppointment,
    NewClaim, OfficeState, Patient, PatientProfile, ProcedureCode, Provider,
};
use crate::resolver;
use crate::schedule;
use crate::store::{defaults, DataStore, StoreError};

/// How long after a reminder goes out before an overdue claim is
/// eligible for another automatic one.
const REMINDER_COOLDOWN_DAYS: i64 = 7;

/// Portal errors.
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type PortalResult<T> = Result<T, PortalError>;

/// Outbound notification hook. Implementations take a fully resolved
/// record (contact fields already populated) and report success or
/// failure; the portal never depends on the result beyond logging.
pub trait Notifier {
    fn appointment_confirmation(&self, appointment: &Appointment) -> bool;
    fn claim_reminder(&self, claim: &Claim) -> bool;
}

/// Default notifier: logs the outbound message and reports success.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn appointment_confirmation(&self, appointment: &Appointment) -> bool {
        log::info!(
            "confirmation for appointment {} ({} with {} at {} {})",
            appointment.id,
            appointment.patient_name,
            appointment.provider_name,
            appointment.date,
            appointment.time,
        );
        true
    }

    fn claim_reminder(&self, claim: &Claim) -> bool {
        log::info!(
            "payment reminder for claim {} ({}, ${:.2} due {})",
            claim.id,
            claim.patient_name,
            claim.patient_owes(),
            claim.due_date,
        );
        true
    }
}

/// The signed-in patient's section of a snapshot: profile fields plus
/// the derived balance and next-appointment card.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientView {
    #[serde(flatten)]
    pub profile: PatientProfile,
    pub balance: f64,
    pub next_appointment: NextAppointment,
}

/// Office sub-state plus freshly computed statistics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeView {
    #[serde(flatten)]
    pub state: OfficeState,
    pub stats: OfficeStats,
}

/// Everything the portal UI renders, in one consistent read.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalSnapshot {
    pub patient: PatientView,
    pub appointments: Vec<Appointment>,
    pub claims: Vec<Claim>,
    pub office: OfficeView,
    pub providers: Vec<Provider>,
}

/// Portal service over a [`DataStore`].
pub struct PortalService<N: Notifier = LogNotifier> {
    store: DataStore,
    notifier: N,
}

impl PortalService<LogNotifier> {
    pub fn new(store: DataStore) -> Self {
        Self::with_notifier(store, LogNotifier)
    }
}

impl<N: Notifier> PortalService<N> {
    pub fn with_notifier(store: DataStore, notifier: N) -> Self {
        Self { store, notifier }
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Snapshot for a patient. An explicitly requested id that matches no
    /// stored patient fails with [`PortalError::NotFound`]; with no id the
    /// signed-in profile's patient (falling back to the first stored
    /// patient) is used and the call never fails.
    pub fn portal_snapshot(&self, pat_num: Option<i64>) -> PortalResult<PortalSnapshot> {
        let data = self.store.data();

        let resolved = match pat_num {
            Some(requested) => {
                if !data.patients.iter().any(|p| p.pat_num == requested) {
                    return Err(PortalError::NotFound(format!("patient {}", requested)));
                }
                requested
            }
            None => {
                let default = data.patient_profile.pat_num;
                if data.patients.iter().any(|p| p.pat_num == default) {
                    default
                } else {
                    data.patients.first().map(|p| p.pat_num).unwrap_or(default)
                }
            }
        };

        let appointments: Vec<Appointment> = data
            .appointments
            .iter()
            .filter(|a| a.pat_num == Some(resolved))
            .cloned()
            .collect();
        let claims: Vec<Claim> = data
            .claims
            .iter()
            .filter(|c| c.pat_num == Some(resolved))
            .cloned()
            .collect();

        let profile = if data.patient_profile.pat_num == resolved {
            data.patient_profile.clone()
        } else {
            // Portal identities only exist for the signed-in profile;
            // other patients get a profile view built from their record.
            let patient = data
                .patients
                .iter()
                .find(|p| p.pat_num == resolved)
                .expect("resolved id matches a stored patient");
            profile_from_patient(patient)
        };

        Ok(PortalSnapshot {
            patient: PatientView {
                profile,
                balance: aggregates::outstanding_balance(&claims, &appointments),
                next_appointment: aggregates::next_appointment(&appointments),
            },
            appointments,
            claims,
            office: OfficeView {
                state: data.office_state.clone(),
                stats: aggregates::office_stats(
                    &data.appointments,
                    &data.office_state,
                    self.today(),
                ),
            },
            providers: data.providers.clone(),
        })
    }

    /// Create an appointment from caller-supplied fields. Returns the
    /// stored record after resolution and normalization.
    pub fn add_appointment(&mut self, new: NewAppointment) -> PortalResult<Appointment> {
        let id = self.store.allocate_appointment_id();
        let today = self.today();
        let appointment = self.store.mutate(|data| {
            let appointment =
                resolver::build_appointment(id, new, &data.patients, &data.providers, today);
            data.appointments.push(appointment.clone());
            appointment
        })?;

        if !self.notifier.appointment_confirmation(&appointment) {
            log::warn!("confirmation failed for appointment {}", appointment.id);
        }
        Ok(appointment)
    }

    /// Patch an appointment located by either id alias. `Ok(None)` when no
    /// record matches.
    pub fn update_appointment(
        &mut self,
        id: i64,
        patch: AppointmentPatch,
    ) -> PortalResult<Option<Appointment>> {
        let today = self.today();
        let index = match self
            .store
            .data()
            .appointments
            .iter()
            .position(|a| a.id == id || a.apt_num == id)
        {
            Some(index) => index,
            None => return Ok(None),
        };

        let updated = self.store.mutate(|data| {
            let mut appointment = data.appointments[index].clone();
            patch.apply(&mut appointment);
            resolver::normalize_appointment(
                &mut appointment,
                &data.patients,
                &data.providers,
                today,
            );
            data.appointments[index] = appointment.clone();
            appointment
        })?;
        Ok(Some(updated))
    }

    /// Create a claim from caller-supplied fields.
    pub fn add_claim(&mut self, new: NewClaim) -> PortalResult<Claim> {
        let id = self.store.allocate_claim_id();
        let claim = self.store.mutate(|data| {
            let claim = resolver::build_claim(id, new, &data.patients);
            data.claims.push(claim.clone());
            claim
        })?;
        Ok(claim)
    }

    /// Patch a claim located by either id alias. `Ok(None)` when no record
    /// matches.
    pub fn update_claim(&mut self, id: i64, patch: ClaimPatch) -> PortalResult<Option<Claim>> {
        let index = match self
            .store
            .data()
            .claims
            .iter()
            .position(|c| c.id == id || c.claim_num == id)
        {
            Some(index) => index,
            None => return Ok(None),
        };

        let updated = self.store.mutate(|data| {
            let mut claim = data.claims[index].clone();
            patch.apply(&mut claim);
            resolver::normalize_claim(&mut claim, &data.patients);
            data.claims[index] = claim.clone();
            claim
        })?;
        Ok(Some(updated))
    }

    /// Appointments, optionally filtered to one day bucket. Buckets are
    /// computed live from each date, so the copies returned never carry a
    /// stale label.
    pub fn appointments(&self, day: Option<DayBucket>) -> Vec<Appointment> {
        let today = self.today();
        self.store
            .data()
            .appointments
            .iter()
            .cloned()
            .map(|mut a| {
                a.day = schedule::day_bucket_on(&a.date, today);
                a
            })
            .filter(|a| day.map_or(true, |d| a.day == d))
            .collect()
    }

    /// Claims, optionally filtered by status.
    pub fn claims(&self, status: Option<ClaimStatus>) -> Vec<Claim> {
        self.store
            .data()
            .claims
            .iter()
            .filter(|c| status.map_or(true, |s| c.status == s))
            .cloned()
            .collect()
    }

    /// Direct patient lookup. Unlike internal resolution this fails loudly.
    pub fn patient(&self, pat_num: i64) -> PortalResult<Patient> {
        self.store
            .data()
            .patients
            .iter()
            .find(|p| p.pat_num == pat_num)
            .cloned()
            .ok_or_else(|| PortalError::NotFound(format!("patient {}", pat_num)))
    }

    pub fn patients(&self) -> Vec<Patient> {
        self.store.data().patients.clone()
    }

    /// Substring search over display name, phone, and patient id.
    pub fn search_patients(&self, term: &str) -> Vec<Patient> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.patients();
        }
        self.store
            .data()
            .patients
            .iter()
            .filter(|p| {
                p.display_name().to_lowercase().contains(&needle)
                    || p.phone.contains(&needle)
                    || p.pat_num.to_string().contains(&needle)
            })
            .cloned()
            .collect()
    }

    pub fn providers(&self) -> Vec<Provider> {
        self.store.data().providers.clone()
    }

    pub fn procedure_codes(&self) -> Vec<ProcedureCode> {
        defaults::procedure_codes()
    }

    /// Send a payment reminder for one claim, stamping the reminder date
    /// and moving a pending claim to sent. `Ok(None)` when no record
    /// matches.
    pub fn send_claim_reminder(&mut self, id: i64) -> PortalResult<Option<Claim>> {
        let today = schedule::format_date(self.today());
        let index = match self
            .store
            .data()
            .claims
            .iter()
            .position(|c| c.id == id || c.claim_num == id)
        {
            Some(index) => index,
            None => return Ok(None),
        };

        let claim = self.store.mutate(|data| {
            let claim = &mut data.claims[index];
            claim.last_reminder_sent = Some(today);
            if claim.status == ClaimStatus::Pending {
                claim.status = ClaimStatus::Sent;
            }
            claim.clone()
        })?;

        if !self.notifier.claim_reminder(&claim) {
            log::warn!("reminder failed for claim {}", claim.id);
        }
        Ok(Some(claim))
    }

    /// Send reminders for every overdue claim that has never had one or
    /// whose last reminder is outside the cooldown window. Returns the
    /// claims that were reminded.
    pub fn auto_send_reminders(&mut self) -> PortalResult<Vec<Claim>> {
        let today = self.today();
        let stamp = schedule::format_date(today);

        let reminded = self.store.mutate(|data| {
            let mut reminded = Vec::new();
            for claim in &mut data.claims {
                if claim.status != ClaimStatus::Overdue {
                    continue;
                }
                let due = match &claim.last_reminder_sent {
                    None => true,
                    Some(sent) => match schedule::parse_date(sent) {
                        Some(sent) => (today - sent).num_days() >= REMINDER_COOLDOWN_DAYS,
                        // An unreadable stamp never suppresses a reminder.
                        None => true,
                    },
                };
                if due {
                    claim.last_reminder_sent = Some(stamp.clone());
                    reminded.push(claim.clone());
                }
            }
            reminded
        })?;

        for claim in &reminded {
            if !self.notifier.claim_reminder(claim) {
                log::warn!("reminder failed for claim {}", claim.id);
            }
        }
        Ok(reminded)
    }

    /// Drop all persisted state and return to the compiled defaults.
    pub fn reset(&mut self) -> PortalResult<()> {
        self.store.reset()?;
        Ok(())
    }
}

/// Profile-shaped view for a patient with no portal identity.
fn profile_from_patient(patient: &Patient) -> PatientProfile {
    PatientProfile {
        pat_num: patient.pat_num,
        name: patient.display_name(),
        email: patient.email.clone(),
        phone: patient.phone.clone(),
        insurance: patient.insurance.clone(),
        last_visit: patient.last_visit.clone(),
        autopay_enrolled: false,
        autopay_failing: false,
        failed_payment_reason: None,
        messages: Vec::new(),
        upcoming_recommendations: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every outbound notification instead of sending it.
    struct RecordingNotifier {
        sent: RefCell<Vec<String>>,
    }

    impl RecordingNotifier {
        fn new() -> Self {
            Self {
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl Notifier for RecordingNotifier {
        fn appointment_confirmation(&self, appointment: &Appointment) -> bool {
            self.sent
                .borrow_mut()
                .push(format!("appointment:{}", appointment.id));
            true
        }

        fn claim_reminder(&self, claim: &Claim) -> bool {
            self.sent.borrow_mut().push(format!("claim:{}", claim.id));
            true
        }
    }

    fn service() -> PortalService<RecordingNotifier> {
        let store = DataStore::open_in_memory().unwrap();
        PortalService::with_notifier(store, RecordingNotifier::new())
    }

    #[test]
    fn test_snapshot_unknown_patient_is_not_found() {
        let service = service();
        let err = service.portal_snapshot(Some(99999)).unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));
    }

    #[test]
    fn test_snapshot_default_never_fails() {
        let service = service();
        let snapshot = service.portal_snapshot(None).unwrap();
        assert_eq!(snapshot.patient.profile.pat_num, 1001);
        assert_eq!(snapshot.patient.profile.name, "Sarah Johnson");
        assert_eq!(snapshot.providers.len(), 2);
        // Scoped to the signed-in patient.
        assert!(snapshot
            .appointments
            .iter()
            .all(|a| a.pat_num == Some(1001)));
        assert!(snapshot.claims.iter().all(|c| c.pat_num == Some(1001)));
    }

    #[test]
    fn test_snapshot_other_patient_gets_synthesized_profile() {
        let service = service();
        let snapshot = service.portal_snapshot(Some(1002)).unwrap();
        assert_eq!(snapshot.patient.profile.name, "Michael Chen");
        assert!(snapshot.patient.profile.messages.is_empty());
        assert!(!snapshot.patient.profile.autopay_enrolled);
    }

    #[test]
    fn test_snapshot_is_a_deep_copy() {
        let service = service();
        let mut snapshot = service.portal_snapshot(None).unwrap();
        snapshot.appointments.clear();
        snapshot.patient.profile.name = "Mutated".into();

        let again = service.portal_snapshot(None).unwrap();
        assert_eq!(again.patient.profile.name, "Sarah Johnson");
        assert!(!again.appointments.is_empty());
    }

    #[test]
    fn test_add_appointment_notifies_confirmation() {
        let mut service = service();
        let created = service
            .add_appointment(NewAppointment {
                pat_num: Some(1001),
                appointment_type: "Cleaning".into(),
                date: "2025-12-01".into(),
                time: Some("9:30 AM".into()),
                estimated_cost: 180.0,
                ..Default::default()
            })
            .unwrap();

        assert_eq!(created.id, 2103);
        assert_eq!(created.patient_name, "Sarah Johnson");
        assert_eq!(*service.notifier.sent.borrow(), vec!["appointment:2103"]);
    }

    #[test]
    fn test_update_appointment_by_alias() {
        let mut service = service();
        let patch = AppointmentPatch {
            room: Some(Some("Room 4".into())),
            ..Default::default()
        };
        // 2002 addressed through aptNum.
        let updated = service.update_appointment(2002, patch).unwrap().unwrap();
        assert_eq!(updated.room.as_deref(), Some("Room 4"));
        assert_eq!(updated.operatory.as_deref(), Some("Room 4"));
    }

    #[test]
    fn test_update_drops_dangling_patient_reference() {
        let mut service = service();
        // Simulate a legacy blob whose patient reference no longer resolves.
        service
            .store
            .mutate(|data| {
                data.appointments[0].pat_num = Some(9999);
                data.appointments[0].patient_name = "Walk In".into();
                data.claims[0].pat_num = Some(9999);
                data.claims[0].patient_name = "Walk In".into();
            })
            .unwrap();

        let updated = service
            .update_appointment(2001, AppointmentPatch::default())
            .unwrap()
            .unwrap();
        assert_eq!(updated.pat_num, None);
        assert_eq!(updated.patient_name, "Walk In");

        let updated = service
            .update_claim(5001, ClaimPatch::default())
            .unwrap()
            .unwrap();
        assert_eq!(updated.pat_num, None);
        assert_eq!(updated.patient_name, "Walk In");
    }

    #[test]
    fn test_update_provider_id_refreshes_denormalized_fields() {
        let mut service = service();
        // 2001 starts with Dr. Michael Chen (blue).
        let patch = AppointmentPatch {
            provider_id: Some(2),
            ..Default::default()
        };
        let updated = service.update_appointment(2001, patch).unwrap().unwrap();
        assert_eq!(updated.provider_id, Some(2));
        assert_eq!(updated.provider_name, "Dr. Lisa Park");
        assert_eq!(updated.provider_color, "purple");

        // An unknown id keeps the id but never the old provider's fields.
        let patch = AppointmentPatch {
            provider_id: Some(77),
            ..Default::default()
        };
        let updated = service.update_appointment(2001, patch).unwrap().unwrap();
        assert_eq!(updated.provider_id, Some(77));
        assert!(updated.provider_name.is_empty());
        assert_eq!(updated.provider_color, "blue");
    }

    #[test]
    fn test_update_missing_record_is_none() {
        let mut service = service();
        let result = service
            .update_appointment(424242, AppointmentPatch::default())
            .unwrap();
        assert!(result.is_none());

        let result = service.update_claim(424242, ClaimPatch::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_update_claim_write_through() {
        let mut service = service();
        let patch = ClaimPatch {
            patient_responsibility: Some(0.0),
            status: Some(ClaimStatus::Paid),
            ..Default::default()
        };
        let updated = service.update_claim(5002, patch).unwrap().unwrap();
        assert_eq!(updated.patient_responsibility, 0.0);
        assert_eq!(updated.patient_owes, 0.0);
        assert_eq!(updated.status, ClaimStatus::Paid);
    }

    #[test]
    fn test_claims_filter_by_status() {
        let service = service();
        let overdue = service.claims(Some(ClaimStatus::Overdue));
        assert_eq!(overdue.len(), 2);
        assert!(overdue.iter().all(|c| c.status == ClaimStatus::Overdue));
        assert_eq!(service.claims(None).len(), 4);
    }

    #[test]
    fn test_patient_lookup_and_search() {
        let service = service();
        assert_eq!(service.patient(1003).unwrap().f_name, "David");
        assert!(matches!(
            service.patient(77),
            Err(PortalError::NotFound(_))
        ));

        let hits = service.search_patients("chen");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].pat_num, 1002);

        let hits = service.search_patients("100");
        assert_eq!(hits.len(), 6);
    }

    #[test]
    fn test_procedure_codes_fee_schedule() {
        let service = service();
        let codes = service.procedure_codes();
        assert_eq!(codes.len(), 13);
        assert!(codes.iter().any(|c| c.code == "D2740" && c.fee == 1500.0));
    }

    #[test]
    fn test_send_claim_reminder_stamps_and_advances_status() {
        let mut service = service();
        // 5001 is pending with no reminder on file.
        let claim = service.send_claim_reminder(5001).unwrap().unwrap();
        assert_eq!(claim.status, ClaimStatus::Sent);
        assert!(claim.last_reminder_sent.is_some());
        assert_eq!(*service.notifier.sent.borrow(), vec!["claim:5001"]);

        assert!(service.send_claim_reminder(424242).unwrap().is_none());
    }

    #[test]
    fn test_auto_reminders_respect_cooldown() {
        let mut service = service();
        // Seed reminder stamps are months old, so both overdue claims go out.
        let first = service.auto_send_reminders().unwrap();
        assert_eq!(first.len(), 2);

        // Stamped today now; nothing further inside the cooldown window.
        let second = service.auto_send_reminders().unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn test_reset_restores_seed_data() {
        let mut service = service();
        service
            .add_appointment(NewAppointment {
                pat_num: Some(1001),
                appointment_type: "Exam".into(),
                date: "2025-12-01".into(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(service.appointments(None).len(), 7);

        service.reset().unwrap();
        assert_eq!(service.appointments(None).len(), 6);
    }
}
