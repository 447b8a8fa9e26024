//! Entity resolution and write-time normalization.
//!
//! Appointments and claims carry soft references (`pat_num`, `provider_id`)
//! next to denormalized display fields. Resolution turns whatever a caller
//! supplied into a best-effort reference: a numeric id wins, a display name
//! matches case-insensitively, and anything else becomes an unresolved stub
//! that keeps the caller's text. Normalization runs on every write and is
//! idempotent; it re-syncs the legacy alias fields, recomputes the derived
//! timestamp, and refreshes the day bucket.

use chrono::NaiveDate;

use crate::models::{
    Appointment, AppointmentStatus, Claim, ClaimStatus, NewAppointment, NewClaim, Patient,
    PaymentStatus, Provider, DEFAULT_PROVIDER_COLOR, DEFAULT_SLOT_MINUTES,
};
use crate::schedule;

/// Outcome of patient resolution: either a snapshot of a stored patient or
/// an unresolved stub carrying the caller's name.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientRef {
    /// `Some` when a stored patient matched
    pub pat_num: Option<i64>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub insurance: String,
}

/// Resolve a patient by id first, display name second.
pub fn resolve_patient(
    patients: &[Patient],
    pat_num: Option<i64>,
    name: Option<&str>,
) -> PatientRef {
    let found = pat_num
        .and_then(|id| patients.iter().find(|p| p.pat_num == id))
        .or_else(|| {
            name.and_then(|name| patients.iter().find(|p| p.matches_name(name)))
        });

    match found {
        Some(patient) => PatientRef {
            pat_num: Some(patient.pat_num),
            name: patient.display_name(),
            email: patient.email.clone(),
            phone: patient.phone.clone(),
            insurance: patient.insurance.clone(),
        },
        None => PatientRef {
            pat_num: None,
            name: name.map(|n| n.trim().to_string()).unwrap_or_default(),
            email: String::new(),
            phone: String::new(),
            insurance: String::new(),
        },
    }
}

/// Outcome of provider resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRef {
    pub id: Option<i64>,
    pub name: String,
    pub color: String,
    pub slot_duration: i64,
}

/// Resolve a provider by id first, exact display name second. Unresolved
/// providers keep the caller's id and name and get the default color tag.
pub fn resolve_provider(
    providers: &[Provider],
    id: Option<i64>,
    name: Option<&str>,
) -> ProviderRef {
    let found = id
        .and_then(|id| providers.iter().find(|p| p.id == id))
        .or_else(|| name.and_then(|name| providers.iter().find(|p| p.name == name)));

    match found {
        Some(provider) => ProviderRef {
            id: Some(provider.id),
            name: provider.name.clone(),
            color: provider.color.clone(),
            slot_duration: provider.slot_duration,
        },
        None => ProviderRef {
            id,
            name: name.map(|n| n.trim().to_string()).unwrap_or_default(),
            color: DEFAULT_PROVIDER_COLOR.to_string(),
            slot_duration: DEFAULT_SLOT_MINUTES,
        },
    }
}

/// Build a full appointment record from caller-supplied fields.
pub fn build_appointment(
    id: i64,
    new: NewAppointment,
    patients: &[Patient],
    providers: &[Provider],
    today: NaiveDate,
) -> Appointment {
    let patient = resolve_patient(patients, new.pat_num, new.patient_name.as_deref());
    let provider = resolve_provider(providers, new.provider_id, new.provider_name.as_deref());

    let mut appointment = Appointment {
        id,
        apt_num: id,
        pat_num: patient.pat_num,
        patient_name: patient.name,
        provider_id: provider.id,
        provider_name: provider.name,
        provider_color: provider.color,
        appointment_type: new.appointment_type,
        procedure_code: new.procedure_code,
        procedure_description: new.procedure_description,
        reason: new.reason.unwrap_or_default(),
        status: new.status.unwrap_or(AppointmentStatus::Scheduled),
        room: new.room.clone(),
        operatory: new.room,
        estimated_cost: new.estimated_cost,
        payment_status: new.payment_status.unwrap_or(PaymentStatus::Pending),
        length_minutes: new.length_minutes.unwrap_or(provider.slot_duration),
        day: Default::default(),
        date: new.date,
        time: new.time.unwrap_or_default(),
        apt_date_time: String::new(),
    };
    normalize_appointment(&mut appointment, patients, providers, today);
    appointment
}

/// Re-sync every derived field on an appointment. Runs after each write and
/// is a no-op when nothing changed.
pub fn normalize_appointment(
    appointment: &mut Appointment,
    patients: &[Patient],
    providers: &[Provider],
    today: NaiveDate,
) {
    appointment.apt_num = appointment.id;

    let name = (!appointment.patient_name.trim().is_empty())
        .then_some(appointment.patient_name.as_str());
    let patient = resolve_patient(patients, appointment.pat_num, name);
    // An unresolvable id is dropped; the denormalized name stays.
    appointment.pat_num = patient.pat_num;
    if patient.pat_num.is_some() {
        appointment.patient_name = patient.name;
    }

    let provider_name = (!appointment.provider_name.trim().is_empty())
        .then_some(appointment.provider_name.as_str());
    let provider = resolve_provider(providers, appointment.provider_id, provider_name);
    appointment.provider_id = provider.id;
    appointment.provider_name = provider.name;
    appointment.provider_color = provider.color;

    normalize_schedule_fields(appointment, today);
}

/// Recompute `apt_date_time`, `time`, and `day` from whichever temporal
/// fields are usable. `date` plus `time` is authoritative; a parseable
/// `apt_date_time` backfills a missing or broken date; otherwise the record
/// keeps its text and falls in the upcoming bucket.
fn normalize_schedule_fields(appointment: &mut Appointment, today: NaiveDate) {
    let time_label = if appointment.time.trim().is_empty() {
        schedule::format_time_label(schedule::default_time())
    } else {
        appointment.time.clone()
    };

    if let Some(timestamp) = schedule::to_timestamp(&appointment.date, &time_label) {
        appointment.time = schedule::format_time_label(timestamp.time());
        appointment.apt_date_time = schedule::format_timestamp(timestamp);
    } else if let Some(timestamp) = schedule::parse_timestamp(&appointment.apt_date_time) {
        let (date, time) = schedule::split_timestamp(timestamp);
        appointment.date = date;
        appointment.time = time;
    } else {
        appointment.time = time_label;
    }

    appointment.day = schedule::day_bucket_on(&appointment.date, today);
}

/// Build a full claim record from caller-supplied fields.
pub fn build_claim(id: i64, new: NewClaim, patients: &[Patient]) -> Claim {
    let mut claim = Claim {
        id,
        claim_num: id,
        pat_num: new.pat_num,
        patient_name: new.patient_name.unwrap_or_default(),
        patient_email: String::new(),
        patient_phone: String::new(),
        insurance: new.insurance.unwrap_or_default(),
        service_date: new.service_date,
        due_date: new.due_date,
        total_billed: new.total_billed,
        insurance_paid: new.insurance_paid,
        patient_responsibility: new.patient_responsibility,
        patient_owes: new.patient_responsibility,
        status: new.status.unwrap_or(ClaimStatus::Pending),
        procedures: new.procedures,
        last_reminder_sent: None,
        reason: new.reason.unwrap_or_default(),
    };
    normalize_claim(&mut claim, patients);
    claim
}

/// Re-sync derived fields on a claim: alias fields and the denormalized
/// patient snapshot. Contact fields already carrying text are left alone.
pub fn normalize_claim(claim: &mut Claim, patients: &[Patient]) {
    claim.claim_num = claim.id;
    claim.patient_owes = claim.patient_responsibility;

    let name = (!claim.patient_name.trim().is_empty()).then_some(claim.patient_name.as_str());
    let patient = resolve_patient(patients, claim.pat_num, name);
    // An unresolvable id is dropped; the denormalized name stays.
    claim.pat_num = patient.pat_num;
    if patient.pat_num.is_some() {
        claim.patient_name = patient.name;
        if claim.patient_email.trim().is_empty() {
            claim.patient_email = patient.email;
        }
        if claim.patient_phone.trim().is_empty() {
            claim.patient_phone = patient.phone;
        }
        if claim.insurance.trim().is_empty() {
            claim.insurance = patient.insurance;
        }
    }
}
