//! Read-only aggregates derived from the live collections.
//!
//! Everything here is a pure function recomputed on demand. The cached
//! `balance` field on a patient record is display-only legacy data; the
//! figure shown to callers always comes from [`outstanding_balance`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Appointment, Claim, DayBucket, OfficeState};
use crate::schedule;

/// Outstanding balance: what the patient owes across claims, plus the
/// estimated cost of every appointment not yet paid. Two kinds of owed
/// money fold into the one figure the portal displays.
pub fn outstanding_balance(claims: &[Claim], appointments: &[Appointment]) -> f64 {
    let claim_total: f64 = claims.iter().map(|c| c.patient_owes()).sum();
    let unpaid_appointments: f64 = appointments
        .iter()
        .filter(|a| !a.payment_status.is_paid())
        .map(|a| a.estimated_cost)
        .sum();
    claim_total + unpaid_appointments
}

/// The next-appointment card. Always well formed; when nothing qualifies
/// the placeholder text stands in for a date so callers never need a
/// presence check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NextAppointment {
    pub date: String,
    pub time: String,
    pub provider: String,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub estimated_cost: f64,
}

impl NextAppointment {
    pub fn placeholder() -> Self {
        Self {
            date: "No upcoming appointments".into(),
            time: String::new(),
            provider: String::new(),
            appointment_type: String::new(),
            estimated_cost: 0.0,
        }
    }
}

/// Earliest appointment still in a bookable status, by canonical
/// timestamp. Records whose timestamp does not parse cannot be ordered
/// and are skipped. Ties keep collection order.
pub fn next_appointment(appointments: &[Appointment]) -> NextAppointment {
    let mut candidates: Vec<&Appointment> = appointments
        .iter()
        .filter(|a| a.status.is_upcoming())
        .filter(|a| schedule::parse_timestamp(&a.apt_date_time).is_some())
        .collect();
    candidates.sort_by_key(|a| schedule::parse_timestamp(&a.apt_date_time));

    match candidates.first() {
        Some(appointment) => {
            let date = schedule::parse_date(&appointment.date)
                .map(|d| d.format("%b %-d, %Y").to_string())
                .unwrap_or_else(|| appointment.date.clone());
            NextAppointment {
                date,
                time: appointment.time.clone(),
                provider: appointment.provider_name.clone(),
                appointment_type: appointment.appointment_type.clone(),
                estimated_cost: appointment.estimated_cost,
            }
        }
        None => NextAppointment::placeholder(),
    }
}

/// Daily front-desk statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfficeStats {
    pub today_appointments: usize,
    pub checked_in: usize,
    pub completed: usize,
    pub open_requests: usize,
    pub revenue: f64,
}

/// Compute today's statistics. Buckets come from each appointment's date
/// relative to `today`, not from the stored `day` label, so stale labels
/// cannot skew the counts. Revenue is scoped to today's paid
/// appointments, matching the daily figure the dashboard shows.
pub fn office_stats(
    appointments: &[Appointment],
    office_state: &OfficeState,
    today: NaiveDate,
) -> OfficeStats {
    let today_appointments: Vec<&Appointment> = appointments
        .iter()
        .filter(|a| schedule::day_bucket_on(&a.date, today) == DayBucket::Today)
        .collect();

    OfficeStats {
        today_appointments: today_appointments.len(),
        checked_in: today_appointments
            .iter()
            .filter(|a| a.status.is_checked_in())
            .count(),
        completed: today_appointments
            .iter()
            .filter(|a| a.status == crate::models::AppointmentStatus::Completed)
            .count(),
        open_requests: office_state.open_requests.len(),
        revenue: today_appointments
            .iter()
            .filter(|a| a.payment_status.is_paid())
            .map(|a| a.estimated_cost)
            .sum(),
    }
}
