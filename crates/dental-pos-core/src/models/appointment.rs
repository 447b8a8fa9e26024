//! Appointment models and lifecycle statuses.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Appointment lifecycle status.
///
/// Unknown strings from older blobs deserialize to [`Unknown`] rather than
/// poisoning the whole collection.
///
/// [`Unknown`]: AppointmentStatus::Unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Waiting,
    #[serde(rename = "in-progress")]
    InProgress,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl AppointmentStatus {
    /// Statuses that count as an upcoming (bookable/next) appointment.
    pub fn is_upcoming(&self) -> bool {
        matches!(self, Self::Scheduled | Self::Confirmed | Self::Waiting)
    }

    /// Statuses that count as checked in for the daily stats.
    pub fn is_checked_in(&self) -> bool {
        matches!(self, Self::Waiting | Self::InProgress | Self::Completed)
    }
}

/// Payment status of an appointment. Parsing is case-insensitive and total:
/// anything that is not some casing of "paid" reads as pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, Self::Paid)
    }

    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("paid") {
            Self::Paid
        } else {
            Self::Pending
        }
    }
}

impl Serialize for PaymentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaymentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

/// Coarse classification of a date relative to the current day.
///
/// The stored label on an appointment is refreshed on every write; derived
/// views recompute it live from the date instead of trusting the stored copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayBucket {
    Today,
    Tomorrow,
    Past,
    #[default]
    Upcoming,
}

impl DayBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::Past => "past",
            Self::Upcoming => "upcoming",
        }
    }

    /// Total parse; unrecognized labels read as `Upcoming`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "today" => Self::Today,
            "tomorrow" => Self::Tomorrow,
            "past" => Self::Past,
            _ => Self::Upcoming,
        }
    }
}

impl Serialize for DayBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DayBucket {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

/// An appointment.
///
/// `apt_num` is the legacy alias of `id` and is kept value-equal by the
/// resolver on every write; patches never touch it directly. `pat_num` is a
/// soft reference: `None` means the denormalized `patient_name` could not be
/// matched to a stored patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    /// Legacy alias of `id`
    pub apt_num: i64,
    /// Owning patient id (soft reference)
    pub pat_num: Option<i64>,
    /// Denormalized patient display name
    pub patient_name: String,
    /// Provider id (soft reference)
    pub provider_id: Option<i64>,
    /// Denormalized provider display name
    pub provider_name: String,
    /// Denormalized provider color tag
    pub provider_color: String,
    /// Appointment type, e.g. "Cleaning"
    #[serde(rename = "type")]
    pub appointment_type: String,
    #[serde(default)]
    pub procedure_code: Option<String>,
    #[serde(default)]
    pub procedure_description: Option<String>,
    /// Free-text reason/note
    #[serde(default)]
    pub reason: String,
    pub status: AppointmentStatus,
    /// Assigned room, if any
    #[serde(default)]
    pub room: Option<String>,
    /// Legacy operatory label, mirrors `room` for new records
    #[serde(default)]
    pub operatory: Option<String>,
    pub estimated_cost: f64,
    pub payment_status: PaymentStatus,
    pub length_minutes: i64,
    /// Day bucket as of the last write
    pub day: DayBucket,
    /// Scheduled date, "YYYY-MM-DD"
    pub date: String,
    /// Human time-of-day label, e.g. "9:30 AM"
    pub time: String,
    /// Canonical timestamp, "YYYY-MM-DDTHH:MM:SS"; derived from `date`+`time`
    pub apt_date_time: String,
}

/// Caller-supplied fields for a new appointment. Cross-references and derived
/// fields are filled in by the resolver; missing time falls back to the
/// opening slot.
#[derive(Debug, Clone, Default)]
pub struct NewAppointment {
    pub pat_num: Option<i64>,
    pub patient_name: Option<String>,
    pub provider_id: Option<i64>,
    pub provider_name: Option<String>,
    pub appointment_type: String,
    pub reason: Option<String>,
    pub date: String,
    pub time: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub room: Option<String>,
    pub estimated_cost: f64,
    pub payment_status: Option<PaymentStatus>,
    pub length_minutes: Option<i64>,
    pub procedure_code: Option<String>,
    pub procedure_description: Option<String>,
}

/// Partial update for an existing appointment. Only canonical fields are
/// exposed; aliases and derived fields are recomputed after the merge.
#[derive(Debug, Clone, Default)]
pub struct AppointmentPatch {
    pub status: Option<AppointmentStatus>,
    pub room: Option<Option<String>>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub provider_id: Option<i64>,
    pub appointment_type: Option<String>,
    pub reason: Option<String>,
    pub estimated_cost: Option<f64>,
    pub payment_status: Option<PaymentStatus>,
    pub length_minutes: Option<i64>,
}

impl AppointmentPatch {
    /// Merge this patch over an appointment in place. Derived fields
    /// (`apt_date_time`, `day`, denormalized names) are the resolver's job.
    pub fn apply(&self, appointment: &mut Appointment) {
        if let Some(status) = self.status {
            appointment.status = status;
        }
        if let Some(room) = &self.room {
            appointment.room = room.clone();
            appointment.operatory = room.clone();
        }
        if let Some(date) = &self.date {
            appointment.date = date.clone();
        }
        if let Some(time) = &self.time {
            appointment.time = time.clone();
        }
        if let Some(provider_id) = self.provider_id {
            appointment.provider_id = Some(provider_id);
            // The old denormalized fields must not outlive the id change;
            // the resolver refreshes them from the new id.
            appointment.provider_name.clear();
            appointment.provider_color.clear();
        }
        if let Some(appointment_type) = &self.appointment_type {
            appointment.appointment_type = appointment_type.clone();
        }
        if let Some(reason) = &self.reason {
            appointment.reason = reason.clone();
        }
        if let Some(cost) = self.estimated_cost {
            appointment.estimated_cost = cost;
        }
        if let Some(payment_status) = self.payment_status {
            appointment.payment_status = payment_status;
        }
        if let Some(length) = self.length_minutes {
            appointment.length_minutes = length;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_status_case_insensitive() {
        assert_eq!(PaymentStatus::parse("paid"), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::parse("PAID"), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::parse(" Paid "), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::parse("pending"), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::parse("refunded"), PaymentStatus::Pending);
    }

    #[test]
    fn test_status_wire_strings() {
        let json = serde_json::to_string(&AppointmentStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");

        let parsed: AppointmentStatus = serde_json::from_str("\"confirmed\"").unwrap();
        assert_eq!(parsed, AppointmentStatus::Confirmed);

        // Unknown strings degrade instead of failing the collection
        let parsed: AppointmentStatus = serde_json::from_str("\"no-show\"").unwrap();
        assert_eq!(parsed, AppointmentStatus::Unknown);
    }

    #[test]
    fn test_day_bucket_parse_total() {
        assert_eq!(DayBucket::parse("today"), DayBucket::Today);
        assert_eq!(DayBucket::parse("Tomorrow"), DayBucket::Tomorrow);
        assert_eq!(DayBucket::parse("past"), DayBucket::Past);
        assert_eq!(DayBucket::parse("whenever"), DayBucket::Upcoming);
    }

    fn checkup() -> Appointment {
        Appointment {
            id: 2001,
            apt_num: 2001,
            pat_num: Some(1001),
            patient_name: "Sarah Johnson".into(),
            provider_id: Some(1),
            provider_name: "Dr. Michael Chen".into(),
            provider_color: "blue".into(),
            appointment_type: "Routine Checkup".into(),
            procedure_code: None,
            procedure_description: None,
            reason: String::new(),
            status: AppointmentStatus::Scheduled,
            room: None,
            operatory: None,
            estimated_cost: 150.0,
            payment_status: PaymentStatus::Pending,
            length_minutes: 30,
            day: DayBucket::Today,
            date: "2025-11-06".into(),
            time: "9:30 AM".into(),
            apt_date_time: "2025-11-06T09:30:00".into(),
        }
    }

    #[test]
    fn test_patch_apply_sets_room_and_operatory() {
        let mut appointment = checkup();

        let patch = AppointmentPatch {
            status: Some(AppointmentStatus::Waiting),
            room: Some(Some("Room 2".into())),
            ..Default::default()
        };
        patch.apply(&mut appointment);

        assert_eq!(appointment.status, AppointmentStatus::Waiting);
        assert_eq!(appointment.room.as_deref(), Some("Room 2"));
        assert_eq!(appointment.operatory.as_deref(), Some("Room 2"));
    }

    #[test]
    fn test_patch_apply_provider_change_clears_denormalized_fields() {
        let mut appointment = checkup();

        let patch = AppointmentPatch {
            provider_id: Some(2),
            ..Default::default()
        };
        patch.apply(&mut appointment);

        assert_eq!(appointment.provider_id, Some(2));
        assert!(appointment.provider_name.is_empty());
        assert!(appointment.provider_color.is_empty());
    }
}
