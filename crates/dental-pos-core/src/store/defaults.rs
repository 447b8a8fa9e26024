//! Compiled default dataset. Used on first run and as the per-collection
//! fallback when a persisted blob is missing or malformed.

use crate::models::{
    Appointment, AppointmentStatus, CareRecommendation, Claim, ClaimStatus, DayBucket,
    InboxMessage, OfficeState, OpenRequest, Patient, PatientProfile, PaymentStatus,
    PortalRecommendation, Priority, ProcedureCode, ProcedureLine, Provider, Room, RoomStatus,
};
use crate::store::StoreData;

pub fn default_store() -> StoreData {
    StoreData {
        patients: default_patients(),
        providers: default_providers(),
        appointments: default_appointments(),
        claims: default_claims(),
        office_state: default_office_state(),
        patient_profile: default_patient_profile(),
    }
}

fn patient(
    pat_num: i64,
    f_name: &str,
    l_name: &str,
    phone: &str,
    email: &str,
    insurance: &str,
    balance: f64,
    last_visit: &str,
) -> Patient {
    Patient {
        pat_num,
        f_name: f_name.into(),
        l_name: l_name.into(),
        phone: phone.into(),
        email: email.into(),
        insurance: insurance.into(),
        balance,
        last_visit: last_visit.into(),
    }
}

pub fn default_patients() -> Vec<Patient> {
    vec![
        patient(
            1001,
            "Sarah",
            "Johnson",
            "(555) 123-4567",
            "sarah.j@email.com",
            "Delta Dental PPO",
            0.0,
            "2025-08-15",
        ),
        patient(
            1002,
            "Michael",
            "Chen",
            "(555) 234-5678",
            "mchen@email.com",
            "MetLife Dental",
            125.0,
            "2025-09-30",
        ),
        patient(
            1003,
            "David",
            "Rodriguez",
            "(555) 345-6789",
            "drodriguez@email.com",
            "Guardian Dental",
            0.0,
            "2025-10-05",
        ),
        patient(
            1004,
            "Emily",
            "Watson",
            "(555) 456-7890",
            "ewatson@email.com",
            "Cigna Dental",
            250.0,
            "2025-09-15",
        ),
        patient(
            1005,
            "Laura",
            "Hall",
            "(555) 567-8901",
            "laura.hall@email.com",
            "Aetna Dental",
            0.0,
            "2025-07-22",
        ),
        patient(
            1006,
            "Robert",
            "Taylor",
            "(555) 678-9012",
            "robert.taylor@email.com",
            "United Concordia",
            50.0,
            "2025-06-18",
        ),
    ]
}

pub fn default_providers() -> Vec<Provider> {
    vec![
        Provider {
            id: 1,
            name: "Dr. Michael Chen".into(),
            specialty: "General Dentistry".into(),
            slot_duration: 30,
            color: "blue".into(),
        },
        Provider {
            id: 2,
            name: "Dr. Lisa Park".into(),
            specialty: "Orthodontics".into(),
            slot_duration: 60,
            color: "purple".into(),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn appointment(
    id: i64,
    pat_num: i64,
    patient_name: &str,
    provider_id: i64,
    provider_name: &str,
    provider_color: &str,
    appointment_type: &str,
    procedure_code: &str,
    reason: &str,
    status: AppointmentStatus,
    room: Option<&str>,
    operatory: &str,
    estimated_cost: f64,
    payment_status: PaymentStatus,
    length_minutes: i64,
    day: DayBucket,
    date: &str,
    time: &str,
    apt_date_time: &str,
) -> Appointment {
    Appointment {
        id,
        apt_num: id,
        pat_num: Some(pat_num),
        patient_name: patient_name.into(),
        provider_id: Some(provider_id),
        provider_name: provider_name.into(),
        provider_color: provider_color.into(),
        appointment_type: appointment_type.into(),
        procedure_code: Some(procedure_code.into()),
        procedure_description: Some(appointment_type.into()),
        reason: reason.into(),
        status,
        room: room.map(Into::into),
        operatory: Some(operatory.into()),
        estimated_cost,
        payment_status,
        length_minutes,
        day,
        date: date.into(),
        time: time.into(),
        apt_date_time: apt_date_time.into(),
    }
}

pub fn default_appointments() -> Vec<Appointment> {
    vec![
        appointment(
            2001,
            1001,
            "Sarah Johnson",
            1,
            "Dr. Michael Chen",
            "blue",
            "Routine Checkup",
            "D0120",
            "6-month checkup",
            AppointmentStatus::Confirmed,
            Some("Room 1"),
            "Room 1",
            150.0,
            PaymentStatus::Paid,
            30,
            DayBucket::Today,
            "2025-11-06",
            "09:30 AM",
            "2025-11-06T09:30:00",
        ),
        appointment(
            2002,
            1002,
            "Michael Chen",
            1,
            "Dr. Michael Chen",
            "blue",
            "Crown Fitting",
            "D2740",
            "Crown follow up",
            AppointmentStatus::Scheduled,
            None,
            "Room 2",
            950.0,
            PaymentStatus::Pending,
            30,
            DayBucket::Today,
            "2025-11-06",
            "10:30 AM",
            "2025-11-06T10:30:00",
        ),
        appointment(
            2003,
            1003,
            "David Rodriguez",
            2,
            "Dr. Lisa Park",
            "purple",
            "Consultation",
            "D0150",
            "Orthodontics consult",
            AppointmentStatus::Waiting,
            Some("Room 3"),
            "Room 3",
            120.0,
            PaymentStatus::Pending,
            30,
            DayBucket::Today,
            "2025-11-06",
            "12:00 PM",
            "2025-11-06T12:00:00",
        ),
        appointment(
            2004,
            1004,
            "Emily Watson",
            2,
            "Dr. Lisa Park",
            "purple",
            "Whitening",
            "D9972",
            "In-office whitening",
            AppointmentStatus::Completed,
            Some("Room 2"),
            "Room 2",
            450.0,
            PaymentStatus::Paid,
            30,
            DayBucket::Today,
            "2025-11-06",
            "02:00 PM",
            "2025-11-06T14:00:00",
        ),
        appointment(
            2101,
            1005,
            "Laura Hall",
            1,
            "Dr. Michael Chen",
            "blue",
            "Cleaning",
            "D1110",
            "Routine cleaning",
            AppointmentStatus::Scheduled,
            None,
            "Room 1",
            180.0,
            PaymentStatus::Pending,
            30,
            DayBucket::Tomorrow,
            "2025-10-26",
            "09:30 AM",
            "2025-10-26T09:30:00",
        ),
        appointment(
            2102,
            1006,
            "Robert Taylor",
            2,
            "Dr. Lisa Park",
            "purple",
            "Follow-up",
            "D0150",
            "Brace follow up",
            AppointmentStatus::Scheduled,
            None,
            "Room 2",
            200.0,
            PaymentStatus::Pending,
            60,
            DayBucket::Tomorrow,
            "2025-10-26",
            "11:00 AM",
            "2025-10-26T11:00:00",
        ),
    ]
}

fn line(code: &str, description: &str, fee: f64) -> ProcedureLine {
    ProcedureLine {
        code: code.into(),
        description: description.into(),
        fee,
    }
}

pub fn default_claims() -> Vec<Claim> {
    vec![
        Claim {
            id: 5001,
            claim_num: 5001,
            pat_num: Some(1001),
            patient_name: "Sarah Johnson".into(),
            patient_email: "sarah.j@email.com".into(),
            patient_phone: "(555) 123-4567".into(),
            insurance: "Delta Dental PPO".into(),
            service_date: "2025-09-15".into(),
            due_date: "2025-10-15".into(),
            total_billed: 3850.0,
            insurance_paid: 595.0,
            patient_responsibility: 3255.0,
            patient_owes: 3255.0,
            status: ClaimStatus::Pending,
            procedures: vec![line("D2740", "Crown - Porcelain/Ceramic", 3850.0)],
            last_reminder_sent: None,
            reason: "Insurance covering 15% - awaiting response".into(),
        },
        Claim {
            id: 5002,
            claim_num: 5002,
            pat_num: Some(1002),
            patient_name: "Michael Chen".into(),
            patient_email: "mchen@email.com".into(),
            patient_phone: "(555) 234-5678".into(),
            insurance: "MetLife Dental".into(),
            service_date: "2025-08-20".into(),
            due_date: "2025-09-20".into(),
            total_billed: 1200.0,
            insurance_paid: 960.0,
            patient_responsibility: 240.0,
            patient_owes: 240.0,
            status: ClaimStatus::Overdue,
            procedures: vec![
                line("D3310", "Root Canal - Anterior", 900.0),
                line("D2740", "Crown Build-up", 300.0),
            ],
            last_reminder_sent: Some("2025-10-01".into()),
            reason: "Insurance paid 80% - patient owes remaining balance".into(),
        },
        Claim {
            id: 5003,
            claim_num: 5003,
            pat_num: Some(1004),
            patient_name: "Emily Watson".into(),
            patient_email: "ewatson@email.com".into(),
            patient_phone: "(555) 456-7890".into(),
            insurance: "Cigna Dental".into(),
            service_date: "2025-10-01".into(),
            due_date: "2025-11-01".into(),
            total_billed: 450.0,
            insurance_paid: 360.0,
            patient_responsibility: 90.0,
            patient_owes: 90.0,
            status: ClaimStatus::Sent,
            procedures: vec![line("D9972", "External Bleaching", 450.0)],
            last_reminder_sent: Some("2025-10-15".into()),
            reason: "Payment reminder sent - awaiting patient payment".into(),
        },
        Claim {
            id: 5004,
            claim_num: 5004,
            pat_num: Some(1003),
            patient_name: "David Rodriguez".into(),
            patient_email: "drodriguez@email.com".into(),
            patient_phone: "(555) 345-6789".into(),
            insurance: "Guardian Dental".into(),
            service_date: "2025-07-10".into(),
            due_date: "2025-08-10".into(),
            total_billed: 650.0,
            insurance_paid: 520.0,
            patient_responsibility: 130.0,
            patient_owes: 130.0,
            status: ClaimStatus::Overdue,
            procedures: vec![
                line("D2150", "Amalgam - Two Surfaces", 220.0),
                line("D1110", "Prophylaxis - Adult", 120.0),
                line("D0210", "Complete Intraoral Radiographs", 200.0),
            ],
            last_reminder_sent: Some("2025-09-10".into()),
            reason: "Multiple reminders sent - contact patient directly".into(),
        },
    ]
}

pub fn default_office_state() -> OfficeState {
    OfficeState {
        open_requests: vec![
            OpenRequest {
                id: 1,
                patient: "Angela Martinez".into(),
                requested_date: "Nov 06, 2025".into(),
                preferred_time: "Morning".into(),
                request_type: "Cleaning".into(),
                request_date: "Oct 18, 2025".into(),
                phone: "(555) 123-4567".into(),
                urgent: false,
            },
            OpenRequest {
                id: 2,
                patient: "Thomas Wright".into(),
                requested_date: "Oct 26, 2025".into(),
                preferred_time: "Afternoon".into(),
                request_type: "Consultation".into(),
                request_date: "Oct 19, 2025".into(),
                phone: "(555) 234-5678".into(),
                urgent: false,
            },
            OpenRequest {
                id: 3,
                patient: "Rebecca Hill".into(),
                requested_date: "Oct 27, 2025".into(),
                preferred_time: "Any".into(),
                request_type: "Emergency".into(),
                request_date: "Oct 19, 2025".into(),
                phone: "(555) 345-6789".into(),
                urgent: true,
            },
        ],
        rooms: vec![
            Room {
                id: 1,
                name: "Room 1".into(),
                status: RoomStatus::Occupied,
                patient: Some("John Smith".into()),
            },
            Room {
                id: 2,
                name: "Room 2".into(),
                status: RoomStatus::Available,
                patient: None,
            },
            Room {
                id: 3,
                name: "Room 3".into(),
                status: RoomStatus::Cleaning,
                patient: None,
            },
            Room {
                id: 4,
                name: "Room 4".into(),
                status: RoomStatus::Available,
                patient: None,
            },
        ],
        recommendations: vec![
            CareRecommendation {
                id: 1,
                patient: "Sarah Johnson".into(),
                recommendation_type: "6-Month Cleaning".into(),
                due_date: "2025-11-15".into(),
                last_visit: "2025-05-15".into(),
                priority: Priority::High,
                status: "pending".into(),
            },
            CareRecommendation {
                id: 2,
                patient: "John Smith".into(),
                recommendation_type: "Follow-up".into(),
                due_date: "2025-11-01".into(),
                last_visit: "2025-10-19".into(),
                priority: Priority::Medium,
                status: "pending".into(),
            },
        ],
    }
}

pub fn default_patient_profile() -> PatientProfile {
    PatientProfile {
        pat_num: 1001,
        name: "Sarah Johnson".into(),
        email: "sarah.j@email.com".into(),
        phone: "(555) 123-4567".into(),
        insurance: "Delta Dental PPO".into(),
        last_visit: "2025-08-15".into(),
        autopay_enrolled: true,
        autopay_failing: true,
        failed_payment_reason: Some("Card expired - please update payment method".into()),
        messages: vec![
            InboxMessage {
                id: 1,
                from: "Dr. Chen's Office".into(),
                subject: "Appointment Confirmation".into(),
                message: "Your appointment is confirmed for Oct 25 at 10:30 AM".into(),
                date: "Oct 18, 2025".into(),
                time: "2:30 PM".into(),
                unread: true,
            },
            InboxMessage {
                id: 2,
                from: "Billing Department".into(),
                subject: "Payment Received".into(),
                message: "Thank you for your payment of $150".into(),
                date: "Oct 15, 2025".into(),
                time: "11:00 AM".into(),
                unread: true,
            },
            InboxMessage {
                id: 3,
                from: "Dr. Chen's Office".into(),
                subject: "Insurance Update".into(),
                message: "Your insurance claim has been processed".into(),
                date: "Oct 10, 2025".into(),
                time: "3:45 PM".into(),
                unread: false,
            },
        ],
        upcoming_recommendations: vec![
            PortalRecommendation {
                id: 1,
                recommendation_type: "6-Month Cleaning".into(),
                due_date: "Nov 15, 2025".into(),
                provider: "Dr. Chen".into(),
                priority: Priority::High,
            },
            PortalRecommendation {
                id: 2,
                recommendation_type: "Annual Checkup".into(),
                due_date: "Dec 1, 2025".into(),
                provider: "Dr. Park".into(),
                priority: Priority::Medium,
            },
        ],
    }
}

/// The canned fee schedule exposed to scheduling and checkout flows.
pub fn procedure_codes() -> Vec<ProcedureCode> {
    [
        ("D0120", "Periodic Oral Evaluation", 85.0),
        ("D0150", "Comprehensive Oral Evaluation", 100.0),
        ("D0210", "Complete Intraoral Radiographs", 200.0),
        ("D1110", "Prophylaxis - Adult", 120.0),
        ("D1120", "Prophylaxis - Child", 85.0),
        ("D2140", "Amalgam - One Surface", 180.0),
        ("D2150", "Amalgam - Two Surfaces", 220.0),
        ("D2330", "Resin - One Surface", 195.0),
        ("D2740", "Crown - Porcelain/Ceramic", 1500.0),
        ("D3310", "Root Canal - Anterior", 900.0),
        ("D3320", "Root Canal - Bicuspid", 1100.0),
        ("D7140", "Extraction - Erupted Tooth", 250.0),
        ("D9972", "External Bleaching", 450.0),
    ]
    .into_iter()
    .map(|(code, description, fee)| ProcedureCode {
        code: code.into(),
        description: description.into(),
        fee,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ids_are_unique_per_collection() {
        let store = default_store();

        let mut patient_ids: Vec<i64> = store.patients.iter().map(|p| p.pat_num).collect();
        patient_ids.sort_unstable();
        patient_ids.dedup();
        assert_eq!(patient_ids.len(), store.patients.len());

        let mut appointment_ids: Vec<i64> = store.appointments.iter().map(|a| a.id).collect();
        appointment_ids.sort_unstable();
        appointment_ids.dedup();
        assert_eq!(appointment_ids.len(), store.appointments.len());
    }

    #[test]
    fn test_default_alias_fields_in_sync() {
        let store = default_store();
        for appointment in &store.appointments {
            assert_eq!(appointment.id, appointment.apt_num);
        }
        for claim in &store.claims {
            assert_eq!(claim.id, claim.claim_num);
            assert_eq!(claim.patient_responsibility, claim.patient_owes);
        }
    }

    #[test]
    fn test_default_references_resolve() {
        let store = default_store();
        for appointment in &store.appointments {
            let pat_num = appointment.pat_num.expect("seed appointments are resolved");
            assert!(store.patients.iter().any(|p| p.pat_num == pat_num));
        }
        for claim in &store.claims {
            let pat_num = claim.pat_num.expect("seed claims are resolved");
            assert!(store.patients.iter().any(|p| p.pat_num == pat_num));
        }
    }
}
