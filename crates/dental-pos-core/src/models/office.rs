//! Office sub-state: scheduling requests, operatories, care recommendations.

use serde::{Deserialize, Serialize};

/// Occupancy status of an operatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Available,
    Occupied,
    Cleaning,
    #[serde(other)]
    Unknown,
}

/// Care-recommendation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// An open scheduling request waiting for front-desk triage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenRequest {
    pub id: i64,
    /// Requester display name (free text, not a patient reference)
    pub patient: String,
    pub requested_date: String,
    pub preferred_time: String,
    #[serde(rename = "type")]
    pub request_type: String,
    pub request_date: String,
    pub phone: String,
    #[serde(default)]
    pub urgent: bool,
}

/// An operatory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub status: RoomStatus,
    /// Occupant display name when occupied
    pub patient: Option<String>,
}

/// A care recommendation tracked by the office.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CareRecommendation {
    pub id: i64,
    pub patient: String,
    #[serde(rename = "type")]
    pub recommendation_type: String,
    pub due_date: String,
    pub last_visit: String,
    pub priority: Priority,
    pub status: String,
}

/// Office-wide state outside the main entity collections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OfficeState {
    #[serde(default)]
    pub open_requests: Vec<OpenRequest>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub recommendations: Vec<CareRecommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgent_flag_defaults_false() {
        let json = r#"{
            "id": 1,
            "patient": "Angela Martinez",
            "requestedDate": "Nov 06, 2025",
            "preferredTime": "Morning",
            "type": "Cleaning",
            "requestDate": "Oct 18, 2025",
            "phone": "(555) 123-4567"
        }"#;
        let request: OpenRequest = serde_json::from_str(json).unwrap();
        assert!(!request.urgent);
        assert_eq!(request.request_type, "Cleaning");
    }

    #[test]
    fn test_unknown_room_status_degrades() {
        let status: RoomStatus = serde_json::from_str("\"fumigating\"").unwrap();
        assert_eq!(status, RoomStatus::Unknown);
    }
}
