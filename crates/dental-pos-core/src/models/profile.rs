//! Portal identity: the signed-in patient's profile.

use serde::{Deserialize, Serialize};

use super::Priority;

/// An inbox message in the patient portal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InboxMessage {
    pub id: i64,
    pub from: String,
    pub subject: String,
    pub message: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub unread: bool,
}

/// A recommendation surfaced on the portal dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortalRecommendation {
    pub id: i64,
    #[serde(rename = "type")]
    pub recommendation_type: String,
    pub due_date: String,
    pub provider: String,
    pub priority: Priority,
}

/// The signed-in patient's profile, denormalized for the portal views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    /// Which patient this portal session belongs to
    pub pat_num: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub insurance: String,
    pub last_visit: String,
    #[serde(default)]
    pub autopay_enrolled: bool,
    #[serde(default)]
    pub autopay_failing: bool,
    #[serde(default)]
    pub failed_payment_reason: Option<String>,
    #[serde(default)]
    pub messages: Vec<InboxMessage>,
    #[serde(default)]
    pub upcoming_recommendations: Vec<PortalRecommendation>,
}

impl PatientProfile {
    /// Count of unread inbox messages.
    pub fn unread_count(&self) -> usize {
        self.messages.iter().filter(|m| m.unread).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unread_count() {
        let profile = PatientProfile {
            pat_num: 1001,
            name: "Sarah Johnson".into(),
            email: "sarah.j@email.com".into(),
            phone: "(555) 123-4567".into(),
            insurance: "Delta Dental PPO".into(),
            last_visit: "2025-08-15".into(),
            autopay_enrolled: true,
            autopay_failing: false,
            failed_payment_reason: None,
            messages: vec![
                InboxMessage {
                    id: 1,
                    from: "Billing Department".into(),
                    subject: "Payment Received".into(),
                    message: "Thank you for your payment of $150".into(),
                    date: "Oct 15, 2025".into(),
                    time: "11:00 AM".into(),
                    unread: true,
                },
                InboxMessage {
                    id: 2,
                    from: "Dr. Chen's Office".into(),
                    subject: "Insurance Update".into(),
                    message: "Your insurance claim has been processed".into(),
                    date: "Oct 10, 2025".into(),
                    time: "3:45 PM".into(),
                    unread: false,
                },
            ],
            upcoming_recommendations: vec![],
        };
        assert_eq!(profile.unread_count(), 1);
    }
}
