//! Insurance claim models.

use serde::{Deserialize, Serialize};

/// Claim lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    Pending,
    Sent,
    Overdue,
    Paid,
    Denied,
    #[serde(rename = "partially_covered")]
    PartiallyCovered,
    #[serde(other)]
    Unknown,
}

/// A single line-item procedure on a claim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureLine {
    pub code: String,
    pub description: String,
    pub fee: f64,
}

/// An insurance claim.
///
/// `claim_num` mirrors `id` and `patient_owes` mirrors
/// `patient_responsibility`; both aliases are re-synced by the resolver on
/// every write, so callers only ever set the canonical field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: i64,
    /// Legacy alias of `id`
    pub claim_num: i64,
    /// Owning patient id (soft reference)
    pub pat_num: Option<i64>,
    /// Denormalized patient display name
    pub patient_name: String,
    /// Denormalized patient contact snapshot
    #[serde(default)]
    pub patient_email: String,
    #[serde(default)]
    pub patient_phone: String,
    pub insurance: String,
    /// Date of service, "YYYY-MM-DD"
    pub service_date: String,
    /// Payment due date, "YYYY-MM-DD"
    pub due_date: String,
    pub total_billed: f64,
    pub insurance_paid: f64,
    /// Canonical patient-responsibility amount
    pub patient_responsibility: f64,
    /// Legacy alias of `patient_responsibility`
    pub patient_owes: f64,
    pub status: ClaimStatus,
    #[serde(default)]
    pub procedures: Vec<ProcedureLine>,
    /// Date the last reminder went out, "YYYY-MM-DD"
    #[serde(default)]
    pub last_reminder_sent: Option<String>,
    /// Free-text explanation shown in the portal
    #[serde(default)]
    pub reason: String,
}

impl Claim {
    /// Compatibility read alias for the patient-responsibility amount.
    pub fn patient_owes(&self) -> f64 {
        self.patient_responsibility
    }
}

/// Caller-supplied fields for a new claim.
#[derive(Debug, Clone, Default)]
pub struct NewClaim {
    pub pat_num: Option<i64>,
    pub patient_name: Option<String>,
    pub insurance: Option<String>,
    pub service_date: String,
    pub due_date: String,
    pub total_billed: f64,
    pub insurance_paid: f64,
    pub patient_responsibility: f64,
    pub status: Option<ClaimStatus>,
    pub procedures: Vec<ProcedureLine>,
    pub reason: Option<String>,
}

/// Partial update for an existing claim. Writing
/// `patient_responsibility` updates both stored alias fields.
#[derive(Debug, Clone, Default)]
pub struct ClaimPatch {
    pub status: Option<ClaimStatus>,
    pub patient_responsibility: Option<f64>,
    pub insurance_paid: Option<f64>,
    pub due_date: Option<String>,
    pub last_reminder_sent: Option<Option<String>>,
    pub reason: Option<String>,
}

impl ClaimPatch {
    /// Merge this patch over a claim in place. The alias fields are re-synced
    /// by the resolver after the merge.
    pub fn apply(&self, claim: &mut Claim) {
        if let Some(status) = self.status {
            claim.status = status;
        }
        if let Some(amount) = self.patient_responsibility {
            claim.patient_responsibility = amount;
            claim.patient_owes = amount;
        }
        if let Some(amount) = self.insurance_paid {
            claim.insurance_paid = amount;
        }
        if let Some(due_date) = &self.due_date {
            claim.due_date = due_date.clone();
        }
        if let Some(reminder) = &self.last_reminder_sent {
            claim.last_reminder_sent = reminder.clone();
        }
        if let Some(reason) = &self.reason {
            claim.reason = reason.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_claim() -> Claim {
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
            procedures: vec![ProcedureLine {
                code: "D3310".into(),
                description: "Root Canal - Anterior".into(),
                fee: 900.0,
            }],
            last_reminder_sent: None,
            reason: String::new(),
        }
    }

    #[test]
    fn test_patch_write_through_aliases() {
        let mut claim = test_claim();
        let patch = ClaimPatch {
            patient_responsibility: Some(0.0),
            status: Some(ClaimStatus::Paid),
            ..Default::default()
        };
        patch.apply(&mut claim);

        assert_eq!(claim.patient_responsibility, 0.0);
        assert_eq!(claim.patient_owes, 0.0);
        assert_eq!(claim.patient_owes(), 0.0);
        assert_eq!(claim.status, ClaimStatus::Paid);
    }

    #[test]
    fn test_legacy_blob_with_both_aliases_rehydrates() {
        let json = serde_json::to_string(&test_claim()).unwrap();
        assert!(json.contains("\"patientOwes\":240.0"));
        assert!(json.contains("\"claimNum\":5002"));

        let back: Claim = serde_json::from_str(&json).unwrap();
        assert_eq!(back, test_claim());
    }

    #[test]
    fn test_partially_covered_wire_string() {
        let json = serde_json::to_string(&ClaimStatus::PartiallyCovered).unwrap();
        assert_eq!(json, "\"partially_covered\"");
    }
}
