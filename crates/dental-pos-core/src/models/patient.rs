//! Patient models.

use serde::{Deserialize, Serialize};

/// A patient record as stored in the patients collection.
///
/// `balance` is a cached legacy figure; the authoritative "amount owed" is
/// [`crate::aggregates::outstanding_balance`], derived from claims and
/// unpaid appointments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Numeric patient id, unique within the collection
    pub pat_num: i64,
    /// First name
    pub f_name: String,
    /// Last name
    pub l_name: String,
    /// Contact phone
    pub phone: String,
    /// Contact email
    pub email: String,
    /// Insurance plan name
    pub insurance: String,
    /// Cached balance (display only, see type docs)
    pub balance: f64,
    /// Last visit date, "YYYY-MM-DD"
    pub last_visit: String,
}

impl Patient {
    /// Full display name, `"first last"`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.f_name, self.l_name)
    }

    /// Case-insensitive, whitespace-trimmed match against a display name.
    pub fn matches_name(&self, name: &str) -> bool {
        self.display_name().to_lowercase() == name.trim().to_lowercase()
    }
}
