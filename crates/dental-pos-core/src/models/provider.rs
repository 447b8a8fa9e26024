//! Provider and fee-schedule reference data.

use serde::{Deserialize, Serialize};

/// Fallback color tag for unresolved providers.
pub const DEFAULT_PROVIDER_COLOR: &str = "blue";

/// Default appointment slot length when no provider is known.
pub const DEFAULT_SLOT_MINUTES: i64 = 30;

/// A provider. Read-mostly reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: i64,
    /// Display name, e.g. "Dr. Michael Chen"
    pub name: String,
    pub specialty: String,
    /// Default appointment slot length in minutes
    pub slot_duration: i64,
    /// Display color tag used by scheduling views
    pub color: String,
}

/// A procedure code with its standard fee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureCode {
    pub code: String,
    pub description: String,
    pub fee: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_wire_names() {
        let provider = Provider {
            id: 1,
            name: "Dr. Michael Chen".into(),
            specialty: "General Dentistry".into(),
            slot_duration: 30,
            color: "blue".into(),
        };
        let json = serde_json::to_value(&provider).unwrap();
        assert_eq!(json["slotDuration"], 30);
        assert_eq!(json["color"], "blue");
    }
}
