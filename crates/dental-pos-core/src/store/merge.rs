//! Tolerant decoding of persisted blobs.
//!
//! A persisted document may come from an older build and miss whole
//! sections, or carry a section that no longer deserializes. Decoding
//! recovers section by section: good sections load as-is, bad or missing
//! ones fall back to the compiled defaults. Nested office and profile
//! objects merge key-wise over their defaults so a partial object keeps
//! the default value for anything it omits.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Once;

use super::{defaults, StoreData};

static BLOB_WARNING: Once = Once::new();

/// Decode a persisted blob, falling back per section on any damage.
pub fn decode_blob(raw: &str) -> StoreData {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            BLOB_WARNING.call_once(|| {
                log::warn!("persisted store is not valid JSON, starting from defaults: {}", err);
            });
            return defaults::default_store();
        }
    };

    let mut map = match value {
        Value::Object(map) => map,
        _ => {
            BLOB_WARNING.call_once(|| {
                log::warn!("persisted store is not a JSON object, starting from defaults");
            });
            return defaults::default_store();
        }
    };

    StoreData {
        patients: section(&mut map, "patients", defaults::default_patients),
        providers: section(&mut map, "providers", defaults::default_providers),
        appointments: section(&mut map, "appointments", defaults::default_appointments),
        claims: section(&mut map, "claims", defaults::default_claims),
        office_state: merged_section(&mut map, "officeState", defaults::default_office_state),
        patient_profile: merged_section(
            &mut map,
            "patientProfile",
            defaults::default_patient_profile,
        ),
    }
}

/// Pull a section out of the blob, or use the fallback when it is
/// missing or does not deserialize.
fn section<T, F>(map: &mut Map<String, Value>, key: &str, fallback: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match map.remove(key) {
        None => fallback(),
        Some(value) => match serde_json::from_value(value) {
            Ok(parsed) => parsed,
            Err(err) => {
                log::warn!("persisted section '{}' is malformed, using defaults: {}", key, err);
                fallback()
            }
        },
    }
}

/// Like [`section`], but for nested objects: persisted keys override the
/// default object key by key, so older blobs keep default values for
/// fields they never stored.
fn merged_section<T, F>(map: &mut Map<String, Value>, key: &str, fallback: F) -> T
where
    T: DeserializeOwned + serde::Serialize,
    F: FnOnce() -> T,
{
    let default = fallback();
    let stored = match map.remove(key) {
        Some(Value::Object(stored)) => stored,
        Some(_) => {
            log::warn!("persisted section '{}' is not an object, using defaults", key);
            return default;
        }
        None => return default,
    };

    let mut merged = match serde_json::to_value(&default) {
        Ok(Value::Object(base)) => base,
        _ => return default,
    };
    for (field, value) in stored {
        merged.insert(field, value);
    }

    match serde_json::from_value(Value::Object(merged)) {
        Ok(parsed) => parsed,
        Err(err) => {
            log::warn!("persisted section '{}' is malformed, using defaults: {}", key, err);
            default
        }
    }
}
