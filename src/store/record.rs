//! Location record type and candidate validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single accepted location report.
///
/// Field values are kept exactly as the client sent them. No range or type
/// checks are applied, so a string timestamp stays a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub latitude: Value,
    pub longitude: Value,
    pub timestamp: Value,
}

impl LocationRecord {
    /// Build a record from a raw candidate.
    ///
    /// Returns `None` unless the candidate is an object whose `latitude`,
    /// `longitude` and `timestamp` are all present and truthy. Any other keys
    /// on the candidate are dropped.
    pub fn from_candidate(candidate: &Value) -> Option<Self> {
        let fields = candidate.as_object()?;
        let pick = |key: &str| fields.get(key).filter(|v| is_truthy(v)).cloned();

        Some(Self {
            latitude: pick("latitude")?,
            longitude: pick("longitude")?,
            timestamp: pick("timestamp")?,
        })
    }
}

/// Loose truthiness: `null`, `false`, zero and the empty string are falsy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_truthy_falsy_values() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!(-0.0)));
        assert!(!is_truthy(&json!("")));
    }

    #[test]
    fn test_is_truthy_truthy_values() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(-12.5)));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_from_candidate_keeps_only_location_fields() {
        let candidate = json!({
            "latitude": 52.37,
            "longitude": 4.89,
            "timestamp": "2024-05-01T10:00:00Z",
            "accuracy": 5,
            "device": "phone"
        });

        let record = LocationRecord::from_candidate(&candidate).unwrap();
        assert_eq!(record.latitude, json!(52.37));
        assert_eq!(record.longitude, json!(4.89));
        assert_eq!(record.timestamp, json!("2024-05-01T10:00:00Z"));

        let serialized = serde_json::to_value(&record).unwrap();
        assert_eq!(serialized.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_from_candidate_rejects_missing_or_falsy_fields() {
        assert!(LocationRecord::from_candidate(&json!({"longitude": 2, "timestamp": 1})).is_none());
        assert!(LocationRecord::from_candidate(&json!({"latitude": 1, "timestamp": 1})).is_none());
        assert!(LocationRecord::from_candidate(&json!({"latitude": 1, "longitude": 2})).is_none());
        assert!(
            LocationRecord::from_candidate(&json!({"latitude": 0, "longitude": 5, "timestamp": 300}))
                .is_none()
        );
        assert!(
            LocationRecord::from_candidate(&json!({"latitude": 1, "longitude": 2, "timestamp": null}))
                .is_none()
        );
    }

    #[test]
    fn test_from_candidate_rejects_non_objects() {
        assert!(LocationRecord::from_candidate(&json!(42)).is_none());
        assert!(LocationRecord::from_candidate(&json!("latitude")).is_none());
        assert!(LocationRecord::from_candidate(&json!([1, 2, 3])).is_none());
    }

    #[test]
    fn test_from_candidate_does_not_check_types() {
        let record =
            LocationRecord::from_candidate(&json!({"latitude": "north", "longitude": true, "timestamp": 7}))
                .unwrap();
        assert_eq!(record.latitude, json!("north"));
        assert_eq!(record.longitude, json!(true));
    }
}
