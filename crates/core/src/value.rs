//! Field values for recordgate
//!
//! This module defines:
//! - FieldValue: the in-memory value of one record field
//!
//! ## Value Model
//!
//! A field holds either a scalar or a sequence of references:
//! - Null, Bool, Int, Float, String, Date
//! - References: what a lookup control produces, an ordered list of
//!   [`RecordRef`] (usually exactly one entry)
//!
//! `Null` means "no value". The encoder omits null fields entirely, so a
//! `Null` never reaches the wire.
//!
//! ## Type Rules
//!
//! - `Int(1) != Float(1.0)`: different variants are never equal
//! - Float equality follows IEEE-754 (`NaN != NaN`)
//! - Non-finite floats cannot be represented in JSON and fail encoding

use crate::error::{Error, Result};
use crate::reference::RecordRef;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value as JsonValue;

/// Value of a single record field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// No value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Point in time, sent as RFC 3339 in UTC
    Date(DateTime<Utc>),
    /// Ordered references to other records
    References(Vec<RecordRef>),
}

impl FieldValue {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "Null",
            FieldValue::Bool(_) => "Bool",
            FieldValue::Int(_) => "Int",
            FieldValue::Float(_) => "Float",
            FieldValue::String(_) => "String",
            FieldValue::Date(_) => "Date",
            FieldValue::References(_) => "References",
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the reference list if this is a References value
    pub fn as_references(&self) -> Option<&[RecordRef]> {
        match self {
            FieldValue::References(r) => Some(r),
            _ => None,
        }
    }

    /// The first reference, if this value holds at least one
    ///
    /// Lookup fields bind to a single record. When a control hands back
    /// several references only index 0 is used; the rest are ignored.
    pub fn first_reference(&self) -> Option<&RecordRef> {
        self.as_references().and_then(|refs| refs.first())
    }

    /// Convert to the JSON form sent to the store
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for NaN or infinite floats.
    pub fn to_json(&self) -> Result<JsonValue> {
        Ok(match self {
            FieldValue::Null => JsonValue::Null,
            FieldValue::Bool(b) => JsonValue::Bool(*b),
            FieldValue::Int(i) => JsonValue::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .ok_or_else(|| {
                    Error::invalid_input(format!("float {} has no JSON representation", f))
                })?,
            FieldValue::String(s) => JsonValue::String(s.clone()),
            FieldValue::Date(d) => {
                JsonValue::String(d.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            FieldValue::References(refs) => serde_json::to_value(refs)
                .map_err(|e| Error::invalid_input(format!("unserializable reference: {}", e)))?,
        })
    }

    /// Convert a JSON value read from the store back into a field value
    ///
    /// Arrays of reference descriptors become `References`. Other arrays
    /// and nested objects have no field representation and yield `None`.
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Null => Some(FieldValue::Null),
            JsonValue::Bool(b) => Some(FieldValue::Bool(*b)),
            JsonValue::Number(n) => n
                .as_i64()
                .map(FieldValue::Int)
                .or_else(|| n.as_f64().map(FieldValue::Float)),
            JsonValue::String(s) => Some(FieldValue::String(s.clone())),
            JsonValue::Array(_) => serde_json::from_value::<Vec<RecordRef>>(value.clone())
                .ok()
                .map(FieldValue::References),
            JsonValue::Object(_) => None,
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(d: DateTime<Utc>) -> Self {
        FieldValue::Date(d)
    }
}

impl From<RecordRef> for FieldValue {
    fn from(r: RecordRef) -> Self {
        FieldValue::References(vec![r])
    }
}

impl From<Vec<RecordRef>> for FieldValue {
    fn from(r: Vec<RecordRef>) -> Self {
        FieldValue::References(r)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(o: Option<T>) -> Self {
        o.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_scalars_to_json() {
        assert_eq!(FieldValue::Bool(true).to_json().unwrap(), json!(true));
        assert_eq!(FieldValue::Int(-7).to_json().unwrap(), json!(-7));
        assert_eq!(FieldValue::Float(1.5).to_json().unwrap(), json!(1.5));
        assert_eq!(FieldValue::from("x").to_json().unwrap(), json!("x"));
        assert_eq!(FieldValue::Null.to_json().unwrap(), JsonValue::Null);
    }

    #[test]
    fn test_date_is_rfc3339_utc() {
        let d = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        assert_eq!(
            FieldValue::Date(d).to_json().unwrap(),
            json!("2024-03-01T08:30:00.000Z")
        );
    }

    #[test]
    fn test_non_finite_float_fails() {
        let err = FieldValue::Float(f64::NAN).to_json().unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
        assert!(FieldValue::Float(f64::INFINITY).to_json().is_err());
    }

    #[test]
    fn test_references_to_json() {
        let v = FieldValue::from(RecordRef::new("users", "{abc}"));
        assert_eq!(
            v.to_json().unwrap(),
            json!([{"id": "{abc}", "entityType": "users"}])
        );
    }

    #[test]
    fn test_first_reference() {
        let v = FieldValue::References(vec![
            RecordRef::new("users", "1"),
            RecordRef::new("teams", "2"),
        ]);
        assert_eq!(v.first_reference().unwrap().entity_type, "users");
        assert!(FieldValue::References(vec![]).first_reference().is_none());
        assert!(FieldValue::from("x").first_reference().is_none());
    }

    #[test]
    fn test_float_equality_is_ieee() {
        assert_ne!(FieldValue::Float(f64::NAN), FieldValue::Float(f64::NAN));
        assert_ne!(FieldValue::Int(1), FieldValue::Float(1.0));
    }

    #[test]
    fn test_from_json() {
        assert_eq!(FieldValue::from_json(&json!(3)), Some(FieldValue::Int(3)));
        assert_eq!(FieldValue::from_json(&json!(2.5)), Some(FieldValue::Float(2.5)));
        assert_eq!(FieldValue::from_json(&json!("s")), Some(FieldValue::from("s")));
        assert_eq!(FieldValue::from_json(&JsonValue::Null), Some(FieldValue::Null));
        assert_eq!(FieldValue::from_json(&json!({"a": 1})), None);
        assert_eq!(FieldValue::from_json(&json!([1, 2])), None);
        assert_eq!(
            FieldValue::from_json(&json!([{"id": "1", "entityType": "users"}])),
            Some(FieldValue::from(RecordRef::new("users", "1")))
        );
    }

    #[test]
    fn test_from_option() {
        assert_eq!(FieldValue::from(None::<&str>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some(4_i64)), FieldValue::Int(4));
    }
}
