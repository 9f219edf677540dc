//! Field descriptors and field sets
//!
//! Feature code hands the record-access layer a [`FieldSet`]: an ordered
//! list of `(name, value, kind)` triples. The kind is what the host's
//! attribute model reports for the field and decides whether a reference
//! value is sent as a relationship binding or passed through untouched.

use crate::value::FieldValue;
use serde::{Deserialize, Serialize};

/// Attribute kind as reported by the host's attribute model
///
/// `Lookup`, `Customer` and `Owner` all denote "points at another record"
/// and are handled identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Plain value (text, number, date, option, boolean)
    #[default]
    Scalar,
    /// Reference to a record in one fixed collection
    Lookup,
    /// Polymorphic reference to an account or contact
    Customer,
    /// Polymorphic reference to a user or team
    Owner,
}

impl FieldKind {
    /// True for the three reference-like kinds
    pub fn is_reference(&self) -> bool {
        matches!(self, FieldKind::Lookup | FieldKind::Customer | FieldKind::Owner)
    }
}

/// One named field with its value and kind
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Attribute name
    pub name: String,
    /// Current value
    pub value: FieldValue,
    /// Reported attribute kind
    pub kind: FieldKind,
}

impl Field {
    /// Create a field
    pub fn new(name: impl Into<String>, value: impl Into<FieldValue>, kind: FieldKind) -> Self {
        Field {
            name: name.into(),
            value: value.into(),
            kind,
        }
    }
}

/// Ordered set of fields for one create or update call
///
/// Names are unique: setting a name that already exists replaces the
/// earlier entry in place, keeping its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    fields: Vec<Field>,
}

impl FieldSet {
    /// Create an empty field set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scalar field (builder style)
    pub fn scalar(self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.field(name, value, FieldKind::Scalar)
    }

    /// Add a lookup field (builder style)
    pub fn lookup(self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.field(name, value, FieldKind::Lookup)
    }

    /// Add a field of any kind (builder style)
    pub fn field(
        mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
        kind: FieldKind,
    ) -> Self {
        self.insert(Field::new(name, value, kind));
        self
    }

    /// Insert or replace a field
    pub fn insert(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    /// Remove a field by name, returning it if present
    pub fn remove(&mut self, name: &str) -> Option<Field> {
        let pos = self.fields.iter().position(|f| f.name == name)?;
        Some(self.fields.remove(pos))
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check whether a field is present
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copy of this set without the named fields
    pub fn without(&self, names: &[&str]) -> FieldSet {
        FieldSet {
            fields: self
                .fields
                .iter()
                .filter(|f| !names.contains(&f.name.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Overlay another set on top of this one
    pub fn merge(mut self, other: FieldSet) -> FieldSet {
        for field in other.fields {
            self.insert(field);
        }
        self
    }
}

impl FromIterator<Field> for FieldSet {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut set = FieldSet::new();
        for field in iter {
            set.insert(field);
        }
        set
    }
}

impl IntoIterator for FieldSet {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::RecordRef;

    #[test]
    fn reference_kinds() {
        assert!(!FieldKind::Scalar.is_reference());
        assert!(FieldKind::Lookup.is_reference());
        assert!(FieldKind::Customer.is_reference());
        assert!(FieldKind::Owner.is_reference());
    }

    #[test]
    fn default_kind_is_scalar() {
        assert_eq!(FieldKind::default(), FieldKind::Scalar);
    }

    #[test]
    fn builder_keeps_order() {
        let set = FieldSet::new()
            .scalar("title", "x")
            .lookup("owner", RecordRef::new("users", "1"))
            .scalar("status", 1);
        let names: Vec<_> = set.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["title", "owner", "status"]);
        assert_eq!(set.get("owner").unwrap().kind, FieldKind::Lookup);
    }

    #[test]
    fn insert_replaces_in_place() {
        let set = FieldSet::new()
            .scalar("a", 1)
            .scalar("b", 2)
            .scalar("a", 3);
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().next().unwrap().value, FieldValue::Int(3));
    }

    #[test]
    fn without_drops_named_fields() {
        let set = FieldSet::new().scalar("id", "1").scalar("title", "x");
        let trimmed = set.without(&["id", "missing"]);
        assert!(!trimmed.contains("id"));
        assert!(trimmed.contains("title"));
        assert!(set.contains("id"));
    }

    #[test]
    fn remove_returns_field() {
        let mut set = FieldSet::new().scalar("a", 1);
        assert_eq!(set.remove("a").unwrap().name, "a");
        assert!(set.remove("a").is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn merge_overlays() {
        let base = FieldSet::new().scalar("a", 1).scalar("b", 2);
        let merged = base.merge(FieldSet::new().scalar("b", 20).scalar("c", 30));
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get("b").unwrap().value, FieldValue::Int(20));
    }

    #[test]
    fn kind_serde_lowercase() {
        assert_eq!(serde_json::to_string(&FieldKind::Owner).unwrap(), "\"owner\"");
        let k: FieldKind = serde_json::from_str("\"customer\"").unwrap();
        assert_eq!(k, FieldKind::Customer);
    }
}
