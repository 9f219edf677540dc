//! Record references and identity normalization
//!
//! A [`RecordRef`] points at exactly one record in another collection. It is
//! what a lookup control hands back: the target's identity, the logical name
//! of the collection it lives in, and optionally a display name.
//!
//! Identities coming from the host environment are frequently wrapped in
//! braces (`{6f1c...}`). The store never accepts braces in a path, so every
//! identity goes through [`normalize_id`] before it is placed in a URL or a
//! bind path.

use serde::{Deserialize, Serialize};

/// Suffix appended to a field name to form its relationship-binding key
pub const BIND_SUFFIX: &str = "@bind";

/// Pointer to one record in another collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRef {
    /// Identity of the target record, possibly brace-wrapped
    pub id: String,
    /// Logical name of the target collection
    pub entity_type: String,
    /// Display name, if the source control supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RecordRef {
    /// Create a reference without a display name
    pub fn new(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        RecordRef {
            id: id.into(),
            entity_type: entity_type.into(),
            name: None,
        }
    }

    /// Attach a display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Identity with braces stripped
    pub fn normalized_id(&self) -> String {
        normalize_id(&self.id)
    }
}

/// Strip every `{` and `}` from an identity
pub fn normalize_id(id: &str) -> String {
    id.chars().filter(|c| *c != '{' && *c != '}').collect()
}

/// Build `"/{entity_set}({id})"` for a relationship binding
pub fn bind_path(entity_set: &str, id: &str) -> String {
    format!("/{}({})", entity_set, normalize_id(id))
}

/// Build the payload key a reference field is bound under
pub fn bind_key(field: &str) -> String {
    format!("{}{}", field, BIND_SUFFIX)
}
