//! Field encoding
//!
//! Turns a [`FieldSet`] into the [`Payload`] of one create or update call.
//!
//! ## Rules
//!
//! | Kind | Value | Emitted |
//! |------|-------|---------|
//! | reference-like | at least one reference | `"{field}@bind": "/{set}({id})"` |
//! | any | other non-null value | `"{field}": value` |
//! | any | null | nothing |
//!
//! Reference-like kinds are `Lookup`, `Customer` and `Owner`. A lookup
//! binds to one record: when several references are supplied only the
//! first is used and the rest are dropped.
//!
//! Encoding is all-or-nothing. The payload is only returned once every
//! field encoded; the first failing field (an unresolvable collection, a
//! non-finite float, two fields landing on the same payload key) fails the
//! whole call and no partial payload escapes.

use crate::resolver::MetadataResolver;
use recordgate_core::{bind_key, bind_path, Error, Field, FieldSet, Payload, Result};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{debug, warn};

/// Encodes field sets into store payloads
#[derive(Clone)]
pub struct FieldEncoder {
    resolver: Arc<dyn MetadataResolver>,
}

impl FieldEncoder {
    /// Create an encoder resolving reference targets through `resolver`
    pub fn new(resolver: Arc<dyn MetadataResolver>) -> Self {
        FieldEncoder { resolver }
    }

    /// Encode one field into zero or one payload entries
    ///
    /// # Errors
    ///
    /// Returns `MetadataUnavailable` if a reference target cannot be
    /// resolved, `InvalidInput` if a scalar has no JSON form.
    pub async fn encode_field(&self, field: &Field) -> Result<Option<(String, JsonValue)>> {
        if field.kind.is_reference() {
            if let Some(refs) = field.value.as_references().filter(|r| !r.is_empty()) {
                if refs.len() > 1 {
                    warn!(
                        target: "recordgate::encoding",
                        field = %field.name,
                        supplied = refs.len(),
                        "Reference field holds several targets; binding the first"
                    );
                }
                let target = &refs[0];
                let entity_set = self.resolver.resolve(&target.entity_type).await?;
                let path = bind_path(&entity_set, &target.id);
                debug!(target: "recordgate::encoding", field = %field.name, path = %path, "Encoded reference");
                return Ok(Some((bind_key(&field.name), JsonValue::String(path))));
            }
        }

        if field.value.is_null() {
            return Ok(None);
        }
        Ok(Some((field.name.clone(), field.value.to_json()?)))
    }

    /// Encode every field of `fields` into one payload
    ///
    /// # Errors
    ///
    /// Fails with the first field's error; nothing is returned on failure.
    /// A lookup `f` and a scalar named `f@bind` in the same set collide and
    /// fail with `InvalidInput`.
    pub async fn encode(&self, fields: &FieldSet) -> Result<Payload> {
        let mut payload = Payload::new();
        for field in fields.iter() {
            if let Some((key, value)) = self.encode_field(field).await? {
                if payload.contains_key(&key) {
                    return Err(Error::invalid_input(format!(
                        "field '{}' encodes to payload key '{}', which is already set",
                        field.name, key
                    )));
                }
                payload.insert(key, value);
            }
        }
        Ok(payload)
    }
}

impl std::fmt::Debug for FieldEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldEncoder").finish_non_exhaustive()
    }
}
