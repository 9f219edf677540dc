//! OData Web API wire helpers
//!
//! Pure functions shared by the HTTP store: URL construction and response
//! parsing. Kept free of any transport so they can be exercised without a
//! server.

use recordgate_core::{normalize_id, ListPage, Record, StoreError};
use serde_json::Value as JsonValue;

/// Response header carrying the URL of a record created without a body
pub const ENTITY_ID_HEADER: &str = "OData-EntityId";

/// Key under which a body-less create reports the new identity
pub const CREATED_ID_KEY: &str = "id";

/// `{base}/{collection}`
pub fn collection_url(base: &str, collection: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), collection)
}

/// `{base}/{collection}({id})` with the identity normalized
pub fn record_url(base: &str, collection: &str, id: &str) -> String {
    format!("{}({})", collection_url(base, collection), normalize_id(id))
}

/// Metadata URL answering a collection's entity-set name
pub fn entity_definition_url(base: &str, logical_name: &str) -> String {
    format!(
        "{}/EntityDefinitions(LogicalName='{}')?$select=EntitySetName",
        base.trim_end_matches('/'),
        logical_name.replace('\'', "''")
    )
}

/// Collection URL of every entity definition
pub fn entity_definitions_url(base: &str) -> String {
    format!("{}/EntityDefinitions", base.trim_end_matches('/'))
}

/// Query selecting the primary-key attribute of the definition whose
/// entity set is `entity_set`
pub fn primary_id_params(entity_set: &str) -> Vec<(&'static str, String)> {
    vec![
        ("$select", "PrimaryIdAttribute".to_string()),
        (
            "$filter",
            format!("EntitySetName eq '{}'", entity_set.replace('\'', "''")),
        ),
    ]
}

/// Unwrap a list response `{"value": [...], "@odata.nextLink": ...}`
pub fn parse_list_page(body: JsonValue) -> Result<ListPage, StoreError> {
    let JsonValue::Object(mut envelope) = body else {
        return Err(StoreError::Parse("list response is not an object".to_string()));
    };
    let next_link = envelope
        .get("@odata.nextLink")
        .and_then(|v| v.as_str())
        .map(str::to_string);
    let entities = match envelope.remove("value") {
        Some(JsonValue::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                JsonValue::Object(record) => Ok(record),
                other => Err(StoreError::Parse(format!(
                    "list entry is not an object: {}",
                    other
                ))),
            })
            .collect::<Result<Vec<Record>, _>>()?,
        _ => {
            return Err(StoreError::Parse(
                "list response has no 'value' array".to_string(),
            ))
        }
    };
    Ok(ListPage {
        entities,
        next_link,
    })
}

/// Interpret a single-record response body
pub fn parse_record(body: JsonValue) -> Result<Record, StoreError> {
    match body {
        JsonValue::Object(record) => Ok(record),
        other => Err(StoreError::Parse(format!(
            "record response is not an object: {}",
            other
        ))),
    }
}

/// Identity inside an `OData-EntityId` URL (`.../widgets(abc)` → `abc`)
pub fn parse_entity_id(header: &str) -> Option<String> {
    let open = header.rfind('(')?;
    let close = header.rfind(')')?;
    if close <= open + 1 {
        return None;
    }
    Some(normalize_id(&header[open + 1..close]))
}

/// `EntitySetName` from a metadata response
pub fn parse_entity_set_name(body: &JsonValue) -> Result<String, StoreError> {
    body.get("EntitySetName")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| StoreError::Parse("metadata response has no EntitySetName".to_string()))
}

/// `PrimaryIdAttribute` of the single definition in a filtered
/// `EntityDefinitions` response
///
/// An empty `value` array means no collection has that entity set.
pub fn parse_primary_id_attribute(body: JsonValue, entity_set: &str) -> Result<String, StoreError> {
    let page = parse_list_page(body)?;
    let definition = page
        .entities
        .first()
        .ok_or_else(|| StoreError::NotFound(format!("no entity definition for set '{}'", entity_set)))?;
    definition
        .get("PrimaryIdAttribute")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| StoreError::Parse("entity definition has no PrimaryIdAttribute".to_string()))
}

/// Best-effort error message from an error response body
///
/// Understands `{"error": {"message": ...}}`; anything else is returned
/// trimmed and truncated.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<JsonValue>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().chars().take(200).collect())
}

/// Map a non-success status to a store error
pub fn status_error(status: u16, body: &str) -> StoreError {
    let message = error_message(body);
    if status == 404 {
        StoreError::NotFound(message)
    } else {
        StoreError::Status { status, message }
    }
}
