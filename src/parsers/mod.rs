pub mod collection;
pub mod status_range;

use crate::error::{Error, Result};
use serde_json::Value;

pub use collection::*;
pub use status_range::{parse_status_ranges, StatusRange};

/// The only collection format accepted as input
pub const POSTMAN_SCHEMA_V2_1: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Parse raw JSON bytes into a collection.
///
/// The document is decoded first, then its declared schema is checked, and only
/// then is it converted to the typed model, so each failure gets its own error.
pub fn parse_collection(json_bytes: &[u8]) -> Result<Collection> {
    let document: Value = serde_json::from_slice(json_bytes).map_err(Error::MalformedInput)?;

    let schema = document
        .get("info")
        .and_then(|info| info.get("schema"))
        .and_then(Value::as_str);

    if schema != Some(POSTMAN_SCHEMA_V2_1) {
        return Err(Error::SchemaMismatch {
            found: schema.map(str::to_string),
        });
    }

    let collection: Collection = serde_json::from_value(document).map_err(Error::TypeShape)?;

    log::debug!(
        "Parsed collection {:?} with {} top-level item(s)",
        collection.info.name,
        collection.item.len()
    );

    Ok(collection)
}
