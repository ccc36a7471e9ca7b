//! Tag lists are stored as a JSON-encoded string column.

/// Encode a tag list for storage.
pub fn encode_tags(tags: &[String]) -> String {
    serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a stored tag list.
///
/// Missing, empty or malformed values decode to an empty list rather than
/// failing the whole row.
pub fn decode_tags(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(tags) => tags,
        Err(e) => {
            tracing::warn!(error = %e, raw, "discarding malformed tag list");
            Vec::new()
        }
    }
}
