//! Input document loading and shape extraction.

use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;
use crate::models::Record;

/// Keys probed, in priority order, when the document is an object.
const RECORD_KEYS: [&str; 4] = ["items", "data", "questions", "records"];

/// Load records from a JSON file.
///
/// Accepts a top-level array of objects, or an object holding such an
/// array under one of `items`/`data`/`questions`/`records`. An accepted
/// shape with zero records is rejected with [`LoadError::NoRecords`].
pub fn load_records(path: &Path) -> Result<Vec<Record>, LoadError> {
    let input = std::fs::read_to_string(path)?;
    let records = parse_records(&input)?;
    if records.is_empty() {
        return Err(LoadError::NoRecords);
    }
    Ok(records)
}

/// Parse a JSON document and extract its record list.
pub fn parse_records(input: &str) -> Result<Vec<Record>, LoadError> {
    let value: Value = serde_json::from_str(input)?;
    extract_records(value)
}

fn extract_records(value: Value) -> Result<Vec<Record>, LoadError> {
    match value {
        Value::Array(elements) => records_from_array(elements)
            .ok_or_else(|| LoadError::InvalidShape("JSON array must contain objects".to_string())),
        Value::Object(map) => {
            for key in RECORD_KEYS {
                if let Some(Value::Array(elements)) = map.get(key)
                    && let Some(records) = records_from_array(elements.clone())
                {
                    return Ok(records);
                }
            }
            Err(unexpected_shape())
        }
        _ => Err(unexpected_shape()),
    }
}

/// Convert an array into records; `None` if any element is not an object.
fn records_from_array(elements: Vec<Value>) -> Option<Vec<Record>> {
    elements
        .into_iter()
        .map(|element| match element {
            Value::Object(fields) => Some(Record::new(fields)),
            _ => None,
        })
        .collect()
}

fn unexpected_shape() -> LoadError {
    LoadError::InvalidShape(
        "expected an array of objects, or an object with an items/data/questions/records array"
            .to_string(),
    )
}
