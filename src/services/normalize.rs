//! Record normalization: embedding text, metadata sanitization, stable ids.
//!
//! Everything here is pure and total. Two records with identical values
//! for the recognized fields produce byte-identical embedding text, which
//! is what makes hash-derived vector ids stable across reruns.

use serde_json::{Map, Value};
use sha1::{Digest, Sha1};

use crate::models::{DEFAULT_CLASS_LEVEL, DEFAULT_SUBJECT, Record};

/// Input fields that hold vector data rather than metadata.
const VECTOR_FIELDS: [&str; 2] = ["values", "embedding"];

/// Question-like fields, in coalescing priority.
const QUESTION_FIELDS: [&str; 3] = ["text", "question", "prompt"];

/// Coerce a JSON value to its string form. Null and absent values become
/// the empty string; non-strings use their JSON rendering.
fn as_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Build the single text blob a record is embedded under.
///
/// The question-like field is coalesced from `text`, `question`, `prompt`
/// (first non-empty wins). Labels are emitted in fixed order and empty
/// values are omitted entirely, so the result is byte-identical for
/// identical inputs. Returns an empty string when no recognized field has
/// a value; callers drop such records.
pub fn embedding_text(record: &Record) -> String {
    let question = QUESTION_FIELDS
        .iter()
        .map(|key| as_text(record.get(key)))
        .find(|text| !text.is_empty())
        .unwrap_or_default();

    let topics = match record.get("topics") {
        Some(Value::Array(elements)) => elements
            .iter()
            .map(|element| as_text(Some(element)).trim().to_string())
            .filter(|topic| !topic.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    };

    let parts = [
        ("Chapter", as_text(record.get("chapter"))),
        ("Topic", as_text(record.get("topic"))),
        ("Topics", topics),
        ("Year", as_text(record.get("year"))),
        ("Marks", as_text(record.get("marks"))),
        ("Question", question),
        ("Answer", as_text(record.get("answer"))),
    ];

    parts
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn is_primitive(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

/// Classify one field value into a store-safe shape.
///
/// Primitives pass through; arrays of primitives keep the array with
/// nulls removed; nested objects and mixed arrays are JSON-encoded to a
/// string; nulls drop the field.
fn sanitize_value(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        primitive if is_primitive(primitive) => Some(primitive.clone()),
        Value::Array(elements) => {
            if elements
                .iter()
                .all(|element| is_primitive(element) || element.is_null())
            {
                Some(Value::Array(
                    elements
                        .iter()
                        .filter(|element| !element.is_null())
                        .cloned()
                        .collect(),
                ))
            } else {
                Some(Value::String(value.to_string()))
            }
        }
        Value::Object(_) => Some(Value::String(value.to_string())),
        other => Some(Value::String(as_text(Some(other)))),
    }
}

/// Flatten a record's fields into metadata acceptable to the store.
///
/// The reserved `values` and `embedding` fields never pass through; they
/// denote vector data, not metadata.
pub fn sanitize_metadata(record: &Record) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, value) in record.fields() {
        if VECTOR_FIELDS.contains(&key.as_str()) {
            continue;
        }
        if let Some(sanitized) = sanitize_value(value) {
            out.insert(key.clone(), sanitized);
        }
    }
    out
}

/// Inject the metadata defaults without overriding record-supplied keys.
pub fn apply_metadata_defaults(metadata: &mut Map<String, Value>, text: &str) {
    metadata
        .entry("text")
        .or_insert_with(|| Value::String(text.to_string()));
    metadata
        .entry("subject")
        .or_insert_with(|| Value::String(DEFAULT_SUBJECT.to_string()));
    metadata
        .entry("classLevel")
        .or_insert_with(|| Value::from(DEFAULT_CLASS_LEVEL));
}

/// SHA-1 hex digest of the embedding text, used when a record carries no
/// `id`. Stable, not secret: it only needs to be a deterministic key.
pub fn stable_id(text: &str) -> String {
    hex::encode(Sha1::digest(text.as_bytes()))
}

/// The record's own `id` (stringified) when non-empty, otherwise a
/// content hash of the embedding text.
pub fn vector_id(record: &Record, text: &str) -> String {
    let explicit = as_text(record.get("id"));
    if explicit.is_empty() {
        stable_id(text)
    } else {
        explicit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_text_full_record() {
        let record = make_record(json!({
            "question": "What is photosynthesis?",
            "answer": "...",
            "chapter": "Life Processes"
        }));
        assert_eq!(
            embedding_text(&record),
            "Chapter: Life Processes\nQuestion: What is photosynthesis?\nAnswer: ..."
        );
    }

    #[test]
    fn test_text_label_omission() {
        let record = make_record(json!({"question": "Define osmosis."}));
        assert_eq!(embedding_text(&record), "Question: Define osmosis.");
    }

    #[test]
    fn test_text_question_precedence() {
        let record = make_record(json!({
            "prompt": "from prompt",
            "text": "from text",
            "question": "from question"
        }));
        assert_eq!(embedding_text(&record), "Question: from text");

        let record2 = make_record(json!({"prompt": "from prompt", "question": "from question"}));
        assert_eq!(embedding_text(&record2), "Question: from question");

        let record3 = make_record(json!({"text": "", "prompt": "from prompt"}));
        assert_eq!(embedding_text(&record3), "Question: from prompt");
    }

    #[test]
    fn test_text_numeric_fields_stringified() {
        let record = make_record(json!({"question": "q", "year": 2023, "marks": 5}));
        assert_eq!(embedding_text(&record), "Year: 2023\nMarks: 5\nQuestion: q");
    }

    #[test]
    fn test_text_topics_joined() {
        let record = make_record(json!({"question": "q", "topics": [" Light ", "", "Sound", null, 7]}));
        assert_eq!(
            embedding_text(&record),
            "Topics: Light, Sound, 7\nQuestion: q"
        );
    }

    #[test]
    fn test_text_topics_non_array_ignored() {
        let record = make_record(json!({"question": "q", "topics": "Light"}));
        assert_eq!(embedding_text(&record), "Question: q");
    }

    #[test]
    fn test_text_empty_record() {
        let record = make_record(json!({"unrelated": "field"}));
        assert_eq!(embedding_text(&record), "");
    }

    #[test]
    fn test_text_deterministic() {
        let record = make_record(json!({"question": "q", "chapter": "c", "topics": ["a", "b"]}));
        assert_eq!(embedding_text(&record), embedding_text(&record));
    }

    #[test]
    fn test_metadata_primitives_kept() {
        let record = make_record(json!({"chapter": "Light", "marks": 3, "verified": true}));
        let metadata = sanitize_metadata(&record);
        assert_eq!(metadata.get("chapter"), Some(&json!("Light")));
        assert_eq!(metadata.get("marks"), Some(&json!(3)));
        assert_eq!(metadata.get("verified"), Some(&json!(true)));
    }

    #[test]
    fn test_metadata_null_dropped() {
        let record = make_record(json!({"chapter": null, "question": "q"}));
        let metadata = sanitize_metadata(&record);
        assert!(!metadata.contains_key("chapter"));
        assert!(metadata.contains_key("question"));
    }

    #[test]
    fn test_metadata_primitive_list_drops_nulls() {
        let record = make_record(json!({"topics": ["a", null, "b"]}));
        let metadata = sanitize_metadata(&record);
        assert_eq!(metadata.get("topics"), Some(&json!(["a", "b"])));
    }

    #[test]
    fn test_metadata_mixed_list_encoded() {
        let record = make_record(json!({"refs": ["a", {"page": 3}]}));
        let metadata = sanitize_metadata(&record);
        let encoded = metadata.get("refs").unwrap().as_str().unwrap();
        let decoded: Value = serde_json::from_str(encoded).unwrap();
        assert_eq!(decoded, json!(["a", {"page": 3}]));
    }

    #[test]
    fn test_metadata_nested_object_round_trips() {
        let record = make_record(json!({"source": {"book": "NCERT", "page": 112}}));
        let metadata = sanitize_metadata(&record);
        let encoded = metadata.get("source").unwrap().as_str().unwrap();
        let decoded: Value = serde_json::from_str(encoded).unwrap();
        assert_eq!(decoded, json!({"book": "NCERT", "page": 112}));
    }

    #[test]
    fn test_metadata_vector_fields_excluded() {
        let record = make_record(json!({
            "question": "q",
            "values": [0.1, 0.2],
            "embedding": [0.3]
        }));
        let metadata = sanitize_metadata(&record);
        assert!(!metadata.contains_key("values"));
        assert!(!metadata.contains_key("embedding"));
        assert!(metadata.contains_key("question"));
    }

    #[test]
    fn test_metadata_defaults_injected() {
        let mut metadata = Map::new();
        apply_metadata_defaults(&mut metadata, "Question: q");
        assert_eq!(metadata.get("text"), Some(&json!("Question: q")));
        assert_eq!(metadata.get("subject"), Some(&json!("Science")));
        assert_eq!(metadata.get("classLevel"), Some(&json!(10)));
    }

    #[test]
    fn test_metadata_defaults_do_not_override() {
        let mut metadata = Map::new();
        metadata.insert("text".to_string(), json!("original"));
        metadata.insert("subject".to_string(), json!("Maths"));
        apply_metadata_defaults(&mut metadata, "Question: q");
        assert_eq!(metadata.get("text"), Some(&json!("original")));
        assert_eq!(metadata.get("subject"), Some(&json!("Maths")));
        assert_eq!(metadata.get("classLevel"), Some(&json!(10)));
    }

    #[test]
    fn test_stable_id_known_digest() {
        // SHA-1("abc")
        assert_eq!(stable_id("abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(stable_id("abc").len(), 40);
    }

    #[test]
    fn test_vector_id_prefers_explicit() {
        let record = make_record(json!({"id": "q-001", "question": "q"}));
        assert_eq!(vector_id(&record, "Question: q"), "q-001");

        let record2 = make_record(json!({"id": 17, "question": "q"}));
        assert_eq!(vector_id(&record2, "Question: q"), "17");
    }

    #[test]
    fn test_vector_id_falls_back_to_hash() {
        let record = make_record(json!({"question": "q"}));
        let text = embedding_text(&record);
        assert_eq!(vector_id(&record, &text), stable_id(&text));

        let record2 = make_record(json!({"id": null, "question": "q"}));
        assert_eq!(vector_id(&record2, &text), stable_id(&text));
    }

    #[test]
    fn test_worked_example_id() {
        let record = make_record(json!({
            "question": "What is photosynthesis?",
            "answer": "...",
            "chapter": "Life Processes"
        }));
        let text = embedding_text(&record);
        let id = vector_id(&record, &text);
        assert_eq!(id, stable_id(text.as_str()));
        assert_eq!(id.len(), 40);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
