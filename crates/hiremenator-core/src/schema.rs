// ABOUTME: Output schemas (named records of string fields) and the optional validator for agent answers.
// ABOUTME: Locates a JSON object in free model text and checks every declared field is a string.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Value the agents are told to use when data could not be retrieved.
pub const NOT_AVAILABLE: &str = "Not Available";

/// A single string field of an output schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    pub description: String,
}

/// A named record type describing the desired answer shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSchema {
    pub name: String,
    pub fields: Vec<SchemaField>,
}

impl OutputSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a string field.
    pub fn field(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.fields.push(SchemaField {
            name: name.into(),
            description: description.into(),
        });
        self
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Render the schema as a short instruction block for the model.
    pub fn prompt_hint(&self) -> String {
        let mut out = format!(
            "Answer with a single JSON object ({}) containing these string fields:\n",
            self.name
        );
        for field in &self.fields {
            out.push_str(&format!("- {}: {}\n", field.name, field.description));
        }
        out.push_str(&format!(
            "Use \"{NOT_AVAILABLE}\" for any field you cannot fill from real data."
        ));
        out
    }
}

/// Field values extracted from a validated answer, keyed by field name.
pub type ParsedOutput = BTreeMap<String, String>;

/// Reasons an answer does not fit its declared schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("answer for schema {schema} contains no JSON object")]
    NotJson { schema: String },

    #[error("answer does not match schema {schema}: missing {missing:?}, not strings {not_strings:?}")]
    Mismatch {
        schema: String,
        missing: Vec<String>,
        not_strings: Vec<String>,
    },
}

/// Parse `raw_text` into the fields declared by `schema`.
///
/// Extra fields are ignored. Every declared field must be present and hold a
/// string; "Not Available" counts as a valid value.
pub fn validate(raw_text: &str, schema: &OutputSchema) -> Result<ParsedOutput, SchemaError> {
    let object = extract_json_object(raw_text).ok_or_else(|| SchemaError::NotJson {
        schema: schema.name.clone(),
    })?;

    let mut parsed = ParsedOutput::new();
    let mut missing = Vec::new();
    let mut not_strings = Vec::new();

    for name in schema.field_names() {
        match object.get(name) {
            Some(Value::String(s)) => {
                parsed.insert(name.to_string(), s.clone());
            }
            Some(_) => not_strings.push(name.to_string()),
            None => missing.push(name.to_string()),
        }
    }

    if missing.is_empty() && not_strings.is_empty() {
        Ok(parsed)
    } else {
        Err(SchemaError::Mismatch {
            schema: schema.name.clone(),
            missing,
            not_strings,
        })
    }
}

/// Find a JSON object in model output using a 3-tier strategy:
/// 1. Parse the whole text
/// 2. Strip markdown code fences and parse again
/// 3. Parse the substring from the first `{` to the last `}`
pub fn extract_json_object(text: &str) -> Option<serde_json::Map<String, Value>> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text.trim()) {
        return Some(map);
    }

    let stripped = strip_code_fences(text);
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&stripped) {
        return Some(map);
    }

    let first_brace = text.find('{');
    let last_brace = text.rfind('}');
    if let (Some(start), Some(end)) = (first_brace, last_brace)
        && start < end
        && let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&text[start..=end])
    {
        return Some(map);
    }

    None
}

fn strip_code_fences(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut in_fence = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence || !trimmed.is_empty() {
            lines.push(line);
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume_schema() -> OutputSchema {
        OutputSchema::new("resumeschema")
            .field("response_to_user", "message shown to the user")
            .field("generated_resume_markdown", "the tailored resume")
    }

    #[test]
    fn validate_accepts_plain_json() {
        let raw = r##"{"response_to_user": "Here it is", "generated_resume_markdown": "# Jane"}"##;
        let parsed = validate(raw, &resume_schema()).unwrap();
        assert_eq!(parsed["response_to_user"], "Here it is");
        assert_eq!(parsed["generated_resume_markdown"], "# Jane");
    }

    #[test]
    fn validate_accepts_fenced_json() {
        let raw = "Sure!\n```json\n{\"response_to_user\": \"ok\", \"generated_resume_markdown\": \"Not Available\"}\n```\n";
        let parsed = validate(raw, &resume_schema()).unwrap();
        assert_eq!(parsed["generated_resume_markdown"], NOT_AVAILABLE);
    }

    #[test]
    fn validate_accepts_json_embedded_in_prose() {
        let raw = "Result: {\"response_to_user\": \"a\", \"generated_resume_markdown\": \"b\", \"extra\": 3} done";
        let parsed = validate(raw, &resume_schema()).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(!parsed.contains_key("extra"));
    }

    #[test]
    fn validate_reports_missing_and_non_string_fields() {
        let raw = r#"{"response_to_user": 42}"#;
        match validate(raw, &resume_schema()) {
            Err(SchemaError::Mismatch {
                schema,
                missing,
                not_strings,
            }) => {
                assert_eq!(schema, "resumeschema");
                assert_eq!(missing, vec!["generated_resume_markdown".to_string()]);
                assert_eq!(not_strings, vec!["response_to_user".to_string()]);
            }
            other => panic!("expected Mismatch, got {:?}", other),
        }
    }

    #[test]
    fn validate_rejects_free_text() {
        let err = validate("I could not find anything.", &resume_schema()).unwrap_err();
        assert_eq!(
            err,
            SchemaError::NotJson {
                schema: "resumeschema".to_string()
            }
        );
    }

    #[test]
    fn prompt_hint_lists_fields() {
        let hint = resume_schema().prompt_hint();
        assert!(hint.contains("response_to_user"));
        assert!(hint.contains("generated_resume_markdown"));
        assert!(hint.contains(NOT_AVAILABLE));
    }
}
