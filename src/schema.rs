//! Output schema for the extraction call.
//!
//! The schema is derived from [`ProductRecord`] with `schemars`, so the shape
//! sent to the model and the shape serde accepts back cannot drift apart.
//! Providers differ only in dialect, handled by a single post-pass.

use schemars::gen::SchemaSettings;
use serde_json::{json, Value};

use crate::model::ProductRecord;

/// Schema flavour expected by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Standard JSON Schema, strict (OpenAI structured outputs, Ollama `format`)
    JsonSchema,
    /// Gemini `responseSchema` (OpenAPI subset, uppercase type names)
    Gemini,
}

/// Render the product schema for the given dialect.
pub fn product_schema(dialect: Dialect) -> Value {
    let settings = SchemaSettings::draft07().with(|s| {
        s.inline_subschemas = true;
        s.meta_schema = None;
    });
    let root = settings
        .into_generator()
        .into_root_schema_for::<ProductRecord>();

    let mut schema = json!(root);
    adapt(&mut schema, dialect);
    schema
}

fn adapt(schema: &mut Value, dialect: Dialect) {
    let Some(object) = schema.as_object_mut() else {
        return;
    };
    // Neither provider accepts these keywords
    object.remove("title");
    object.remove("format");

    if let Some(properties) = object.get_mut("properties").and_then(Value::as_object_mut) {
        for property in properties.values_mut() {
            adapt(property, dialect);
        }
    }
    if let Some(items) = object.get_mut("items") {
        adapt(items, dialect);
    }

    match dialect {
        Dialect::JsonSchema => {
            if object.get("type").and_then(Value::as_str) == Some("object") {
                object.insert("additionalProperties".to_string(), Value::Bool(false));
            }
        }
        Dialect::Gemini => {
            object.remove("additionalProperties");
            if let Some(Value::String(kind)) = object.get_mut("type") {
                *kind = kind.to_uppercase();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: [&str; 7] = [
        "name",
        "price",
        "description",
        "images",
        "rating",
        "sold",
        "reviews",
    ];

    fn required(schema: &Value) -> Vec<&str> {
        let mut names: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        names.sort_unstable();
        names
    }

    #[test]
    fn test_json_schema_marks_every_field_required() {
        let schema = product_schema(Dialect::JsonSchema);
        let mut expected = FIELDS.to_vec();
        expected.sort_unstable();
        assert_eq!(required(&schema), expected);

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["additionalProperties"], json!(false));
        assert_eq!(schema["properties"]["images"]["type"], "array");
        assert_eq!(schema["properties"]["images"]["items"]["type"], "string");

        let review = &schema["properties"]["reviews"]["items"];
        assert_eq!(review["type"], "object");
        assert_eq!(review["additionalProperties"], json!(false));
        assert_eq!(required(review), vec!["comment", "rating", "user"]);
        assert_eq!(review["properties"]["rating"]["type"], "number");
    }

    #[test]
    fn test_schema_is_self_contained() {
        let schema = product_schema(Dialect::JsonSchema);
        let text = schema.to_string();
        assert!(!text.contains("$ref"));
        assert!(!text.contains("\"format\""));
        assert!(schema.get("$schema").is_none());
        assert!(schema.get("title").is_none());
    }

    #[test]
    fn test_field_docs_become_descriptions() {
        let schema = product_schema(Dialect::JsonSchema);
        let price = schema["properties"]["price"]["description"]
            .as_str()
            .unwrap();
        assert!(price.contains("currency"));
    }

    #[test]
    fn test_gemini_schema_uses_uppercase_types() {
        let schema = product_schema(Dialect::Gemini);
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["properties"]["rating"]["type"], "NUMBER");
        assert_eq!(schema["properties"]["images"]["items"]["type"], "STRING");
        assert_eq!(schema["properties"]["reviews"]["items"]["type"], "OBJECT");
        assert!(schema.get("additionalProperties").is_none());
        assert!(schema["properties"]["reviews"]["items"]
            .get("additionalProperties")
            .is_none());
    }
}
