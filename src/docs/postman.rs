//! Postman collection generation and local persistence.
//!
//! Each module gets a v2.1 collection with the five CRUD requests. Sample
//! bodies reference `{{variable}}` placeholders that a pre-request script
//! fills with randomized values, so the requests are runnable as-is against
//! a `{{base_url}}` environment.

use crate::codegen::fs_utils;
use crate::codegen::types::{FieldDefinition, TypeTag};
use serde_json::{json, Map, Value};
use std::path::Path;

pub const COLLECTION_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Build the full collection for one module.
pub fn generate_postman_collection(
    pascal_name: &str,
    folder_name: &str,
    fields: &[FieldDefinition],
) -> Value {
    let sample = sample_data(fields, "");
    let update_sample = update_sample_data(fields);
    let prerequest = prerequest_script(fields, "");

    let list_url = json!({
        "raw": format!("{{{{base_url}}}}/api/v1/{}", folder_name),
        "host": ["{{base_url}}"],
        "path": ["api", "v1", folder_name]
    });
    let id_url = json!({
        "raw": format!("{{{{base_url}}}}/api/v1/{}/{{{{{}_id}}}}", folder_name, folder_name),
        "host": ["{{base_url}}"],
        "path": ["api", "v1", folder_name, format!("{{{{{}_id}}}}", folder_name)]
    });

    let items = json!([
        {
            "name": format!("Create {}", pascal_name),
            "request": {
                "method": "POST",
                "header": [{ "key": "Content-Type", "value": "application/json" }],
                "body": {
                    "mode": "raw",
                    "raw": serde_json::to_string_pretty(&sample).unwrap_or_default(),
                    "options": { "raw": { "language": "json" } }
                },
                "url": list_url.clone()
            },
            "event": [{
                "listen": "prerequest",
                "script": { "exec": prerequest, "type": "text/javascript" }
            }]
        },
        {
            "name": format!("Get All {}s", pascal_name),
            "request": { "method": "GET", "header": [], "url": list_url }
        },
        {
            "name": format!("Get {} by ID", pascal_name),
            "request": { "method": "GET", "header": [], "url": id_url.clone() }
        },
        {
            "name": format!("Update {}", pascal_name),
            "request": {
                "method": "PATCH",
                "header": [{ "key": "Content-Type", "value": "application/json" }],
                "body": {
                    "mode": "raw",
                    "raw": serde_json::to_string_pretty(&update_sample).unwrap_or_default(),
                    "options": { "raw": { "language": "json" } }
                },
                "url": id_url.clone()
            },
            "event": [{
                "listen": "prerequest",
                "script": { "exec": prerequest_script(fields, ""), "type": "text/javascript" }
            }]
        },
        {
            "name": format!("Delete {}", pascal_name),
            "request": { "method": "DELETE", "header": [], "url": id_url }
        }
    ]);

    json!({
        "info": {
            "name": format!("{} API", pascal_name),
            "schema": COLLECTION_SCHEMA
        },
        "item": items
    })
}

/// Pre-request script lines that populate the `{{var}}` placeholders used by
/// the sample bodies. Nested fields get a `parent_child` variable name.
fn prerequest_script(fields: &[FieldDefinition], prefix: &str) -> Vec<String> {
    let mut lines = Vec::new();

    for field in fields {
        if field.name.eq_ignore_ascii_case("_id") {
            continue;
        }
        let var_name = if prefix.is_empty() {
            field.name.clone()
        } else {
            format!("{}_{}", prefix, field.name)
        };

        match &field.field_type {
            TypeTag::String => lines.push(format!(
                "pm.variables.set(\"{}\", \"{}_\" + Date.now());",
                var_name, field.name
            )),
            TypeTag::Number => lines.push(format!(
                "pm.variables.set(\"{}\", Math.floor(Math.random() * 100));",
                var_name
            )),
            TypeTag::Boolean => lines.push(format!(
                "pm.variables.set(\"{}\", Math.random() < 0.5);",
                var_name
            )),
            TypeTag::Date => lines.push(format!(
                "pm.variables.set(\"{}\", new Date().toISOString());",
                var_name
            )),
            TypeTag::Enum => {
                if field.enum_values.is_empty() {
                    lines.push(format!(
                        "pm.variables.set(\"{}\", \"ENUM_VALUE\");",
                        var_name
                    ));
                } else {
                    let values =
                        serde_json::to_string(&field.enum_values).unwrap_or_else(|_| "[]".into());
                    lines.push(format!("const {}_values = {};", var_name, values));
                    lines.push(format!(
                        "pm.variables.set(\"{}\", {}_values[Math.floor(Math.random() * {}_values.length)]);",
                        var_name, var_name, var_name
                    ));
                }
            }
            TypeTag::Object => {
                if !field.object_properties.is_empty() {
                    lines.extend(prerequest_script(&field.object_properties, &var_name));
                }
            }
            TypeTag::Array => {
                if field.is_object_array() {
                    lines.extend(prerequest_script(&field.object_properties, &var_name));
                }
            }
            _ => {}
        }
    }

    lines
}

/// Sample create body: scalar fields become `{{var}}` placeholders, nested
/// structures recurse with a prefixed variable namespace.
fn sample_data(fields: &[FieldDefinition], prefix: &str) -> Value {
    let mut sample = Map::new();

    for field in fields {
        if field.name.eq_ignore_ascii_case("_id") {
            continue;
        }
        let var_name = if prefix.is_empty() {
            field.name.clone()
        } else {
            format!("{}_{}", prefix, field.name)
        };

        let value = match &field.field_type {
            TypeTag::Array => {
                if field.is_object_array() {
                    json!([sample_data(&field.object_properties, &var_name)])
                } else {
                    json!([])
                }
            }
            TypeTag::Object => {
                if field.object_properties.is_empty() {
                    json!({})
                } else {
                    sample_data(&field.object_properties, &var_name)
                }
            }
            _ => json!(format!("{{{{{}}}}}", var_name)),
        };
        sample.insert(field.name.clone(), value);
    }

    Value::Object(sample)
}

/// Update body sample: the first few fields of the create sample.
fn update_sample_data(fields: &[FieldDefinition]) -> Value {
    match sample_data(fields, "") {
        Value::Object(full) => {
            Value::Object(full.into_iter().take(3).collect())
        }
        other => other,
    }
}

/// Persist the collection under `<postman_dir>/<folder>.postman_collection.json`.
///
/// When the file already exists, manually added requests (names not in the
/// generated set) are carried over after the regenerated ones.
pub fn save_postman_collection(
    folder_name: &str,
    collection: &Value,
    postman_dir: &Path,
) -> Result<(), String> {
    let file_path = postman_dir.join(format!("{}.postman_collection.json", folder_name));

    let mut final_collection = collection.clone();

    if file_path.exists() {
        let existing = fs_utils::read_file(&file_path)?;
        match serde_json::from_str::<Value>(&existing) {
            Ok(existing_collection) => {
                if let Some(existing_items) = existing_collection["item"].as_array() {
                    println!("  ℹ Merging with existing local collection: {}", file_path.display());
                    let merged = merge_items(
                        collection["item"].as_array().cloned().unwrap_or_default(),
                        existing_items.clone(),
                    );
                    final_collection["item"] = Value::Array(merged);
                }
            }
            Err(_) => {
                println!(
                    "  ⚠ Could not parse existing Postman collection at {}, overwriting",
                    file_path.display()
                );
            }
        }
    }

    let serialized = serde_json::to_string_pretty(&final_collection)
        .map_err(|e| format!("Failed to serialize Postman collection: {}", e))?;
    fs_utils::write_file(&file_path, serialized)
        .map_err(|e| format!("Failed to write {}: {}", file_path.display(), e))?;

    println!("  ✓ Postman collection saved: {}", file_path.display());
    Ok(())
}

/// New generated items first, then existing items whose names the generated
/// set does not cover.
pub fn merge_items(new_items: Vec<Value>, existing_items: Vec<Value>) -> Vec<Value> {
    let generated_names: Vec<&str> = new_items
        .iter()
        .filter_map(|i| i["name"].as_str())
        .collect();

    let manual: Vec<Value> = existing_items
        .into_iter()
        .filter(|item| {
            item["name"]
                .as_str()
                .map(|name| !generated_names.contains(&name))
                .unwrap_or(true)
        })
        .collect();

    if !manual.is_empty() {
        let names: Vec<&str> = manual.iter().filter_map(|m| m["name"].as_str()).collect();
        println!("    ✓ Preserving {} manual endpoints: {}", manual.len(), names.join(", "));
    }

    let mut merged = new_items;
    merged.extend(manual);
    merged
}

/// Write a fetched remote collection verbatim, wrapped in the same
/// `{ "collection": ... }` envelope the API returns.
pub fn save_full_postman_collection(collection: &Value, output_path: &Path) -> Result<(), String> {
    let payload = json!({ "collection": collection });
    let serialized = serde_json::to_string_pretty(&payload)
        .map_err(|e| format!("Failed to serialize collection: {}", e))?;
    fs_utils::write_file(output_path, serialized)
        .map_err(|e| format!("Failed to write {}: {}", output_path.display(), e))?;
    println!("  ✓ Full Postman collection exported to: {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::types::TypeTag;

    fn sample_fields() -> Vec<FieldDefinition> {
        let mut status = FieldDefinition::new("status", TypeTag::Enum);
        status.enum_values = vec!["active".to_string(), "inactive".to_string()];
        vec![
            FieldDefinition::new("name", TypeTag::String),
            FieldDefinition::new("age", TypeTag::Number),
            status,
        ]
    }

    #[test]
    fn test_collection_has_five_requests() {
        let collection = generate_postman_collection("User", "user", &sample_fields());
        assert_eq!(collection["info"]["name"], "User API");
        assert_eq!(collection["info"]["schema"], COLLECTION_SCHEMA);
        let items = collection["item"].as_array().unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(items[0]["name"], "Create User");
        assert_eq!(items[4]["name"], "Delete User");
    }

    #[test]
    fn test_id_urls_use_collection_variable() {
        let collection = generate_postman_collection("User", "user", &[]);
        let get_by_id = &collection["item"][2];
        assert_eq!(
            get_by_id["request"]["url"]["raw"],
            "{{base_url}}/api/v1/user/{{user_id}}"
        );
    }

    #[test]
    fn test_sample_body_uses_placeholders() {
        let collection = generate_postman_collection("User", "user", &sample_fields());
        let raw = collection["item"][0]["request"]["body"]["raw"].as_str().unwrap();
        let body: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(body["name"], "{{name}}");
        assert_eq!(body["status"], "{{status}}");
    }

    #[test]
    fn test_prerequest_script_covers_enum() {
        let lines = prerequest_script(&sample_fields(), "");
        assert!(lines.iter().any(|l| l.contains("status_values")));
        assert!(lines.iter().any(|l| l.contains("\"name\", \"name_\" + Date.now()")));
    }

    #[test]
    fn test_nested_array_variables_are_prefixed() {
        let mut items = FieldDefinition::new("items", TypeTag::Array);
        items.reference = Some("object".to_string());
        items.object_properties = vec![FieldDefinition::new("sku", TypeTag::String)];
        let lines = prerequest_script(&[items.clone()], "");
        assert!(lines.iter().any(|l| l.contains("items_sku")));

        let sample = sample_data(&[items], "");
        assert_eq!(sample["items"][0]["sku"], "{{items_sku}}");
    }

    #[test]
    fn test_update_sample_limited_to_three_fields() {
        let mut fields = sample_fields();
        fields.push(FieldDefinition::new("extra", TypeTag::String));
        let update = update_sample_data(&fields);
        assert_eq!(update.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_merge_preserves_manual_items() {
        let generated = vec![json!({"name": "Create User"}), json!({"name": "Delete User"})];
        let existing = vec![json!({"name": "Create User"}), json!({"name": "Login"})];
        let merged = merge_items(generated, existing);
        let names: Vec<&str> = merged.iter().map(|m| m["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Create User", "Delete User", "Login"]);
    }
}
