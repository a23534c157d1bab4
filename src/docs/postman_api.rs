//! Remote Postman collection sync.
//!
//! The remote workspace collection is one shared resource, so each module is
//! synced as a single fetch, local merge, and push. Callers must keep module
//! syncs sequential; interleaving fetch/push cycles for two modules would
//! lose one of the updates.

use crate::config::PostmanEnv;
use serde_json::{json, Value};

const POSTMAN_API_BASE: &str = "https://api.getpostman.com/collections";

/// Variable types the Postman API accepts; anything else is rejected with a
/// validation error on PUT.
const ALLOWED_VARIABLE_TYPES: [&str; 5] = ["string", "secret", "boolean", "number", "any"];

fn collection_url(env: &PostmanEnv) -> String {
    format!("{}/{}", POSTMAN_API_BASE, env.collection_id)
}

fn client() -> Result<reqwest::blocking::Client, String> {
    reqwest::blocking::Client::builder()
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {}", e))
}

/// Fetch the full remote collection.
pub fn fetch_postman_collection(env: &PostmanEnv) -> Result<Value, String> {
    println!("  ℹ Fetching collection from Postman API: {}...", env.collection_id);

    let response = client()?
        .get(collection_url(env))
        .header("X-Api-Key", &env.api_key)
        .send()
        .map_err(|e| format!("Failed to reach Postman API: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().unwrap_or_default();
        return Err(format!("Failed to fetch collection ({}): {}", status, body));
    }

    let data: Value = response
        .json()
        .map_err(|e| format!("Failed to parse Postman API response: {}", e))?;
    Ok(data["collection"].clone())
}

/// Replace or append the `<Name> API` folder in the remote collection, then
/// push the whole collection back.
///
/// Manually added requests inside the module folder are preserved; so is
/// every other folder in the collection.
pub fn update_postman_collection_via_api(
    pascal_name: &str,
    new_collection: &Value,
    env: &PostmanEnv,
) -> Result<(), String> {
    let mut collection = fetch_postman_collection(env)?;

    sanitize_variables(&mut collection);

    let folder_name = format!("{} API", pascal_name);
    let new_items = new_collection["item"].as_array().cloned().unwrap_or_default();

    if !collection["item"].is_array() {
        collection["item"] = json!([]);
    }
    let items = collection["item"]
        .as_array_mut()
        .ok_or("collection item list is not an array")?;

    let existing_index = items
        .iter()
        .position(|item| item["name"].as_str() == Some(folder_name.as_str()));

    match existing_index {
        Some(index) => {
            println!("  ℹ Updating existing folder: {} in Postman collection", folder_name);
            let existing_items = items[index]["item"].as_array().cloned().unwrap_or_default();
            let merged = super::postman::merge_items(new_items, existing_items);
            items[index]["item"] = Value::Array(merged);
        }
        None => {
            println!("  ℹ Adding new folder: {} to Postman collection", folder_name);
            items.push(json!({ "name": folder_name, "item": new_items }));
        }
    }

    let response = client()?
        .put(collection_url(env))
        .header("X-Api-Key", &env.api_key)
        .json(&json!({ "collection": collection }))
        .send()
        .map_err(|e| format!("Failed to reach Postman API: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().unwrap_or_default();
        return Err(format!("Failed to update collection ({}): {}", status, body));
    }

    println!("  ✓ Postman collection updated via API");
    Ok(())
}

/// Coerce collection variables to the shape the API accepts on write:
/// unknown or missing types become `string`, entries without a key are
/// dropped, and an empty variable array is removed entirely.
pub fn sanitize_variables(collection: &mut Value) {
    let Some(variables) = collection["variable"].as_array() else {
        return;
    };

    let sanitized: Vec<Value> = variables
        .iter()
        .filter(|v| v["key"].as_str().is_some_and(|k| !k.is_empty()))
        .map(|v| {
            let mut v = v.clone();
            let valid = v["type"]
                .as_str()
                .map(|t| ALLOWED_VARIABLE_TYPES.contains(&t.to_lowercase().as_str()))
                .unwrap_or(false);
            if !valid {
                tracing::debug!(
                    key = v["key"].as_str().unwrap_or(""),
                    "coercing variable type to string"
                );
                v["type"] = json!("string");
            }
            v
        })
        .collect();

    if sanitized.is_empty() {
        collection
            .as_object_mut()
            .map(|obj| obj.remove("variable"));
    } else {
        collection["variable"] = Value::Array(sanitized);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_coerces_unknown_types() {
        let mut collection = json!({
            "variable": [
                { "key": "base_url", "type": "string", "value": "x" },
                { "key": "token", "type": "jwt", "value": "y" },
                { "key": "flag", "value": "z" }
            ]
        });
        sanitize_variables(&mut collection);
        let vars = collection["variable"].as_array().unwrap();
        assert_eq!(vars.len(), 3);
        assert_eq!(vars[0]["type"], "string");
        assert_eq!(vars[1]["type"], "string");
        assert_eq!(vars[2]["type"], "string");
    }

    #[test]
    fn test_sanitize_drops_keyless_and_empty_array() {
        let mut collection = json!({ "variable": [{ "type": "string" }] });
        sanitize_variables(&mut collection);
        assert!(collection.get("variable").is_none());
    }

    #[test]
    fn test_sanitize_keeps_allowed_types() {
        let mut collection = json!({
            "variable": [{ "key": "n", "type": "number", "value": "1" }]
        });
        sanitize_variables(&mut collection);
        assert_eq!(collection["variable"][0]["type"], "number");
    }

    #[test]
    fn test_absent_variables_is_a_no_op() {
        let mut collection = json!({ "info": {} });
        sanitize_variables(&mut collection);
        assert_eq!(collection, json!({ "info": {} }));
    }
}
