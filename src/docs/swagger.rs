//! OpenAPI (swagger.json) generation and merge.
//!
//! Path items and component schemas are generated per module and merged by
//! key into the project's single swagger.json; entries for other modules are
//! left untouched and insertion order is preserved.

use crate::codegen::fs_utils;
use crate::codegen::mappings::item_interface_name;
use crate::codegen::types::{FieldDefinition, TypeTag};
use indexmap::IndexMap;
use serde_json::{json, Value};
use std::path::Path;

/// Path items for a module: `/<folder>` and `/<folder>/{id}`.
pub fn generate_swagger_paths(
    pascal_name: &str,
    folder_name: &str,
) -> IndexMap<String, Value> {
    let data_ref = json!({ "$ref": format!("#/components/schemas/{}", pascal_name) });
    let envelope = |data: Value| {
        json!({
            "type": "object",
            "properties": {
                "success": { "type": "boolean" },
                "message": { "type": "string" },
                "data": data
            }
        })
    };
    let id_param = json!([{
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string" },
        "description": format!("{} ID", pascal_name)
    }]);

    let mut paths = IndexMap::new();
    paths.insert(
        format!("/{}", folder_name),
        json!({
            "post": {
                "tags": [pascal_name],
                "summary": format!("Create a new {}", pascal_name),
                "requestBody": {
                    "required": true,
                    "content": {
                        "application/json": {
                            "schema": { "$ref": format!("#/components/schemas/{}Create", pascal_name) }
                        }
                    }
                },
                "responses": {
                    "201": {
                        "description": format!("{} created successfully", pascal_name),
                        "content": { "application/json": { "schema": envelope(data_ref.clone()) } }
                    },
                    "400": { "description": "Bad request" }
                }
            },
            "get": {
                "tags": [pascal_name],
                "summary": format!("Get all {}s", pascal_name),
                "responses": {
                    "200": {
                        "description": format!("List of {}s retrieved successfully", pascal_name),
                        "content": {
                            "application/json": {
                                "schema": envelope(json!({ "type": "array", "items": data_ref.clone() }))
                            }
                        }
                    }
                }
            }
        }),
    );
    paths.insert(
        format!("/{}/{{id}}", folder_name),
        json!({
            "get": {
                "tags": [pascal_name],
                "summary": format!("Get {} by ID", pascal_name),
                "parameters": id_param.clone(),
                "responses": {
                    "200": {
                        "description": format!("{} retrieved successfully", pascal_name),
                        "content": { "application/json": { "schema": envelope(data_ref.clone()) } }
                    },
                    "404": { "description": format!("{} not found", pascal_name) }
                }
            },
            "patch": {
                "tags": [pascal_name],
                "summary": format!("Update {}", pascal_name),
                "parameters": id_param.clone(),
                "requestBody": {
                    "required": true,
                    "content": {
                        "application/json": {
                            "schema": { "$ref": format!("#/components/schemas/{}Update", pascal_name) }
                        }
                    }
                },
                "responses": {
                    "200": {
                        "description": format!("{} updated successfully", pascal_name),
                        "content": { "application/json": { "schema": envelope(data_ref.clone()) } }
                    },
                    "404": { "description": format!("{} not found", pascal_name) }
                }
            },
            "delete": {
                "tags": [pascal_name],
                "summary": format!("Delete {}", pascal_name),
                "parameters": id_param,
                "responses": {
                    "200": {
                        "description": format!("{} deleted successfully", pascal_name),
                        "content": { "application/json": { "schema": envelope(data_ref) } }
                    },
                    "404": { "description": format!("{} not found", pascal_name) }
                }
            }
        }),
    );
    paths
}

/// Component schemas for a module: nested item schemas, the entity schema,
/// and the Create/Update request bodies.
pub fn generate_swagger_schemas(
    pascal_name: &str,
    fields: &[FieldDefinition],
) -> IndexMap<String, Value> {
    let mut schemas = IndexMap::new();

    for field in fields.iter().filter(|f| f.is_object_array()) {
        schemas.insert(
            item_interface_name(&field.name),
            entity_schema(&field.object_properties),
        );
    }

    schemas.insert(pascal_name.to_string(), entity_schema(fields));
    schemas.insert(format!("{}Create", pascal_name), create_schema(fields));
    schemas.insert(format!("{}Update", pascal_name), update_schema(fields));

    schemas
}

fn entity_schema(fields: &[FieldDefinition]) -> Value {
    let mut properties = IndexMap::new();
    properties.insert(
        "_id".to_string(),
        json!({ "type": "string", "description": "MongoDB ObjectId" }),
    );
    let mut required = vec![json!("_id")];

    for field in fields {
        if field.name.eq_ignore_ascii_case("_id") {
            continue;
        }
        properties.insert(field.name.clone(), swagger_property(field));
        if field.is_required {
            required.push(json!(field.name));
        }
    }

    properties.insert(
        "createdAt".to_string(),
        json!({ "type": "string", "format": "date-time", "description": "Creation timestamp" }),
    );
    properties.insert(
        "updatedAt".to_string(),
        json!({ "type": "string", "format": "date-time", "description": "Last update timestamp" }),
    );

    json!({ "type": "object", "properties": properties, "required": required })
}

fn create_schema(fields: &[FieldDefinition]) -> Value {
    let mut properties = IndexMap::new();
    let mut required = Vec::new();
    for field in fields {
        if field.name.eq_ignore_ascii_case("_id") {
            continue;
        }
        properties.insert(field.name.clone(), swagger_property(field));
        if field.is_required {
            required.push(json!(field.name));
        }
    }
    json!({ "type": "object", "properties": properties, "required": required })
}

fn update_schema(fields: &[FieldDefinition]) -> Value {
    let mut properties = IndexMap::new();
    for field in fields {
        if field.name.eq_ignore_ascii_case("_id") {
            continue;
        }
        properties.insert(field.name.clone(), swagger_property(field));
    }
    json!({ "type": "object", "properties": properties })
}

fn swagger_property(field: &FieldDefinition) -> Value {
    let description = format!("{} field", field.name);
    match &field.field_type {
        TypeTag::String => json!({ "type": "string", "description": description }),
        TypeTag::Number => json!({ "type": "number", "description": description }),
        TypeTag::Boolean => json!({ "type": "boolean", "description": description }),
        TypeTag::Date => {
            json!({ "type": "string", "format": "date-time", "description": description })
        }
        TypeTag::Enum => json!({
            "type": "string",
            "enum": field.enum_values,
            "description": description
        }),
        TypeTag::Array => {
            if field.is_object_array() {
                json!({
                    "type": "array",
                    "items": { "$ref": format!("#/components/schemas/{}", item_interface_name(&field.name)) },
                    "description": format!("Array of {} objects", field.name)
                })
            } else if field.array_item_type == Some(TypeTag::ObjectId) {
                json!({
                    "type": "array",
                    "items": { "type": "string" },
                    "description": format!("Array of {} references", field.name)
                })
            } else {
                json!({
                    "type": "array",
                    "items": { "type": "string" },
                    "description": format!("Array of {} items", field.name)
                })
            }
        }
        TypeTag::Object => {
            if field.object_properties.is_empty() {
                json!({ "type": "object", "description": format!("{} object", field.name) })
            } else {
                let mut nested = IndexMap::new();
                for prop in &field.object_properties {
                    nested.insert(prop.name.clone(), swagger_property(prop));
                }
                json!({
                    "type": "object",
                    "properties": nested,
                    "description": format!("{} object", field.name)
                })
            }
        }
        TypeTag::ObjectId => {
            json!({ "type": "string", "description": format!("{} reference ID", field.name) })
        }
        TypeTag::Other(_) => json!({ "type": "string", "description": description }),
    }
}

fn empty_swagger_doc() -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "API Documentation",
            "version": "1.0.0",
            "description": "Generated API documentation"
        },
        "paths": {},
        "components": { "schemas": {} }
    })
}

/// Merge a module's paths and schemas into the swagger file, creating it
/// with a skeleton document if absent. Existing keys for the same module are
/// replaced; everything else is preserved.
pub fn update_swagger_file(
    pascal_name: &str,
    folder_name: &str,
    fields: &[FieldDefinition],
    swagger_file: &Path,
) -> Result<(), String> {
    let mut doc = if swagger_file.exists() {
        let raw = fs_utils::read_file(swagger_file)?;
        match serde_json::from_str::<Value>(&raw) {
            Ok(doc) => doc,
            Err(_) => {
                println!("  ⚠ Could not parse existing swagger file, creating new one");
                empty_swagger_doc()
            }
        }
    } else {
        empty_swagger_doc()
    };

    if !doc["paths"].is_object() {
        doc["paths"] = json!({});
    }
    if !doc["components"]["schemas"].is_object() {
        doc["components"] = json!({ "schemas": {} });
    }

    for (path, item) in generate_swagger_paths(pascal_name, folder_name) {
        doc["paths"][path] = item;
    }
    for (name, schema) in generate_swagger_schemas(pascal_name, fields) {
        doc["components"]["schemas"][name] = schema;
    }

    let serialized = serde_json::to_string_pretty(&doc)
        .map_err(|e| format!("Failed to serialize swagger document: {}", e))?;
    fs_utils::write_file(swagger_file, serialized)
        .map_err(|e| format!("Failed to write {}: {}", swagger_file.display(), e))?;

    println!("  ✓ Swagger documentation updated: {}", swagger_file.display());
    Ok(())
}
