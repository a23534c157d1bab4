//! Type mapping tables.
//!
//! Three pure functions translate a [`FieldDefinition`] into the three target
//! vocabularies: a Mongoose schema expression, a Zod validator expression,
//! and a TypeScript type. They are total: any tag, including unrecognized
//! ones, maps to the string-equivalent row rather than failing. The three
//! tables recurse into the same sub-structures so the generated model,
//! validation, and interface files stay mutually consistent.

use crate::codegen::types::{FieldDefinition, TypeTag};
use crate::codegen::utils::capitalize_first;

/// Name of the nested Mongoose/Zod schema constant for an array-of-object
/// field, e.g. `itemsItemSchema`.
pub fn item_schema_name(field_name: &str) -> String {
    format!("{}ItemSchema", field_name)
}

/// Name of the nested TypeScript interface for an array-of-object field,
/// e.g. `ItemsItem`.
pub fn item_interface_name(field_name: &str) -> String {
    format!("{}Item", capitalize_first(field_name))
}

/// Name of the generated TypeScript enum for an enum field, e.g. `StatusEnum`.
pub fn enum_type_name(field_name: &str) -> String {
    format!("{}Enum", capitalize_first(field_name))
}

fn quoted_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("'{}'", v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Base Mongoose schema expression for a field, without required/default
/// modifiers. See [`mongoose_field_entry`] for the full schema entry.
pub fn mongoose_type(field: &FieldDefinition) -> String {
    match &field.field_type {
        TypeTag::String => "{ type: String }".to_string(),
        TypeTag::Number => "{ type: Number }".to_string(),
        TypeTag::Boolean => "{ type: Boolean }".to_string(),
        TypeTag::Date => "{ type: Date }".to_string(),
        TypeTag::Enum => {
            if field.enum_values.is_empty() {
                "{ type: String }".to_string()
            } else {
                format!("{{ type: String, enum: [{}] }}", quoted_list(&field.enum_values))
            }
        }
        TypeTag::Array => {
            if field.is_object_array() {
                format!("[{}]", item_schema_name(&field.name))
            } else if let Some(item) = &field.array_item_type {
                match item {
                    TypeTag::String => "{ type: [String] }".to_string(),
                    TypeTag::Number => "{ type: [Number] }".to_string(),
                    TypeTag::Boolean => "{ type: [Boolean] }".to_string(),
                    TypeTag::Date => "{ type: [Date] }".to_string(),
                    TypeTag::ObjectId => format!(
                        "{{ type: [Schema.Types.ObjectId], ref: '{}' }}",
                        field.reference.as_deref().unwrap_or("Document")
                    ),
                    _ => "{ type: [String] }".to_string(),
                }
            } else if let Some(reference) = &field.reference {
                if reference.eq_ignore_ascii_case("object") {
                    // object marker with no usable properties
                    "{ type: [Schema.Types.Mixed] }".to_string()
                } else {
                    format!("{{ type: [Schema.Types.ObjectId], ref: '{}' }}", reference)
                }
            } else {
                "{ type: [Schema.Types.Mixed] }".to_string()
            }
        }
        TypeTag::Object => {
            if field.object_properties.is_empty() {
                "{ type: Schema.Types.Mixed }".to_string()
            } else {
                let props = field
                    .object_properties
                    .iter()
                    .map(|p| format!("{}: {}", p.name, mongoose_type(p)))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{ {} }}", props)
            }
        }
        TypeTag::ObjectId => match &field.reference {
            Some(reference) => {
                format!("{{ type: Schema.Types.ObjectId, ref: '{}' }}", reference)
            }
            None => "{ type: Schema.Types.ObjectId }".to_string(),
        },
        TypeTag::Other(_) => "{ type: String }".to_string(),
    }
}

/// Full Mongoose schema entry for a field: the base expression with
/// `required: true` and the enum default spliced inside the braces.
///
/// Only `is_required` marks the field mandatory on write; `is_optional`
/// affects the validation and interface layers, not storage.
pub fn mongoose_field_entry(field: &FieldDefinition) -> String {
    let base = mongoose_type(field);

    let mut modifiers = String::new();
    if field.is_required {
        modifiers.push_str(", required: true");
    }
    if field.field_type == TypeTag::Enum && !field.enum_values.is_empty() {
        modifiers.push_str(&format!(", default: '{}'", field.enum_values[0]));
    }

    if modifiers.is_empty() {
        return base;
    }

    if base.starts_with("{ type:") {
        match base.strip_suffix(" }") {
            Some(inner) => format!("{}{} }}", inner, modifiers),
            None => format!("{{ type: {}{} }}", base, modifiers),
        }
    } else {
        format!("{{ type: {}{} }}", base, modifiers)
    }
}

/// Base Zod validator expression for a field. See [`zod_field_entry`] for
/// the optionality-applied form.
pub fn zod_type(field: &FieldDefinition) -> String {
    match &field.field_type {
        TypeTag::String => {
            if field.enum_values.is_empty() {
                "z.string()".to_string()
            } else {
                format!("z.enum([{}])", quoted_list(&field.enum_values))
            }
        }
        TypeTag::Number => "z.number()".to_string(),
        TypeTag::Boolean => "z.boolean()".to_string(),
        TypeTag::Date => "z.string().datetime()".to_string(),
        TypeTag::Enum => {
            if field.enum_values.is_empty() {
                "z.string()".to_string()
            } else {
                format!("z.enum([{}])", quoted_list(&field.enum_values))
            }
        }
        TypeTag::Array => {
            if field.is_object_array() {
                format!("z.array({})", item_schema_name(&field.name))
            } else if let Some(item) = &field.array_item_type {
                match item {
                    TypeTag::Number => "z.array(z.number())".to_string(),
                    TypeTag::Boolean => "z.array(z.boolean())".to_string(),
                    _ => "z.array(z.string())".to_string(),
                }
            } else if field
                .reference
                .as_deref()
                .is_some_and(|r| !r.eq_ignore_ascii_case("object"))
            {
                // references travel as id strings in request bodies
                "z.array(z.string())".to_string()
            } else {
                "z.array(z.any())".to_string()
            }
        }
        TypeTag::Object => {
            if field.object_properties.is_empty() {
                "z.record(z.string(), z.any())".to_string()
            } else {
                let props = field
                    .object_properties
                    .iter()
                    .map(|p| format!("{}: {}", p.name, zod_field_entry(p)))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("z.object({{ {} }})", props)
            }
        }
        TypeTag::ObjectId => "z.string()".to_string(),
        TypeTag::Other(_) => "z.string()".to_string(),
    }
}

/// Zod validator with the optionality modifier applied.
///
/// `is_optional` is authoritative here: a field carrying both decorations
/// still validates as optional, since optionality describes the request
/// surface while `is_required` describes storage.
pub fn zod_field_entry(field: &FieldDefinition) -> String {
    let base = zod_type(field);
    if field.is_optional {
        format!("{}.optional()", base)
    } else {
        base
    }
}

/// TypeScript type for a field. The `?` optional marker is the caller's
/// concern; this returns only the type expression.
pub fn typescript_type(field: &FieldDefinition) -> String {
    match &field.field_type {
        TypeTag::String => "string".to_string(),
        TypeTag::Number => "number".to_string(),
        TypeTag::Boolean => "boolean".to_string(),
        TypeTag::Date => "Date".to_string(),
        TypeTag::Enum => {
            if field.enum_values.is_empty() {
                "string".to_string()
            } else {
                enum_type_name(&field.name)
            }
        }
        TypeTag::Array => {
            if field.is_object_array() {
                format!("{}[]", item_interface_name(&field.name))
            } else if let Some(item) = &field.array_item_type {
                match item {
                    TypeTag::Number => "number[]".to_string(),
                    TypeTag::Boolean => "boolean[]".to_string(),
                    TypeTag::Date => "Date[]".to_string(),
                    TypeTag::ObjectId => "Types.ObjectId[]".to_string(),
                    _ => "string[]".to_string(),
                }
            } else if field
                .reference
                .as_deref()
                .is_some_and(|r| !r.eq_ignore_ascii_case("object"))
            {
                "Types.ObjectId[]".to_string()
            } else {
                "any[]".to_string()
            }
        }
        TypeTag::Object => {
            if field.object_properties.is_empty() {
                "Record<string, any>".to_string()
            } else {
                let props = field
                    .object_properties
                    .iter()
                    .map(|p| {
                        let marker = if p.is_optional { "?" } else { "" };
                        format!("{}{}: {}", p.name, marker, typescript_type(p))
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
                format!("{{ {} }}", props)
            }
        }
        TypeTag::ObjectId => "Types.ObjectId".to_string(),
        TypeTag::Other(_) => "string".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, tag: TypeTag) -> FieldDefinition {
        FieldDefinition::new(name, tag)
    }

    #[test]
    fn test_scalar_mappings() {
        let f = field("age", TypeTag::Number);
        assert_eq!(mongoose_type(&f), "{ type: Number }");
        assert_eq!(zod_type(&f), "z.number()");
        assert_eq!(typescript_type(&f), "number");
    }

    #[test]
    fn test_date_mapping() {
        let f = field("createdOn", TypeTag::Date);
        assert_eq!(mongoose_type(&f), "{ type: Date }");
        assert_eq!(zod_type(&f), "z.string().datetime()");
        assert_eq!(typescript_type(&f), "Date");
    }

    #[test]
    fn test_enum_mapping_with_default() {
        let mut f = field("status", TypeTag::Enum);
        f.enum_values = vec!["active".to_string(), "inactive".to_string()];
        assert_eq!(
            mongoose_field_entry(&f),
            "{ type: String, enum: ['active', 'inactive'], default: 'active' }"
        );
        assert_eq!(zod_type(&f), "z.enum(['active', 'inactive'])");
        assert_eq!(typescript_type(&f), "StatusEnum");
    }

    #[test]
    fn test_required_spliced_inside_braces() {
        let mut f = field("name", TypeTag::String);
        f.is_required = true;
        assert_eq!(mongoose_field_entry(&f), "{ type: String, required: true }");
    }

    #[test]
    fn test_objectid_with_reference() {
        let mut f = field("owner", TypeTag::ObjectId);
        f.reference = Some("User".to_string());
        assert_eq!(
            mongoose_type(&f),
            "{ type: Schema.Types.ObjectId, ref: 'User' }"
        );
        assert_eq!(zod_type(&f), "z.string()");
        assert_eq!(typescript_type(&f), "Types.ObjectId");
    }

    #[test]
    fn test_object_array_uses_named_sub_schemas() {
        let mut f = field("items", TypeTag::Array);
        f.reference = Some("object".to_string());
        f.object_properties = vec![field("sku", TypeTag::String)];
        assert_eq!(mongoose_type(&f), "[itemsItemSchema]");
        assert_eq!(zod_type(&f), "z.array(itemsItemSchema)");
        assert_eq!(typescript_type(&f), "ItemsItem[]");
    }

    #[test]
    fn test_object_array_required_wraps_schema_list() {
        let mut f = field("items", TypeTag::Array);
        f.reference = Some("object".to_string());
        f.object_properties = vec![field("sku", TypeTag::String)];
        f.is_required = true;
        assert_eq!(
            mongoose_field_entry(&f),
            "{ type: [itemsItemSchema], required: true }"
        );
    }

    #[test]
    fn test_object_array_without_properties_degrades_to_generic() {
        let mut f = field("items", TypeTag::Array);
        f.reference = Some("object".to_string());
        assert_eq!(mongoose_type(&f), "{ type: [Schema.Types.Mixed] }");
        assert_eq!(zod_type(&f), "z.array(z.any())");
        assert_eq!(typescript_type(&f), "any[]");
    }

    #[test]
    fn test_bare_array_degrades_to_generic() {
        let f = field("data", TypeTag::Array);
        assert_eq!(mongoose_type(&f), "{ type: [Schema.Types.Mixed] }");
        assert_eq!(zod_type(&f), "z.array(z.any())");
        assert_eq!(typescript_type(&f), "any[]");
    }

    #[test]
    fn test_array_of_references() {
        let mut f = field("products", TypeTag::Array);
        f.array_item_type = Some(TypeTag::ObjectId);
        f.reference = Some("Product".to_string());
        assert_eq!(
            mongoose_type(&f),
            "{ type: [Schema.Types.ObjectId], ref: 'Product' }"
        );
        assert_eq!(zod_type(&f), "z.array(z.string())");
        assert_eq!(typescript_type(&f), "Types.ObjectId[]");
    }

    #[test]
    fn test_unrecognized_tag_falls_back_to_string() {
        let f = field("blob", TypeTag::Other("foo".to_string()));
        assert_eq!(mongoose_type(&f), "{ type: String }");
        assert_eq!(zod_type(&f), "z.string()");
        assert_eq!(typescript_type(&f), "string");
        assert!(!mongoose_field_entry(&f).is_empty());
    }

    #[test]
    fn test_optional_authoritative_for_validation() {
        let mut f = field("nickname", TypeTag::String);
        f.is_optional = true;
        f.is_required = true;
        assert_eq!(zod_field_entry(&f), "z.string().optional()");
        assert_eq!(
            mongoose_field_entry(&f),
            "{ type: String, required: true }"
        );
    }

    #[test]
    fn test_inline_object_with_properties() {
        let mut f = field("meta", TypeTag::Object);
        f.object_properties = vec![field("key", TypeTag::String), field("count", TypeTag::Number)];
        assert_eq!(
            mongoose_type(&f),
            "{ key: { type: String }, count: { type: Number } }"
        );
        assert_eq!(
            typescript_type(&f),
            "{ key: string; count: number }"
        );
    }
}
