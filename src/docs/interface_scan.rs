//! Field recovery from previously generated module files.
//!
//! The documentation refresh path has no access to the original CLI tokens,
//! so it re-derives field definitions by scanning the module's interface
//! file, with the model file consulted for enum values and reference names
//! that the static types alone cannot recover.

use crate::codegen::types::{FieldDefinition, TypeTag};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

fn interface_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)export interface (\w+)\s*\{(.*?)\}").expect("valid regex")
    })
}

fn enum_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)export enum (\w+)\s*\{(.*?)\}").expect("valid regex"))
}

fn enum_value_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\w+\s*=\s*['"]([^'"]+)['"]"#).expect("valid regex"))
}

fn field_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w+)(\??):\s*([^;]+);?$").expect("valid regex"))
}

/// Hints recovered from the model file for a single field.
#[derive(Debug, Default)]
struct ModelFieldInfo {
    enum_values: Vec<String>,
    reference: Option<String>,
}

/// Re-derive a module's fields from `<module>.interface.ts`, consulting the
/// sibling model file when present.
pub fn extract_fields_from_interface(interface_file: &Path) -> Result<Vec<FieldDefinition>, String> {
    let interface_content = std::fs::read_to_string(interface_file)
        .map_err(|e| format!("Failed to read {}: {}", interface_file.display(), e))?;

    let model_content = interface_file
        .to_str()
        .map(|p| p.replace(".interface.ts", ".model.ts"))
        .and_then(|p| std::fs::read_to_string(p).ok())
        .unwrap_or_default();

    let enums = extract_enum_definitions(&interface_content);
    let nested = extract_nested_interfaces(&interface_content);

    let Some(main_body) = find_main_interface_body(&interface_content) else {
        return Ok(Vec::new());
    };

    let mut fields = Vec::new();
    for line in main_body.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty()
            || trimmed.starts_with("//")
            || trimmed.starts_with("_id")
            || trimmed.contains("createdAt")
            || trimmed.contains("updatedAt")
        {
            continue;
        }
        let Some(caps) = field_line_re().captures(trimmed) else {
            continue;
        };
        let name = caps[1].to_string();
        let is_optional = &caps[2] == "?";
        let type_str = caps[3].trim();

        let model_info = extract_field_info_from_model(&name, &model_content);
        if let Some(field) =
            field_from_type_str(&name, type_str, is_optional, &model_info, &nested, &enums)
        {
            fields.push(field);
        }
    }

    Ok(fields)
}

/// The main entity interface is the one declaring the identity field; a
/// module with a nonstandard layout falls back to the first `I`-prefixed
/// interface.
fn find_main_interface_body(content: &str) -> Option<String> {
    let mut fallback = None;
    for caps in interface_re().captures_iter(content) {
        let name = &caps[1];
        let body = &caps[2];
        if body.contains("_id") && body.contains("Types.ObjectId") {
            return Some(body.to_string());
        }
        if fallback.is_none() && name.starts_with('I') {
            fallback = Some(body.to_string());
        }
    }
    fallback
}

fn extract_enum_definitions(content: &str) -> HashMap<String, Vec<String>> {
    let mut enums = HashMap::new();
    for caps in enum_re().captures_iter(content) {
        let values: Vec<String> = enum_value_re()
            .captures_iter(&caps[2])
            .map(|v| v[1].to_string())
            .collect();
        if !values.is_empty() {
            enums.insert(caps[1].to_string(), values);
        }
    }
    enums
}

fn extract_nested_interfaces(content: &str) -> HashMap<String, Vec<FieldDefinition>> {
    let mut nested = HashMap::new();
    for caps in interface_re().captures_iter(content) {
        let name = caps[1].to_string();
        let body = &caps[2];

        // main entity and helper type aliases are handled elsewhere
        if body.contains("Types.ObjectId") && body.contains("_id") {
            continue;
        }
        if name.contains("Model") || name.contains("Filterables") {
            continue;
        }

        let mut fields = Vec::new();
        for line in body.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("//") {
                continue;
            }
            if let Some(field_caps) = field_line_re().captures(trimmed) {
                let is_optional = &field_caps[2] == "?";
                fields.push(FieldDefinition {
                    name: field_caps[1].to_string(),
                    field_type: simple_type(field_caps[3].trim()),
                    is_optional,
                    is_required: !is_optional,
                    ..Default::default()
                });
            }
        }
        if !fields.is_empty() {
            nested.insert(name, fields);
        }
    }
    nested
}

fn extract_field_info_from_model(field_name: &str, model_content: &str) -> ModelFieldInfo {
    let mut info = ModelFieldInfo::default();
    if model_content.is_empty() {
        return info;
    }

    let Ok(field_re) = Regex::new(&format!(
        r"(?i){}:\s*\{{([^}}]+)\}}",
        regex::escape(field_name)
    )) else {
        return info;
    };
    let Some(caps) = field_re.captures(model_content) else {
        return info;
    };
    let body = &caps[1];

    static ENUM_LIST_RE: OnceLock<Regex> = OnceLock::new();
    let enum_list_re =
        ENUM_LIST_RE.get_or_init(|| Regex::new(r"enum:\s*\[([^\]]+)\]").expect("valid regex"));
    if let Some(enum_caps) = enum_list_re.captures(body) {
        info.enum_values = enum_caps[1]
            .split(',')
            .map(|v| v.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
            .collect();
    }

    static REF_RE: OnceLock<Regex> = OnceLock::new();
    let ref_re =
        REF_RE.get_or_init(|| Regex::new(r#"ref:\s*['"]([^'"]+)['"]"#).expect("valid regex"));
    if let Some(ref_caps) = ref_re.captures(body) {
        info.reference = Some(ref_caps[1].to_string());
    }

    info
}

fn field_from_type_str(
    name: &str,
    type_str: &str,
    is_optional: bool,
    model_info: &ModelFieldInfo,
    nested: &HashMap<String, Vec<FieldDefinition>>,
    enums: &HashMap<String, Vec<String>>,
) -> Option<FieldDefinition> {
    let base = FieldDefinition {
        name: name.to_string(),
        is_optional,
        is_required: !is_optional,
        ..Default::default()
    };

    // named enum type, e.g. `status: StatusEnum;`
    if let Some(values) = enums.get(type_str) {
        return Some(FieldDefinition {
            field_type: TypeTag::Enum,
            enum_values: values.clone(),
            ..base
        });
    }
    if !model_info.enum_values.is_empty() {
        return Some(FieldDefinition {
            field_type: TypeTag::Enum,
            enum_values: model_info.enum_values.clone(),
            ..base
        });
    }

    // inline union, e.g. `'active' | 'inactive'`
    if type_str.contains('|') {
        let values = type_str
            .split('|')
            .map(|v| v.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
            .collect();
        return Some(FieldDefinition {
            field_type: TypeTag::Enum,
            enum_values: values,
            ..base
        });
    }

    if type_str.contains("ObjectId") {
        let reference = Some(
            model_info
                .reference
                .clone()
                .unwrap_or_else(|| "Document".to_string()),
        );
        if type_str.contains("[]") {
            return Some(FieldDefinition {
                field_type: TypeTag::Array,
                array_item_type: Some(TypeTag::ObjectId),
                reference,
                ..base
            });
        }
        return Some(FieldDefinition {
            field_type: TypeTag::ObjectId,
            reference,
            ..base
        });
    }

    if let Some(element) = type_str.strip_suffix("[]") {
        let element = element.trim();
        if let Some(properties) = nested.get(element) {
            return Some(FieldDefinition {
                field_type: TypeTag::Array,
                reference: Some("object".to_string()),
                object_properties: properties.clone(),
                ..base
            });
        }
        return Some(FieldDefinition {
            field_type: TypeTag::Array,
            array_item_type: Some(simple_type(element)),
            ..base
        });
    }

    if let Some(properties) = nested.get(type_str) {
        return Some(FieldDefinition {
            field_type: TypeTag::Object,
            object_properties: properties.clone(),
            ..base
        });
    }

    Some(FieldDefinition {
        field_type: simple_type(type_str),
        ..base
    })
}

fn simple_type(type_str: &str) -> TypeTag {
    let clean = type_str.to_lowercase();
    if clean.contains("objectid") {
        TypeTag::ObjectId
    } else if clean.contains("string") {
        TypeTag::String
    } else if clean.contains("number") {
        TypeTag::Number
    } else if clean.contains("boolean") {
        TypeTag::Boolean
    } else if clean.contains("date") {
        TypeTag::Date
    } else {
        TypeTag::String
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::artifacts::{interface_ts, model_ts};
    use crate::codegen::field_parser::parse_field_tokens;
    use tempfile::TempDir;

    fn write_module(dir: &Path, folder: &str, pascal: &str, tokens: &[&str]) -> std::path::PathBuf {
        let parsed = parse_field_tokens(
            &tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>(),
        );
        let module_dir = dir.join(folder);
        std::fs::create_dir_all(&module_dir).unwrap();
        let interface_file = module_dir.join(format!("{}.interface.ts", folder));
        std::fs::write(&interface_file, interface_ts::render(pascal, &parsed.fields)).unwrap();
        std::fs::write(
            module_dir.join(format!("{}.model.ts", folder)),
            model_ts::render(pascal, folder, &parsed.fields),
        )
        .unwrap();
        interface_file
    }

    #[test]
    fn test_roundtrip_scalars_and_optionality() {
        let dir = TempDir::new().unwrap();
        let interface =
            write_module(dir.path(), "user", "User", &["name!:string", "age?:number"]);

        let fields = extract_fields_from_interface(&interface).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "name");
        assert_eq!(fields[0].field_type, TypeTag::String);
        assert!(!fields[0].is_optional);
        assert_eq!(fields[1].name, "age");
        assert_eq!(fields[1].field_type, TypeTag::Number);
        assert!(fields[1].is_optional);
    }

    #[test]
    fn test_roundtrip_enum_values() {
        let dir = TempDir::new().unwrap();
        let interface = write_module(
            dir.path(),
            "job",
            "Job",
            &["status:enum[active,inactive]"],
        );

        let fields = extract_fields_from_interface(&interface).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field_type, TypeTag::Enum);
        assert_eq!(fields[0].enum_values, vec!["active", "inactive"]);
    }

    #[test]
    fn test_roundtrip_objectid_reference() {
        let dir = TempDir::new().unwrap();
        let interface = write_module(dir.path(), "order", "Order", &["owner:objectid:User"]);

        let fields = extract_fields_from_interface(&interface).unwrap();
        assert_eq!(fields[0].field_type, TypeTag::ObjectId);
        assert_eq!(fields[0].reference.as_deref(), Some("User"));
    }

    #[test]
    fn test_roundtrip_array_of_objects() {
        let dir = TempDir::new().unwrap();
        let interface = write_module(
            dir.path(),
            "order",
            "Order",
            &["items:array:object:sku:string:qty:number"],
        );

        let fields = extract_fields_from_interface(&interface).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field_type, TypeTag::Array);
        assert_eq!(fields[0].reference.as_deref(), Some("object"));
        let props = &fields[0].object_properties;
        assert_eq!(props.len(), 2);
        assert_eq!(props[0].name, "sku");
        assert_eq!(props[1].field_type, TypeTag::Number);
    }

    #[test]
    fn test_missing_interface_is_an_error() {
        let err = extract_fields_from_interface(Path::new("nope/x.interface.ts")).unwrap_err();
        assert!(err.contains("x.interface.ts"));
    }

    #[test]
    fn test_unrecognized_layout_yields_no_fields() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("odd.interface.ts");
        std::fs::write(&file, "export const x = 1;\n").unwrap();
        assert!(extract_fields_from_interface(&file).unwrap().is_empty());
    }

}
