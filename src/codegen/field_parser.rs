//! Field token grammar parser.
//!
//! Turns the raw CLI field tokens into a [`FieldDefinition`] tree. The
//! grammar is deliberately lenient: tokens that match no recognized form
//! produce no field and no error, but are recorded in
//! [`ParsedFields::skipped_tokens`] so callers that want stricter behavior
//! have a hook.
//!
//! Supported token forms:
//!
//! - `name:type` with an optional trailing `:ref`
//! - `name[v1,v2,...]`: enum shorthand
//! - `name:enum[v1,v2,...]`: enum via type position
//! - `name:array:object:prop1:type1:prop2:type2:...`: array of structured
//!   sub-records, one flattening level per token
//! - `name:array:itemType[:ref]`: array of scalars or references
//! - `--skip kind...`: every later token names an artifact to suppress
//! - `file:true` / `--file:true`: enables file-upload wiring
//!
//! Names take a trailing `?` (optional) or `!` (required) decoration.

use crate::codegen::types::{FieldDefinition, ParsedFields, TypeTag};
use regex::Regex;
use std::sync::OnceLock;

/// How many levels of `:prop:type` pair flattening a single array-of-object
/// token supports. The flat pair encoding carries no nesting syntax, so this
/// stays at one; deeper structures need sibling tokens.
const OBJECT_FLATTEN_DEPTH: usize = 1;

fn enum_shorthand_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z0-9_]+[?!]?)\[([^\]]+)\]$").expect("valid regex"))
}

fn enum_type_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^enum\[([^\]]+)\]$").expect("valid regex"))
}

/// Strip trailing `?`/`!` decoration from a name.
///
/// Checks `?` first, then `!`, so `name!?` yields both flags while `name?!`
/// strips only the `!`. Both-set is a tolerated state, not an error.
fn strip_decoration(raw: &str) -> (String, bool, bool) {
    let mut name = raw.trim().to_string();
    let mut is_optional = false;
    let mut is_required = false;

    if name.ends_with('?') {
        is_optional = true;
        name.pop();
    }
    if name.ends_with('!') {
        is_required = true;
        name.pop();
    }

    (name, is_optional, is_required)
}

fn split_enum_values(raw: &str) -> Vec<String> {
    raw.split(',').map(|v| v.trim().to_string()).collect()
}

fn enum_field(raw_name: &str, values: Vec<String>) -> FieldDefinition {
    let (name, is_optional, is_required) = strip_decoration(raw_name);
    FieldDefinition {
        name,
        field_type: TypeTag::Enum,
        is_required,
        is_optional,
        enum_values: values,
        ..Default::default()
    }
}

/// Consume `(propName, propType)` pairs from `parts`, starting at index 3.
///
/// `depth` guards the flattening level: children parsed here are plain
/// name/type fields and never recurse into their own pair lists.
fn parse_object_properties(parts: &[&str], depth: usize) -> Vec<FieldDefinition> {
    if depth == 0 {
        return Vec::new();
    }

    let mut properties = Vec::new();
    let mut i = 3;
    while i + 1 < parts.len() {
        let (name, is_optional, is_required) = strip_decoration(parts[i]);
        if !name.is_empty() {
            properties.push(FieldDefinition {
                name,
                field_type: TypeTag::parse(parts[i + 1]),
                is_required,
                is_optional,
                ..Default::default()
            });
        }
        i += 2;
    }
    properties
}

/// Parse the raw field tokens that follow the module name on the CLI.
pub fn parse_field_tokens(tokens: &[String]) -> ParsedFields {
    let mut parsed = ParsedFields::default();
    let mut skip_mode = false;

    for token in tokens {
        if token == "--skip" {
            skip_mode = true;
            continue;
        }

        // Checked before skip mode: the upload flag is never an artifact name.
        if token == "file:true" || token == "--file:true" {
            parsed.file_upload = true;
            continue;
        }

        if skip_mode {
            parsed.skip_artifacts.push(token.clone());
            continue;
        }

        // Enum shorthand: name[v1,v2,...]
        if let Some(caps) = enum_shorthand_re().captures(token) {
            let values = split_enum_values(&caps[2]);
            parsed.fields.push(enum_field(&caps[1], values));
            continue;
        }

        let parts: Vec<&str> = token.split(':').collect();
        if parts.len() < 2 {
            parsed.skipped_tokens.push(token.clone());
            continue;
        }

        // Enum via type position: name:enum[v1,v2,...]
        if let Some(caps) = enum_type_re().captures(parts[1].trim()) {
            let values = split_enum_values(&caps[1]);
            parsed.fields.push(enum_field(parts[0], values));
            continue;
        }

        let (name, is_optional, is_required) = strip_decoration(parts[0]);

        // A name that strips to nothing cannot produce a usable field.
        if name.is_empty() {
            parsed.skipped_tokens.push(token.clone());
            continue;
        }

        // The storage layer always supplies its own identity field.
        if name.eq_ignore_ascii_case("_id") {
            continue;
        }

        let field_type = TypeTag::parse(parts[1]);

        if field_type == TypeTag::Array
            && parts.len() > 2
            && parts[2].trim().eq_ignore_ascii_case("object")
        {
            let object_properties = parse_object_properties(&parts, OBJECT_FLATTEN_DEPTH);
            parsed.fields.push(FieldDefinition {
                name,
                field_type,
                is_required,
                is_optional,
                reference: Some("object".to_string()),
                object_properties,
                ..Default::default()
            });
        } else if field_type == TypeTag::Array && parts.len() > 2 {
            // Array of scalars or references, e.g. products:array:objectid:Product
            let array_item_type = TypeTag::parse(parts[2]);
            let reference = parts.get(3).map(|r| r.trim().to_string());
            parsed.fields.push(FieldDefinition {
                name,
                field_type,
                is_required,
                is_optional,
                reference,
                array_item_type: Some(array_item_type),
                ..Default::default()
            });
        } else {
            let reference = parts.get(2).map(|r| r.trim().to_string());
            parsed.fields.push(FieldDefinition {
                name,
                field_type,
                is_required,
                is_optional,
                reference,
                ..Default::default()
            });
        }
    }

    parsed
}
