//! Renders `<folder>.interface.ts`: the TypeScript interface, nested item
//! interfaces, enum declarations, the filterables interface, and the model
//! type alias.

use crate::codegen::mappings::{enum_type_name, item_interface_name, typescript_type};
use crate::codegen::types::{FieldDefinition, TypeTag};

pub fn render(pascal_name: &str, fields: &[FieldDefinition]) -> String {
    let mut out = String::from("import { Model, Types } from 'mongoose';\n\n");

    // Nested interfaces back the array-of-object fields.
    for field in fields.iter().filter(|f| f.is_object_array()) {
        out.push_str(&format!(
            "export interface {} {{\n",
            item_interface_name(&field.name)
        ));
        for prop in &field.object_properties {
            if prop.name.eq_ignore_ascii_case("_id") {
                continue;
            }
            let marker = if prop.is_optional { "?" } else { "" };
            out.push_str(&format!(
                "  {}{}: {};\n",
                prop.name,
                marker,
                typescript_type(prop)
            ));
        }
        out.push_str("}\n\n");
    }

    for field in fields {
        if field.field_type == TypeTag::Enum && !field.enum_values.is_empty() {
            out.push_str(&format!("export enum {} {{\n", enum_type_name(&field.name)));
            for value in &field.enum_values {
                out.push_str(&format!("  {} = '{}',\n", enum_key(value), value));
            }
            out.push_str("}\n\n");
        }
    }

    let filterable: Vec<&FieldDefinition> = fields
        .iter()
        .filter(|f| matches!(f.field_type, TypeTag::String | TypeTag::Enum))
        .collect();
    if !filterable.is_empty() {
        out.push_str(&format!("export interface I{}Filterables {{\n", pascal_name));
        out.push_str("  searchTerm?: string;\n");
        for field in &filterable {
            out.push_str(&format!(
                "  {}?: {};\n",
                field.name,
                typescript_type(field)
            ));
        }
        out.push_str("}\n\n");
    }

    out.push_str(&format!("export interface I{} {{\n", pascal_name));
    out.push_str("  _id: Types.ObjectId;\n");
    if fields.is_empty() {
        out.push_str("  // Define interface properties here\n");
    }
    for field in fields {
        if field.name.eq_ignore_ascii_case("_id") {
            continue;
        }
        let marker = if field.is_optional { "?" } else { "" };
        out.push_str(&format!(
            "  {}{}: {};\n",
            field.name,
            marker,
            typescript_type(field)
        ));
    }
    out.push_str("}\n\n");

    out.push_str(&format!(
        "export type {}Model = Model<I{}, {{}}, {{}}>;\n",
        pascal_name, pascal_name
    ));

    out
}

/// Enum member key from a value: uppercased, non-alphanumerics collapsed
/// to underscores.
fn enum_key(value: &str) -> String {
    value
        .to_uppercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
