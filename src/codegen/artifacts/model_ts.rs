//! Renders `<folder>.model.ts`: nested item schemas, the main Mongoose
//! schema with timestamps, and the exported model.

use crate::codegen::mappings::{item_schema_name, mongoose_field_entry};
use crate::codegen::types::FieldDefinition;

pub fn render(pascal_name: &str, folder_name: &str, fields: &[FieldDefinition]) -> String {
    let mut out = format!(
        "import {{ Schema, model }} from 'mongoose';\nimport {{ I{}, {}Model }} from './{}.interface';\n\n",
        pascal_name, pascal_name, folder_name
    );

    for field in fields.iter().filter(|f| f.is_object_array()) {
        out.push_str(&format!(
            "const {} = new Schema({{\n",
            item_schema_name(&field.name)
        ));
        for prop in &field.object_properties {
            if prop.name.eq_ignore_ascii_case("_id") {
                continue;
            }
            out.push_str(&format!(
                "  {}: {},\n",
                prop.name,
                mongoose_field_entry(prop)
            ));
        }
        out.push_str("}, { _id: false });\n\n");
    }

    out.push_str(&format!(
        "const {}Schema = new Schema<I{}, {}Model>({{\n",
        folder_name, pascal_name, pascal_name
    ));
    if fields.is_empty() {
        out.push_str("  // Define schema fields here\n");
    }
    for field in fields {
        if field.name.eq_ignore_ascii_case("_id") {
            continue;
        }
        out.push_str(&format!(
            "  {}: {},\n",
            field.name,
            mongoose_field_entry(field)
        ));
    }
    out.push_str("}, {\n  timestamps: true\n});\n\n");

    out.push_str(&format!(
        "export const {} = model<I{}, {}Model>('{}', {}Schema);\n",
        pascal_name, pascal_name, pascal_name, pascal_name, folder_name
    ));

    out
}
