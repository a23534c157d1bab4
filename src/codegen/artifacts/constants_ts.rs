//! Renders `<folder>.constants.ts`: filterable/searchable field name lists
//! plus a small set-equality helper used by the query layer.

use crate::codegen::types::{FieldDefinition, TypeTag};

pub fn render(pascal_name: &str, folder_name: &str, fields: &[FieldDefinition]) -> String {
    let filterable = quoted_names(fields, |f| {
        matches!(f.field_type, TypeTag::String | TypeTag::Enum)
    });
    let searchable = quoted_names(fields, |f| f.field_type == TypeTag::String);

    format!(
        r#"// Filterable fields for {name}
export const {folder}Filterables = [{filterable}];

// Searchable fields for {name}
export const {folder}SearchableFields = [{searchable}];

// Helper function for set comparison
export const isSetEqual = (setA: Set<string>, setB: Set<string>): boolean => {{
  if (setA.size !== setB.size) return false;
  for (const item of setA) {{
    if (!setB.has(item)) return false;
  }}
  return true;
}};
"#,
        name = pascal_name,
        folder = folder_name,
        filterable = filterable,
        searchable = searchable,
    )
}

fn quoted_names(fields: &[FieldDefinition], keep: impl Fn(&FieldDefinition) -> bool) -> String {
    fields
        .iter()
        .filter(|f| keep(f))
        .map(|f| format!("'{}'", f.name))
        .collect::<Vec<_>>()
        .join(", ")
}
