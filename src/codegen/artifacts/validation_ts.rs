//! Renders `<folder>.validation.ts`: Zod schemas for the create, update,
//! getById, getAll, and delete request shapes.

use crate::codegen::mappings::{item_schema_name, zod_field_entry, zod_type};
use crate::codegen::types::FieldDefinition;

pub fn render(pascal_name: &str, fields: &[FieldDefinition]) -> String {
    let mut out = String::from("import { z } from 'zod';\n\n");

    for field in fields.iter().filter(|f| f.is_object_array()) {
        out.push_str(&format!(
            "const {} = z.object({{\n",
            item_schema_name(&field.name)
        ));
        for prop in &field.object_properties {
            if prop.name.eq_ignore_ascii_case("_id") {
                continue;
            }
            out.push_str(&format!("  {}: {},\n", prop.name, zod_field_entry(prop)));
        }
        out.push_str("});\n\n");
    }

    out.push_str(&format!("export const {}Validations = {{\n", pascal_name));

    // create: body per field, optional params
    out.push_str("  create: z.object({\n    body: z.object({\n");
    if fields.is_empty() {
        out.push_str("      // Add validation fields\n");
    }
    for field in body_fields(fields) {
        out.push_str(&format!(
            "      {}: {},\n",
            field.name,
            zod_field_entry(field)
        ));
    }
    out.push_str("    }),\n    params: z.object({\n      id: z.string(),\n    }).optional(),\n  }),\n\n");

    // update: every body field optional
    out.push_str("  update: z.object({\n    body: z.object({\n");
    if fields.is_empty() {
        out.push_str("      // Add validation fields\n");
    }
    for field in body_fields(fields) {
        out.push_str(&format!(
            "      {}: {}.optional(),\n",
            field.name,
            zod_type(field)
        ));
    }
    out.push_str("    }),\n    params: z.object({\n      id: z.string(),\n    }),\n  }),\n\n");

    out.push_str(
        "  getById: z.object({\n    params: z.object({\n      id: z.string(),\n    }),\n  }),\n\n",
    );

    out.push_str("  getAll: z.object({\n    query: z.object({\n");
    out.push_str("      page: z.string().optional(),\n");
    out.push_str("      limit: z.string().optional(),\n");
    out.push_str("      sortBy: z.string().optional(),\n");
    out.push_str("      sortOrder: z.string().optional(),\n");
    out.push_str("    }).optional(),\n  }),\n\n");

    out.push_str(
        "  delete: z.object({\n    params: z.object({\n      id: z.string(),\n    }),\n  }),\n",
    );

    out.push_str("};\n");
    out
}

fn body_fields(fields: &[FieldDefinition]) -> impl Iterator<Item = &FieldDefinition> {
    fields.iter().filter(|f| !f.name.eq_ignore_ascii_case("_id"))
}
