//! Artifact renderers.
//!
//! One renderer per generated file kind. Each is a pure function from the
//! module's names and parsed fields to the full text of one TypeScript
//! source file; all filesystem work happens in the orchestration layer.

pub mod constants_ts;
pub mod controller_ts;
pub mod interface_ts;
pub mod model_ts;
pub mod route_ts;
pub mod service_ts;
pub mod validation_ts;

use crate::codegen::types::{ArtifactKind, FieldDefinition};

/// Whether the module handles uploaded files.
///
/// Either the explicit `file:true` flag or a conventionally named media
/// field turns on the upload wiring in the controller, service, and route.
pub fn has_file_field(fields: &[FieldDefinition], file_upload: bool) -> bool {
    file_upload
        || fields
            .iter()
            .any(|f| matches!(f.name.as_str(), "image" | "images" | "media"))
}

/// Render the artifact of the given kind.
pub fn render(
    kind: ArtifactKind,
    pascal_name: &str,
    folder_name: &str,
    fields: &[FieldDefinition],
    file_upload: bool,
) -> String {
    match kind {
        ArtifactKind::Interface => interface_ts::render(pascal_name, fields),
        ArtifactKind::Model => model_ts::render(pascal_name, folder_name, fields),
        ArtifactKind::Controller => {
            controller_ts::render(pascal_name, folder_name, fields, file_upload)
        }
        ArtifactKind::Service => service_ts::render(pascal_name, folder_name, fields, file_upload),
        ArtifactKind::Route => route_ts::render(pascal_name, folder_name, fields, file_upload),
        ArtifactKind::Validation => validation_ts::render(pascal_name, fields),
        ArtifactKind::Constants => constants_ts::render(pascal_name, folder_name, fields),
    }
}
