//! Module code generation.
//!
//! Turns a module name and a parsed field list into the full per-module
//! artifact set and wires the module into the project's central router.

pub mod artifacts;
pub mod field_parser;
pub mod fs_utils;
pub mod mappings;
pub mod module_gen;
pub mod router;
pub mod types;
pub mod utils;

// Re-export key types
pub use field_parser::parse_field_tokens;
pub use module_gen::create_module;
pub use router::patch_router_content;
pub use types::{ArtifactKind, FieldDefinition, ParsedFields, TypeTag};
