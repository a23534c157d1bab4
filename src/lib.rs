//! # Modgen: Express/Mongoose Module Generator
//!
//! Modgen scaffolds complete REST backend modules for Express/Mongoose
//! projects from a compact field-definition grammar, and keeps Postman and
//! OpenAPI documentation in sync with the generated code.
//!
//! ## Features
//!
//! - **Field token grammar**: `name!:string`, `status:enum[active,inactive]`,
//!   `items:array:object:sku:string:qty!:number`, enum shorthand
//!   `status[active,inactive]`, and `--skip` artifact suppression
//! - **Seven artifacts per module**: interface, model, controller, service,
//!   route, validation, and constants files, mutually consistent by
//!   construction
//! - **Router registration**: idempotent import and route-array patching of
//!   the project's central router file
//! - **Documentation sync**: per-module Postman collections with runnable
//!   sample requests, swagger.json merge, and optional remote Postman
//!   workspace sync
//! - **Documentation refresh**: re-derives fields from generated interface
//!   and model files so docs can be rebuilt without the original tokens
//!
//! ## Example
//!
//! ```text
//! modgen generate User name!:string email:string age:number status[active,inactive]
//! modgen update-docs user
//! ```

// Core modules
pub mod codegen;
pub mod config;
pub mod docs;

// Re-export key types
pub use codegen::{
    create_module, parse_field_tokens, ArtifactKind, FieldDefinition, ParsedFields, TypeTag,
};
pub use config::{GeneratorConfig, PostmanEnv};
pub use docs::{update_all_documentation, update_existing_modules_documentation, DocOptions};
