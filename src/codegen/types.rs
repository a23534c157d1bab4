//! Type definitions for field-driven module generation.
//!
//! A [`FieldDefinition`] tree is built once per CLI invocation from the raw
//! field tokens and consumed read-only by every mapping table and renderer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical field type parsed from a field token.
///
/// Input is case-insensitive; `id` is accepted as an alias for `objectid`.
/// Tags outside the known set are carried verbatim in `Other` so the mapping
/// tables can apply their string-equivalent fallback instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeTag {
    String,
    Number,
    Boolean,
    Date,
    Enum,
    Array,
    Object,
    ObjectId,
    Other(String),
}

impl TypeTag {
    /// Parse a type keyword, case-insensitively.
    pub fn parse(s: &str) -> TypeTag {
        match s.trim().to_lowercase().as_str() {
            "string" => TypeTag::String,
            "number" => TypeTag::Number,
            "boolean" => TypeTag::Boolean,
            "date" => TypeTag::Date,
            "enum" => TypeTag::Enum,
            "array" => TypeTag::Array,
            "object" => TypeTag::Object,
            "objectid" | "id" => TypeTag::ObjectId,
            other => TypeTag::Other(other.to_string()),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::Date => "date",
            TypeTag::Enum => "enum",
            TypeTag::Array => "array",
            TypeTag::Object => "object",
            TypeTag::ObjectId => "objectid",
            TypeTag::Other(tag) => tag.as_str(),
        };
        write!(f, "{}", s)
    }
}

impl Default for TypeTag {
    fn default() -> Self {
        TypeTag::String
    }
}

/// A single parsed field definition.
///
/// `is_required` and `is_optional` are two independent flags, both derived
/// from trailing name decoration (`!` and `?`). A malformed token can set
/// both at once; that state is tolerated rather than rejected. Downstream,
/// `is_optional` alone decides optionality in the validation and static-type
/// outputs, while `is_required` alone adds the mandatory-on-write marker at
/// the storage-schema layer. Keep them as two booleans; collapsing to a
/// tri-state would change generated output for the both-set case.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Identifier, stripped of trailing `?`/`!` decoration.
    pub name: String,
    /// Declared logical type.
    pub field_type: TypeTag,
    /// Trailing `!` decoration was present.
    pub is_required: bool,
    /// Trailing `?` decoration was present.
    pub is_optional: bool,
    /// Referenced entity name for `objectid` fields, or the literal marker
    /// `"object"` for arrays holding structured sub-records.
    pub reference: Option<String>,
    /// Enum values in declaration order. Order is significant: the first
    /// value becomes the storage-schema default.
    pub enum_values: Vec<String>,
    /// Child fields for array-of-object fields. Empty means "no structured
    /// properties": the mapping tables fall back to a generic array.
    pub object_properties: Vec<FieldDefinition>,
    /// Item type for arrays of scalars or references.
    pub array_item_type: Option<TypeTag>,
}

impl FieldDefinition {
    /// Shorthand for a plain named field of the given type.
    pub fn new(name: impl Into<String>, field_type: TypeTag) -> Self {
        FieldDefinition {
            name: name.into(),
            field_type,
            ..Default::default()
        }
    }

    /// True when this is an array of structured sub-records with at least
    /// one declared property.
    pub fn is_object_array(&self) -> bool {
        self.field_type == TypeTag::Array
            && self
                .reference
                .as_deref()
                .is_some_and(|r| r.eq_ignore_ascii_case("object"))
            && !self.object_properties.is_empty()
    }
}

/// Result of parsing the raw field-token list.
#[derive(Debug, Clone, Default)]
pub struct ParsedFields {
    /// Fields in declaration order.
    pub fields: Vec<FieldDefinition>,
    /// Artifact kinds to suppress, collected verbatim after `--skip`.
    pub skip_artifacts: Vec<String>,
    /// `file:true` / `--file:true` was present.
    pub file_upload: bool,
    /// Tokens that matched no grammar form and produced no field. The CLI
    /// stays silent about these by default; tests and stricter callers can
    /// inspect them.
    pub skipped_tokens: Vec<String>,
}

/// The generated file categories for one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Interface,
    Model,
    Controller,
    Service,
    Route,
    Validation,
    Constants,
}

impl ArtifactKind {
    /// All artifact kinds, in the order files are written.
    pub const ALL: [ArtifactKind; 7] = [
        ArtifactKind::Interface,
        ArtifactKind::Model,
        ArtifactKind::Controller,
        ArtifactKind::Service,
        ArtifactKind::Route,
        ArtifactKind::Validation,
        ArtifactKind::Constants,
    ];

    /// The key used both in `--skip` matching and in generated file names
    /// (`<folder>.<key>.ts`).
    pub fn key(&self) -> &'static str {
        match self {
            ArtifactKind::Interface => "interface",
            ArtifactKind::Model => "model",
            ArtifactKind::Controller => "controller",
            ArtifactKind::Service => "service",
            ArtifactKind::Route => "route",
            ArtifactKind::Validation => "validation",
            ArtifactKind::Constants => "constants",
        }
    }
}
