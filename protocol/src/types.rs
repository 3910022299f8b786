//! Variable model shared by the per-kind decoders.
use serde::{Deserialize, Serialize};

/// ABL built-in scalar type names. Anything else names a user-defined class.
const PRIMITIVE_TYPES: &[&str] = &[
    "CHARACTER",
    "LONGCHAR",
    "INTEGER",
    "INT64",
    "DECIMAL",
    "LOGICAL",
    "DATE",
    "DATETIME",
    "DATETIME-TZ",
    "HANDLE",
    "COM-HANDLE",
    "WIDGET-HANDLE",
    "ROWID",
    "RECID",
    "RAW",
    "MEMPTR",
    "BLOB",
    "CLOB",
];

/// Whether `name` is a built-in scalar type. ABL type names are
/// case-insensitive on the wire.
pub fn is_primitive_type(name: &str) -> bool {
    PRIMITIVE_TYPES.iter().any(|t| t.eq_ignore_ascii_case(name))
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum VariableKind {
    Variable,
    Class,
    Array,
    Parameter,
}

impl VariableKind {
    /// Classify a variable from its declared type name alone: user-defined
    /// class types are expandable, built-in scalars are not.
    pub fn classify(type_name: &str) -> Self {
        if is_primitive_type(type_name) {
            VariableKind::Variable
        } else {
            VariableKind::Class
        }
    }
}

/// One decoded variable, as front ends persist and display it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub type_name: String,
    pub kind: VariableKind,
    /// Raw string representation as sent by the backend.
    pub value: String,
    /// Always empty at decode time; a separate expansion request fills this in
    /// for class and array variables.
    pub children: Vec<Variable>,
}
