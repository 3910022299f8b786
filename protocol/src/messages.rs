//! Typed messages produced by one decode pass over the wire stream.
use serde::{Deserialize, Serialize};

use crate::types::Variable;

pub const MSG_LISTING: &str = "MSG_LISTING";
pub const MSG_CLASSINFO: &str = "MSG_CLASSINFO";
pub const MSG_VARIABLES: &str = "MSG_VARIABLES";
pub const MSG_ARRAY: &str = "MSG_ARRAY";
pub const MSG_PARAMETERS: &str = "MSG_PARAMETERS";

/// One decoded frame. Each recognised wire code maps to a dedicated variant
/// with typed fields; anything else lands in [`DebugMessage::Generic`] with
/// the raw field values preserved.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DebugMessage {
    Listing(ListingMessage),
    ClassInfo(ClassInfoMessage),
    Variables(VariablesMessage),
    Array(ArrayMessage),
    Parameters(ParametersMessage),
    Generic(GenericMessage),
}

impl DebugMessage {
    /// The wire code this message was decoded from.
    pub fn code(&self) -> &str {
        match self {
            DebugMessage::Listing(_) => MSG_LISTING,
            DebugMessage::ClassInfo(_) => MSG_CLASSINFO,
            DebugMessage::Variables(_) => MSG_VARIABLES,
            DebugMessage::Array(_) => MSG_ARRAY,
            DebugMessage::Parameters(_) => MSG_PARAMETERS,
            DebugMessage::Generic(msg) => &msg.code,
        }
    }
}

/// Source listing for the module the debuggee is stopped in, with the
/// breakpoints the backend knows about.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListingMessage {
    pub file: String,
    pub stopped_at_line: u32,
    pub breakpoint_count: usize,
    pub breakpoints: Vec<ListingBreakpoint>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ListingBreakpoint {
    pub line: String,
    pub id: String,
}

/// Class metadata for one object: its superclass (if any) and properties.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfoMessage {
    pub base_class: Option<String>,
    pub properties: Vec<Variable>,
}

/// A dump of local or instance variables.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VariablesMessage {
    pub variables: Vec<Variable>,
}

/// The elements of one array variable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ArrayMessage {
    pub values: Vec<String>,
}

/// The parameters of the routine the debuggee is stopped in. Same shape as
/// [`VariablesMessage`] but a distinct kind: parameter names carry a direction
/// glyph and every entry has kind `Parameter`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ParametersMessage {
    pub parameters: Vec<Variable>,
}

/// A frame whose code has no dedicated decoder: the raw records, line-split
/// then field-split, in wire order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GenericMessage {
    pub code: String,
    pub args: Vec<Vec<String>>,
}
