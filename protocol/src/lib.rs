//! Decoder for the wire messages sent by a remote OpenEdge ABL debugger backend.
//!
//! The backend multiplexes source listings, class metadata, variable dumps,
//! array contents and routine parameter lists over one stream of NUL-terminated
//! frames. Each message kind uses its own positional field layout; this crate
//! turns complete frames into typed [`DebugMessage`] values and nothing else.
//! Assembling complete frames out of a chunked transport lives in the
//! `abl-codec` crate.
mod decode;
mod error;
mod messages;
mod types;

pub use decode::{decode, decode_frame};
pub use error::DecodeError;
pub use messages::{
    ArrayMessage, ClassInfoMessage, DebugMessage, GenericMessage, ListingBreakpoint,
    ListingMessage, ParametersMessage, VariablesMessage, MSG_ARRAY, MSG_CLASSINFO, MSG_LISTING,
    MSG_PARAMETERS, MSG_VARIABLES,
};
pub use types::{is_primitive_type, Variable, VariableKind};
