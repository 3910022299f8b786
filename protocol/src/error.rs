/// Why one frame failed to decode. A bad frame never aborts the rest of the
/// buffer; callers get an `Err` entry in the output sequence and move on.
/// Unknown codes are not errors, they route to the fallback decoder.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{code}: payload has no field at index {index}")]
    MissingField { code: &'static str, index: usize },
    #[error("{code}: expected {expected} fields, got {actual}")]
    FieldCountMismatch {
        code: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{code}: invalid integer in field {index}")]
    InvalidInteger {
        code: &'static str,
        index: usize,
        #[source]
        source: std::num::ParseIntError,
    },
}
