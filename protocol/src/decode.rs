//! Frame splitting, code extraction and the per-kind field decoders.
//!
//! Every message kind has its own positional layout: which field means what is
//! fixed by index, and in two kinds the meaning of a field depends on the
//! value of an earlier one. Each kind therefore gets a dedicated decoder
//! function, wired up through [`DECODERS`] so that adding a kind is one table
//! entry plus its function.
use std::num::ParseIntError;
use std::str::FromStr;

use crate::error::DecodeError;
use crate::messages::{
    ArrayMessage, ClassInfoMessage, DebugMessage, GenericMessage, ListingBreakpoint,
    ListingMessage, ParametersMessage, VariablesMessage, MSG_ARRAY, MSG_CLASSINFO, MSG_LISTING,
    MSG_PARAMETERS, MSG_VARIABLES,
};
use crate::types::{Variable, VariableKind};

const FRAME_TERMINATOR: char = '\0';
const FIELD_SEPARATOR: char = ';';
const RECORD_SEPARATOR: char = '\n';

type DecoderFn = fn(&str) -> Result<DebugMessage, DecodeError>;

const DECODERS: &[(&str, DecoderFn)] = &[
    (MSG_LISTING, decode_listing),
    (MSG_CLASSINFO, decode_classinfo),
    (MSG_VARIABLES, decode_variables),
    (MSG_ARRAY, decode_array),
    (MSG_PARAMETERS, decode_parameters),
];

/// Decode a buffer of complete NUL-terminated frames into the messages it
/// carries, in wire order. Empty frames are dropped; a malformed frame yields
/// an `Err` entry without stopping the frames after it.
///
/// The caller is responsible for handing over complete frames: a transport
/// that delivers data in arbitrary chunks must buffer until the terminator
/// arrives (see the `abl-codec` crate).
pub fn decode(data: &[u8]) -> Vec<Result<DebugMessage, DecodeError>> {
    let text = String::from_utf8_lossy(data);
    text.split(FRAME_TERMINATOR)
        .filter(|frame| !frame.is_empty())
        .map(decode_frame)
        .collect()
}

/// Decode a single frame (no terminator).
pub fn decode_frame(frame: &str) -> Result<DebugMessage, DecodeError> {
    let Some((code, payload)) = frame.split_once(FIELD_SEPARATOR) else {
        // no separator at all: the whole frame is the code
        return Ok(DebugMessage::Generic(GenericMessage {
            code: frame.to_owned(),
            args: Vec::new(),
        }));
    };

    match DECODERS.iter().find(|(known, _)| *known == code) {
        Some((_, decoder)) => decoder(payload),
        None => {
            tracing::debug!(%code, "no dedicated decoder for code, using fallback");
            Ok(DebugMessage::Generic(GenericMessage {
                code: code.to_owned(),
                args: split_records(payload),
            }))
        }
    }
}

fn split_records(payload: &str) -> Vec<Vec<String>> {
    payload
        .split(RECORD_SEPARATOR)
        .filter(|record| !record.is_empty())
        .map(|record| {
            record
                .split(FIELD_SEPARATOR)
                .map(str::to_owned)
                .collect()
        })
        .collect()
}

fn parse_int<T>(code: &'static str, fields: &[&str], index: usize) -> Result<T, DecodeError>
where
    T: FromStr<Err = ParseIntError>,
{
    fields[index]
        .parse()
        .map_err(|source| DecodeError::InvalidInteger {
            code,
            index,
            source,
        })
}

/// `MSG_LISTING`: strictly positional, empty fields kept. Field 0 is the
/// source path, 4 the breakpoint count, 5 the stopped-at line, then one
/// (line, id) pair per breakpoint from field 6 on.
fn decode_listing(payload: &str) -> Result<DebugMessage, DecodeError> {
    let fields: Vec<&str> = payload.split(FIELD_SEPARATOR).collect();
    if fields.len() < 6 {
        return Err(DecodeError::MissingField {
            code: MSG_LISTING,
            index: 5,
        });
    }

    let breakpoint_count: usize = parse_int(MSG_LISTING, &fields, 4)?;
    let stopped_at_line: u32 = parse_int(MSG_LISTING, &fields, 5)?;

    // the count is wire data; it can be absurd enough to overflow
    let expected = breakpoint_count
        .checked_mul(2)
        .and_then(|pairs| pairs.checked_add(6))
        .unwrap_or(usize::MAX);
    if fields.len() < expected {
        return Err(DecodeError::FieldCountMismatch {
            code: MSG_LISTING,
            expected,
            actual: fields.len(),
        });
    }

    let breakpoints = (0..breakpoint_count)
        .map(|idx| ListingBreakpoint {
            line: fields[6 + idx * 2].to_owned(),
            id: fields[6 + idx * 2 + 1].to_owned(),
        })
        .collect();

    Ok(DebugMessage::Listing(ListingMessage {
        file: fields[0].to_owned(),
        stopped_at_line,
        breakpoint_count,
        breakpoints,
    }))
}

/// `MSG_CLASSINFO`: newlines are noise here, and empty fields are dropped
/// before indexing. Field 3 says ('Y'/other) whether field 4 carries a base
/// class name; from field 5 on, properties come in groups of six.
fn decode_classinfo(payload: &str) -> Result<DebugMessage, DecodeError> {
    let payload = payload.replace(RECORD_SEPARATOR, "");
    let fields: Vec<&str> = payload
        .split(FIELD_SEPARATOR)
        .filter(|field| !field.is_empty())
        .collect();
    if fields.len() < 4 {
        return Err(DecodeError::MissingField {
            code: MSG_CLASSINFO,
            index: 3,
        });
    }

    let base_class = if fields[3] == "Y" {
        let name = fields.get(4).ok_or(DecodeError::MissingField {
            code: MSG_CLASSINFO,
            index: 4,
        })?;
        Some((*name).to_owned())
    } else {
        None
    };

    let groups = fields.get(5..).unwrap_or_default();
    if groups.len() % 6 != 0 {
        tracing::debug!(
            trailing = groups.len() % 6,
            "dropping trailing partial property group"
        );
    }
    let properties = groups
        .chunks_exact(6)
        .map(|group| {
            // group[0] is the access level (P/V), group[3] and group[4] the
            // read/write mode; neither is surfaced
            Variable {
                name: group[1].to_owned(),
                type_name: group[2].to_owned(),
                kind: VariableKind::classify(group[2]),
                value: group[5].to_owned(),
                children: Vec::new(),
            }
        })
        .collect();

    Ok(DebugMessage::ClassInfo(ClassInfoMessage {
        base_class,
        properties,
    }))
}

/// `MSG_VARIABLES`: one record per line, at least seven fields each. The wire
/// marks the variable's nature structurally: field 2 is `?` unless the
/// variable is a class instance, and field 4 is the extent (a non-zero extent
/// makes it an array). The type-name table is not consulted here.
fn decode_variables(payload: &str) -> Result<DebugMessage, DecodeError> {
    let variables = payload
        .split(RECORD_SEPARATOR)
        .filter(|record| !record.is_empty())
        .map(decode_variable_record)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DebugMessage::Variables(VariablesMessage { variables }))
}

fn decode_variable_record(record: &str) -> Result<Variable, DecodeError> {
    let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
    if fields.len() < 7 {
        return Err(DecodeError::FieldCountMismatch {
            code: MSG_VARIABLES,
            expected: 7,
            actual: fields.len(),
        });
    }

    let (type_name, kind) = if fields[2] != "?" {
        (fields[2], VariableKind::Class)
    } else if fields[4] != "0" {
        (fields[1], VariableKind::Array)
    } else {
        (fields[1], VariableKind::Variable)
    };

    Ok(Variable {
        name: fields[0].to_owned(),
        type_name: type_name.to_owned(),
        kind,
        value: fields[6].to_owned(),
        children: Vec::new(),
    })
}

/// `MSG_ARRAY`: after a leading count field, each element occupies a group of
/// three fields of which only the third carries the value. The backend mixes a
/// DC2 control character into values; strip it.
fn decode_array(payload: &str) -> Result<DebugMessage, DecodeError> {
    let payload = payload.replace(RECORD_SEPARATOR, "");
    let values = payload
        .split(FIELD_SEPARATOR)
        .skip(3)
        .step_by(3)
        .map(|value| value.replace('\u{12}', ""))
        .collect();

    Ok(DebugMessage::Array(ArrayMessage { values }))
}

/// `MSG_PARAMETERS`: records shaped like `MSG_VARIABLES` but with fixed
/// semantics. Field 0 is the direction tag; the displayed name gets a
/// direction glyph for the three known tags. Every entry is a parameter, no
/// matter its type.
fn decode_parameters(payload: &str) -> Result<DebugMessage, DecodeError> {
    let parameters = payload
        .split(RECORD_SEPARATOR)
        .filter(|record| !record.is_empty())
        .map(decode_parameter_record)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DebugMessage::Parameters(ParametersMessage { parameters }))
}

fn decode_parameter_record(record: &str) -> Result<Variable, DecodeError> {
    let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
    if fields.len() < 6 {
        return Err(DecodeError::FieldCountMismatch {
            code: MSG_PARAMETERS,
            expected: 6,
            actual: fields.len(),
        });
    }

    let name = match fields[0] {
        "OUTPUT" => format!("\u{2190}{}", fields[1]),
        "INPUT" => format!("\u{2192}{}", fields[1]),
        "INPUT-OUTPUT" => format!("\u{2194}{}", fields[1]),
        _ => fields[1].to_owned(),
    };

    Ok(Variable {
        name,
        type_name: fields[2].to_owned(),
        kind: VariableKind::Parameter,
        value: fields[5].to_owned(),
        children: Vec::new(),
    })
}
