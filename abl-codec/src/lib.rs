//! Incremental frame assembly for the ABL debugger wire stream.
//!
//! The decode core in `protocol` wants complete NUL-terminated frames; a real
//! transport hands over arbitrary chunks. This crate bridges the two: an async
//! [`AblDecoder`] for `tokio_util::codec::FramedRead`, and a blocking
//! [`FrameReader`] for plain `BufRead` transports.
use bytes::Buf;
use protocol::{DebugMessage, DecodeError};
use tokio_util::codec::Decoder;

mod reader;

pub use reader::{FrameReader, Reader};

pub(crate) const FRAME_TERMINATOR: u8 = 0;

#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("reading from transport")]
    Io(#[from] std::io::Error),
}

/// Splits NUL-terminated frames off the buffered stream and decodes each one.
/// A frame that fails to decode is yielded as an `Err` item so the stream
/// survives it; only transport failures end the stream.
#[derive(Debug, Default)]
pub struct AblDecoder {}

impl Decoder for AblDecoder {
    type Item = Result<DebugMessage, DecodeError>;

    type Error = CodecError;

    fn decode(&mut self, src: &mut bytes::BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            // buffer until a complete frame is available
            let Some(pos) = src.iter().position(|&b| b == FRAME_TERMINATOR) else {
                return Ok(None);
            };

            let frame = src.split_to(pos);
            src.advance(1);

            // consecutive terminators produce empty frames; skip them
            if frame.is_empty() {
                continue;
            }

            let text = String::from_utf8_lossy(&frame);
            return Ok(Some(protocol::decode_frame(&text)));
        }
    }
}
