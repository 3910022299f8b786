//! Blocking frame reader for transports that only offer `BufRead`.
use std::io::{self, BufRead};

use protocol::{DebugMessage, DecodeError};

use crate::FRAME_TERMINATOR;

pub trait Reader<R> {
    fn new(input: R) -> Self;
    fn poll_message(&mut self) -> eyre::Result<Option<Result<DebugMessage, DecodeError>>>;
}

pub struct FrameReader<R> {
    input: R,
}

impl<R> Reader<R> for FrameReader<R>
where
    R: BufRead,
{
    fn new(input: R) -> Self {
        Self { input }
    }

    /// Block until one complete frame arrives and decode it. `None` on a
    /// clean end of stream; data left unterminated at the end of the stream
    /// is decoded as a final frame.
    fn poll_message(&mut self) -> eyre::Result<Option<Result<DebugMessage, DecodeError>>> {
        let mut buffer = Vec::new();

        loop {
            let read = match self.input.read_until(FRAME_TERMINATOR, &mut buffer) {
                Ok(read) => read,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => continue,
                Err(e) => return Err(eyre::eyre!("error reading from transport: {e:?}")),
            };

            if read == 0 && buffer.is_empty() {
                return Ok(None);
            }

            if buffer.last() == Some(&FRAME_TERMINATOR) {
                buffer.pop();
            }

            // consecutive terminators produce empty frames; skip them
            if buffer.is_empty() {
                continue;
            }

            let text = String::from_utf8_lossy(&buffer);
            return Ok(Some(protocol::decode_frame(&text)));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufReader, Write};
    use std::net::{TcpListener, TcpStream};

    use eyre::WrapErr;
    use protocol::DebugMessage;

    use super::{FrameReader, Reader};

    fn get_random_tcp_port() -> eyre::Result<u16> {
        let listener = TcpListener::bind("127.0.0.1:0").wrap_err("binding to address")?;
        Ok(listener.local_addr()?.port())
    }

    #[test]
    fn frames_over_tcp() -> eyre::Result<()> {
        let port = get_random_tcp_port()?;
        let server = TcpListener::bind(format!("127.0.0.1:{port}")).wrap_err("binding")?;
        let mut client =
            TcpStream::connect(format!("127.0.0.1:{port}")).wrap_err("connecting")?;
        let (conn, _) = server.accept().wrap_err("accepting connection")?;

        let mut reader = FrameReader::new(BufReader::new(conn));

        // deliver the first frame split across two writes
        write!(&mut client, "MSG_LISTING;file.p;;;;0")?;
        write!(&mut client, ";12\0\0MSG_STATUS\0")?;
        drop(client);

        let msg = reader
            .poll_message()?
            .expect("a frame")
            .expect("a well-formed frame");
        let DebugMessage::Listing(listing) = msg else {
            panic!("expected listing, got {msg:?}");
        };
        assert_eq!(listing.stopped_at_line, 12);

        let msg = reader
            .poll_message()?
            .expect("a frame")
            .expect("a well-formed frame");
        assert_eq!(msg.code(), "MSG_STATUS");

        assert!(reader.poll_message()?.is_none());

        Ok(())
    }

    #[test]
    fn unterminated_tail_is_a_final_frame() -> eyre::Result<()> {
        let data = b"MSG_STATUS\0MSG_INFO;ready";
        let mut reader = FrameReader::new(&data[..]);

        assert_eq!(
            reader.poll_message()?.unwrap().unwrap().code(),
            "MSG_STATUS"
        );
        assert_eq!(reader.poll_message()?.unwrap().unwrap().code(), "MSG_INFO");
        assert!(reader.poll_message()?.is_none());

        Ok(())
    }

    #[test]
    fn empty_stream_yields_nothing() -> eyre::Result<()> {
        let mut reader = FrameReader::new(&b""[..]);
        assert!(reader.poll_message()?.is_none());
        Ok(())
    }
}
