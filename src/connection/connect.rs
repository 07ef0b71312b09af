use std::io::Cursor;

use bytes::{Buf, BytesMut};
use log::debug;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;

use crate::connection::frame::Frame;
use crate::error::{StoreConnectionError, StoreParseError};

/// Send and receive `Frame` values from a remote peer.
///
/// The byte level protocol parsing details are kept here so the client and
/// the server can work with whole frames. Reads go through an in-memory
/// buffer; once a full frame is buffered it is parsed and the bytes are
/// discarded. Writes go through a `BufWriter` and are flushed per frame.
#[derive(Debug)]
pub(crate) struct Connection {
    stream: BufWriter<TcpStream>,

    /// The buffer for reading frames.
    buffer: BytesMut,
}

impl Connection {
    /// Create a new `Connection`, backed by `socket`. Read and write buffers
    /// are initialized.
    pub(crate) fn new(socket: TcpStream) -> Connection {
        Connection {
            stream: BufWriter::new(socket),
            // 4KB is enough for the values the store deals with. Larger
            // frames grow the buffer.
            buffer: BytesMut::with_capacity(4 * 1024),
        }
    }

    /// Read a single `Frame` value from the underlying stream.
    ///
    /// Waits until enough data has been received to parse a whole frame.
    /// Returns `None` if the peer closed the socket cleanly, and
    /// `Disconnect` if it closed the socket in the middle of a frame.
    pub(crate) async fn read_frame(&mut self) -> Result<Option<Frame>, StoreConnectionError> {
        loop {
            if let Some(frame) = self.parse_frame()? {
                return Ok(Some(frame));
            }

            // `0` indicates "end of stream".
            if 0 == self.stream.read_buf(&mut self.buffer).await? {
                return if self.buffer.is_empty() {
                    Ok(None)
                } else {
                    Err(StoreConnectionError::Disconnect)
                };
            }
        }
    }

    /// Tries to parse a frame from the buffer. Returns `None` when the buffer
    /// does not hold a complete frame yet.
    fn parse_frame(&mut self) -> Result<Option<Frame>, StoreConnectionError> {
        let mut buf = Cursor::new(&self.buffer[..]);

        match Frame::check(&mut buf) {
            Ok(_) => {
                // `check` advanced the cursor to the end of the frame.
                let len = buf.position() as usize;

                buf.set_position(0);
                let frame = Frame::parse(&mut buf)?;

                self.buffer.advance(len);

                Ok(Some(frame))
            }
            Err(StoreParseError::Incomplete) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write a single `Frame` value to the underlying stream and flush it.
    pub(crate) async fn write_frame(&mut self, frame: &Frame) -> Result<(), StoreConnectionError> {
        let mut out = Vec::new();
        frame.encode(&mut out);

        debug!("write frame: {} bytes", out.len());

        self.stream.write_all(&out).await?;
        self.stream.flush().await?;

        Ok(())
    }

    /// Flushes pending writes and shuts the write half of the socket down.
    pub(crate) async fn shutdown(&mut self) -> Result<(), StoreConnectionError> {
        self.stream.flush().await?;
        self.stream.get_mut().shutdown().await?;
        Ok(())
    }
}
