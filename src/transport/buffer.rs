//! Transport Buffer
//!
//! Owns the raw byte connection and turns it into framing primitives:
//! whole lines, exact byte counts, and non-consuming lookahead. A single
//! network read may return less than one line or more than one line's
//! worth of bytes, so everything received-but-unread is retained in an
//! internal holding buffer across calls. Bytes are delivered to callers
//! exactly once, in transmission order.
//!
//! Separately from the receive path, fully framed request blocks can be
//! queued (`write_pipelined`) and transmitted later in FIFO order by an
//! explicit `flush_pipeline`.

use std::io::{self, Read, Write};

use bytes::{Buf, BytesMut};

use crate::error::{MemtextError, Result};

/// Chunk size for draining the underlying connection
const READ_CHUNK: usize = 4096;

/// Framing primitives over a single ordered byte stream.
///
/// Generic over the stream so tests can drive it with an in-memory
/// double; production wraps a `TcpStream`.
pub struct TransportBuffer<S> {
    /// The underlying connection
    stream: S,

    /// Received-but-unread bytes, held across calls
    recv: BytesMut,

    /// Framed request blocks awaiting `flush_pipeline`, in queue order
    pending: Vec<Vec<u8>>,
}

impl<S: Read + Write> TransportBuffer<S> {
    /// Wrap a connected stream
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            recv: BytesMut::with_capacity(READ_CHUNK),
            pending: Vec::new(),
        }
    }

    /// Borrow the underlying stream
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Consume the buffer, returning the underlying stream
    pub fn into_inner(self) -> S {
        self.stream
    }

    // -------------------------------------------------------------------------
    // Write path
    // -------------------------------------------------------------------------

    /// Send bytes immediately on the connection
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.stream.write_all(bytes)?;
        self.stream.flush()?;
        Ok(())
    }

    /// Queue fully framed bytes for a later `flush_pipeline`. No I/O.
    pub fn write_pipelined(&mut self, bytes: &[u8]) {
        self.pending.push(bytes.to_vec());
    }

    /// Transmit all queued blocks in queue order, then clear the queue.
    /// No-op (no I/O) when the queue is empty.
    pub fn flush_pipeline(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let queue = std::mem::take(&mut self.pending);
        tracing::trace!("flushing {} pipelined request block(s)", queue.len());

        for block in &queue {
            self.stream.write_all(block)?;
        }
        self.stream.flush()?;
        Ok(())
    }

    /// Number of request blocks currently queued
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    // -------------------------------------------------------------------------
    // Read path
    // -------------------------------------------------------------------------

    /// Read the next line up to and including CR LF, decoded as text.
    ///
    /// Bare LF is not a terminator. Bytes beyond the terminator stay in
    /// the holding buffer for subsequent calls.
    pub fn read_line(&mut self) -> Result<String> {
        let line = loop {
            if let Some(pos) = find_crlf(&self.recv) {
                break self.recv.split_to(pos + 2);
            }
            self.fill()?;
        };

        String::from_utf8(line.to_vec()).map_err(|_| {
            MemtextError::Protocol(format!("reply line is not valid UTF-8: {:?}", &line[..]))
        })
    }

    /// Read exactly `n` bytes, binary-safe: embedded CR LF sequences are
    /// ordinary payload bytes, not delimiters.
    pub fn read_exact(&mut self, n: usize) -> Result<Vec<u8>> {
        self.fill_to(n)?;
        Ok(self.recv.split_to(n).to_vec())
    }

    /// Check whether the next unread bytes equal `marker`.
    ///
    /// On a match with `consume` set, the marker bytes are removed. On a
    /// non-match the holding buffer is left byte-for-byte unchanged, so a
    /// later `read_line` sees exactly what it would have seen without the
    /// peek.
    pub fn peek_contains(&mut self, marker: &[u8], consume: bool) -> Result<bool> {
        self.fill_to(marker.len())?;

        if &self.recv[..marker.len()] == marker {
            if consume {
                self.recv.advance(marker.len());
            }
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Pull one nonempty chunk from the connection into the holding buffer
    fn fill(&mut self) -> Result<()> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match self.stream.read(&mut chunk) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "connection closed while awaiting reply data",
                    )
                    .into());
                }
                Ok(n) => {
                    self.recv.extend_from_slice(&chunk[..n]);
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Ensure at least `need` unread bytes are buffered
    fn fill_to(&mut self, need: usize) -> Result<()> {
        while self.recv.len() < need {
            self.fill()?;
        }
        Ok(())
    }
}

/// Position of the first CR LF pair, if any
fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|pair| pair == b"\r\n")
}
