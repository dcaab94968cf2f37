//! Shared test double: a scripted in-memory stream.
//!
//! Reads are served from a pre-loaded reply script, at most `max_chunk`
//! bytes at a time so tests can exercise partial-read buffering; writes
//! are captured for inspection.

#![allow(dead_code)]

use std::io::{self, Read, Write};

pub struct TestStream {
    input: Vec<u8>,
    pos: usize,
    max_chunk: usize,

    /// Everything the code under test has written
    pub written: Vec<u8>,
}

impl TestStream {
    /// Stream serving `input`, with reads as large as the caller's buffer
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        Self::with_chunk(input, usize::MAX)
    }

    /// Stream serving `input` at most `max_chunk` bytes per read call
    pub fn with_chunk(input: impl Into<Vec<u8>>, max_chunk: usize) -> Self {
        assert!(max_chunk > 0);
        Self {
            input: input.into(),
            pos: 0,
            max_chunk,
            written: Vec::new(),
        }
    }
}

impl Read for TestStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.input.len() - self.pos;
        let n = remaining.min(buf.len()).min(self.max_chunk);
        buf[..n].copy_from_slice(&self.input[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

impl Write for TestStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
