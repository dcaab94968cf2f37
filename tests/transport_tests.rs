//! Transport Buffer Tests
//!
//! Framing primitives over a scripted stream: line reads across partial
//! network reads, binary-safe exact reads, non-consuming lookahead, and
//! the pipelined write queue.

mod common;

use common::TestStream;
use memtext::transport::TransportBuffer;
use memtext::MemtextError;

// =============================================================================
// read_line
// =============================================================================

#[test]
fn test_read_line_includes_terminator() {
    let stream = TestStream::new(&b"STORED\r\n"[..]);
    let mut transport = TransportBuffer::new(stream);

    assert_eq!(transport.read_line().unwrap(), "STORED\r\n");
}

#[test]
fn test_read_line_retains_leftover_for_next_call() {
    // One network read may deliver more than one line's worth of bytes
    let stream = TestStream::new(&b"STORED\r\nDELETED\r\n"[..]);
    let mut transport = TransportBuffer::new(stream);

    assert_eq!(transport.read_line().unwrap(), "STORED\r\n");
    assert_eq!(transport.read_line().unwrap(), "DELETED\r\n");
}

#[test]
fn test_read_line_across_partial_reads() {
    // One byte per network read: the line must be assembled across calls
    let stream = TestStream::with_chunk(&b"VERSION 1.6.21\r\n"[..], 1);
    let mut transport = TransportBuffer::new(stream);

    assert_eq!(transport.read_line().unwrap(), "VERSION 1.6.21\r\n");
}

#[test]
fn test_read_line_bare_lf_is_not_a_terminator() {
    let stream = TestStream::new(&b"a\nb\r\n"[..]);
    let mut transport = TransportBuffer::new(stream);

    assert_eq!(transport.read_line().unwrap(), "a\nb\r\n");
}

#[test]
fn test_read_line_premature_close() {
    let stream = TestStream::new(&b"STOR"[..]);
    let mut transport = TransportBuffer::new(stream);

    let err = transport.read_line().unwrap_err();
    assert!(matches!(err, MemtextError::Io(_)));
}

#[test]
fn test_read_line_on_closed_connection() {
    let stream = TestStream::new(Vec::new());
    let mut transport = TransportBuffer::new(stream);

    assert!(matches!(
        transport.read_line().unwrap_err(),
        MemtextError::Io(_)
    ));
}

// =============================================================================
// read_exact
// =============================================================================

#[test]
fn test_read_exact_is_binary_safe() {
    // Embedded CR LF bytes are payload, not delimiters
    let stream = TestStream::new(&b"ab\r\ncd"[..]);
    let mut transport = TransportBuffer::new(stream);

    assert_eq!(transport.read_exact(6).unwrap(), b"ab\r\ncd");
}

#[test]
fn test_read_exact_leaves_following_bytes_buffered() {
    let stream = TestStream::new(&b"xyz\r\nEND\r\n"[..]);
    let mut transport = TransportBuffer::new(stream);

    assert_eq!(transport.read_exact(5).unwrap(), b"xyz\r\n");
    assert_eq!(transport.read_line().unwrap(), "END\r\n");
}

#[test]
fn test_read_exact_across_partial_reads() {
    let stream = TestStream::with_chunk(&b"0123456789"[..], 3);
    let mut transport = TransportBuffer::new(stream);

    assert_eq!(transport.read_exact(10).unwrap(), b"0123456789");
}

#[test]
fn test_read_exact_premature_close() {
    let stream = TestStream::new(&b"abc"[..]);
    let mut transport = TransportBuffer::new(stream);

    assert!(matches!(
        transport.read_exact(4).unwrap_err(),
        MemtextError::Io(_)
    ));
}

// =============================================================================
// peek_contains
// =============================================================================

#[test]
fn test_peek_match_without_consume() {
    let stream = TestStream::new(&b"END\r\n"[..]);
    let mut transport = TransportBuffer::new(stream);

    assert!(transport.peek_contains(b"END\r\n", false).unwrap());
    // The marker is still there for a normal read
    assert_eq!(transport.read_line().unwrap(), "END\r\n");
}

#[test]
fn test_peek_match_with_consume() {
    let stream = TestStream::new(&b"END\r\nVALUE a 0 1\r\n"[..]);
    let mut transport = TransportBuffer::new(stream);

    assert!(transport.peek_contains(b"END\r\n", true).unwrap());
    assert_eq!(transport.read_line().unwrap(), "VALUE a 0 1\r\n");
}

#[test]
fn test_peek_non_match_leaves_buffer_unchanged() {
    let stream = TestStream::new(&b"VALUE a 0 1\r\n"[..]);
    let mut transport = TransportBuffer::new(stream);

    assert!(!transport.peek_contains(b"END\r\n", true).unwrap());
    // A later read_line sees exactly the bytes it would have seen
    assert_eq!(transport.read_line().unwrap(), "VALUE a 0 1\r\n");
}

#[test]
fn test_peek_fills_across_partial_reads() {
    let stream = TestStream::with_chunk(&b"END\r\n"[..], 2);
    let mut transport = TransportBuffer::new(stream);

    assert!(transport.peek_contains(b"END\r\n", true).unwrap());
}

#[test]
fn test_peek_premature_close() {
    let stream = TestStream::new(&b"EN"[..]);
    let mut transport = TransportBuffer::new(stream);

    assert!(matches!(
        transport.peek_contains(b"END\r\n", false).unwrap_err(),
        MemtextError::Io(_)
    ));
}

// =============================================================================
// Write path and pipeline queue
// =============================================================================

#[test]
fn test_write_transmits_immediately() {
    let stream = TestStream::new(Vec::new());
    let mut transport = TransportBuffer::new(stream);

    transport.write(b"get a\r\n").unwrap();
    assert_eq!(transport.get_ref().written, b"get a\r\n");
}

#[test]
fn test_write_pipelined_defers_transmission() {
    let stream = TestStream::new(Vec::new());
    let mut transport = TransportBuffer::new(stream);

    transport.write_pipelined(b"set a 0 0 1 noreply\r\nx\r\n");
    transport.write_pipelined(b"set b 0 0 1 noreply\r\ny\r\n");

    assert!(transport.get_ref().written.is_empty());
    assert_eq!(transport.pending_len(), 2);
}

#[test]
fn test_flush_pipeline_transmits_in_queue_order() {
    let stream = TestStream::new(Vec::new());
    let mut transport = TransportBuffer::new(stream);

    transport.write_pipelined(b"delete a noreply\r\n");
    transport.write_pipelined(b"delete b noreply\r\n");
    transport.write_pipelined(b"delete c noreply\r\n");
    transport.flush_pipeline().unwrap();

    assert_eq!(
        transport.get_ref().written,
        b"delete a noreply\r\ndelete b noreply\r\ndelete c noreply\r\n"
    );
    assert_eq!(transport.pending_len(), 0);
}

#[test]
fn test_flush_pipeline_clears_queue() {
    let stream = TestStream::new(Vec::new());
    let mut transport = TransportBuffer::new(stream);

    transport.write_pipelined(b"quit\r\n");
    transport.flush_pipeline().unwrap();
    transport.flush_pipeline().unwrap();

    // Second flush is a no-op: nothing is transmitted twice
    assert_eq!(transport.get_ref().written, b"quit\r\n");
}

#[test]
fn test_flush_pipeline_empty_is_noop() {
    let stream = TestStream::new(Vec::new());
    let mut transport = TransportBuffer::new(stream);

    transport.flush_pipeline().unwrap();
    assert!(transport.get_ref().written.is_empty());
}

#[test]
fn test_interleaved_write_and_pipeline() {
    // Immediate writes bypass the queue entirely
    let stream = TestStream::new(Vec::new());
    let mut transport = TransportBuffer::new(stream);

    transport.write_pipelined(b"B");
    transport.write(b"A").unwrap();
    transport.flush_pipeline().unwrap();

    assert_eq!(transport.get_ref().written, b"AB");
}
