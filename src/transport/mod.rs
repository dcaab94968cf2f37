//! Transport Module
//!
//! Framing primitives over a single ordered byte connection.
//!
//! The transport has no protocol knowledge: it only knows how to deliver
//! whole lines, exact byte counts, and lookahead over a buffered stream,
//! and how to queue fully framed writes for a later flush.

mod buffer;

pub use buffer::TransportBuffer;
