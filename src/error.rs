//! Error types for memtext
//!
//! A closed taxonomy of error kinds derived from the server's one-line
//! status replies, plus transport and protocol failures.

use thiserror::Error;

/// Result type alias using MemtextError
pub type Result<T> = std::result::Result<T, MemtextError>;

/// Unified error type for memtext operations
#[derive(Debug, Error)]
pub enum MemtextError {
    // -------------------------------------------------------------------------
    // Server reply classifications
    // -------------------------------------------------------------------------
    /// Reply began with `CLIENT_ERROR`; carries the remainder of the line
    #[error("client error: {0}")]
    Client(String),

    /// Reply began with `SERVER_ERROR`, or was the bare `ERROR` token
    #[error("server error: {0}")]
    Server(String),

    /// Reply was `EXISTS` (CAS conflict: the item changed since `gets`)
    #[error("key exists: {0}")]
    Exists(String),

    /// Reply was `NOT_FOUND`, or a single-key retrieval returned no item
    #[error("not found: {0}")]
    NotFound(String),

    /// Reply was `NOT_STORED`
    #[error("not stored: {0}")]
    NotStored(String),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// Connection closed unexpectedly or I/O failure during a read/write.
    /// The connection is in an undefined state and must be discarded.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// Reply matched no expected token and no known error token.
    /// Fatal: indicates a parser/protocol mismatch on this connection.
    #[error("protocol error: {0}")]
    Protocol(String),
}
