//! # memtext
//!
//! A client for the memcached text protocol with:
//! - Buffered line/binary framing over a single TCP connection
//! - Binary-safe value payloads of exact declared length
//! - Deferred-write ("pipeline") mode for noreply requests
//! - A closed, classified error taxonomy for server replies
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Client                                │
//! │     (get/set families, incr/decr, delete, touch, ...)        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Protocol Codec                              │
//! │       (request encoding / reply parsing + classify)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Transport Buffer                             │
//! │   (read_line / read_exact / peek / write / pipeline queue)   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!                  TCP connection
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod transport;
pub mod protocol;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{MemtextError, Result};
pub use config::ClientParams;
pub use client::Client;
pub use protocol::{Item, ItemMap, OrderedMap, Stats};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of memtext
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
