//! Protocol Module
//!
//! Encoding and parsing for the memcached text protocol.
//!
//! ## Wire Format
//!
//! ### Requests
//! ```text
//! get <key> [<key> ...]\r\n
//! gets <key> [<key> ...]\r\n
//! <set|add|replace|append|prepend> <key> <flags> <exptime> <len>[ noreply]\r\n<value>\r\n
//! cas <key> <flags> <exptime> <len> <cas>[ noreply]\r\n<value>\r\n
//! <incr|decr> <key> <delta>[ noreply]\r\n
//! delete <key>[ noreply]\r\n
//! touch <key> <exptime>[ noreply]\r\n
//! flush_all[ <delay>][ noreply]\r\n
//! stats\r\n  version\r\n  quit\r\n
//! ```
//!
//! `<len>` is the exact byte length of `<value>`; the value is binary-safe
//! and may contain CR LF sequences.
//!
//! ### Replies
//! ```text
//! STORED\r\n  NOT_STORED\r\n  EXISTS\r\n  NOT_FOUND\r\n
//! DELETED\r\n  TOUCHED\r\n  OK\r\n
//! VALUE <key> <flags> <len>[ <cas>]\r\n<value>\r\n ... END\r\n
//! STAT <name> <value>\r\n ... END\r\n
//! VERSION <v>\r\n
//! ERROR\r\n  CLIENT_ERROR <msg>\r\n  SERVER_ERROR <msg>\r\n
//! ```

mod item;
mod request;
mod response;

pub use item::{Item, ItemMap, OrderedMap, Stats};
pub use request::{
    arithmetic_request, delete_request, flush_all_request, quit_request, retrieval_request,
    stats_request, storage_request, touch_request, version_request,
};
pub use response::{
    classify_reply, parse_numeric_line, parse_stat_line, parse_value_header, parse_version_line,
    ValueHeader, DELETED_LINE, END_LINE, OK_LINE, STORED_LINE, TOUCHED_LINE,
};
