//! Response parsing
//!
//! Structured field extraction from reply lines, plus classification of
//! non-success lines into the error taxonomy. Parsers take the full line
//! as returned by the transport, trailing CR LF included.

use crate::error::MemtextError;

/// Storage-family success line
pub const STORED_LINE: &str = "STORED\r\n";

/// Deletion success line
pub const DELETED_LINE: &str = "DELETED\r\n";

/// Touch success line
pub const TOUCHED_LINE: &str = "TOUCHED\r\n";

/// Flush success line
pub const OK_LINE: &str = "OK\r\n";

/// End-of-batch sentinel for retrieval and stats replies
pub const END_LINE: &str = "END\r\n";

/// Parsed fields of a `VALUE <key> <flags> <len>[ <cas>]` header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueHeader {
    pub key: String,
    pub flags: u32,
    pub bytelen: usize,
    pub cas_unique: Option<u64>,
}

/// Parse an item header line for the active retrieval variant.
///
/// `with_cas` selects the `gets` form, which carries a trailing cas token.
/// Returns `None` when the line is not an item header (wrong leading token,
/// wrong field count, or non-numeric fields).
pub fn parse_value_header(line: &str, with_cas: bool) -> Option<ValueHeader> {
    let body = line.strip_suffix("\r\n")?;
    let fields: Vec<&str> = body.split(' ').collect();

    let expected = if with_cas { 5 } else { 4 };
    if fields.len() != expected || fields[0] != "VALUE" || fields[1].is_empty() {
        return None;
    }

    let flags = fields[2].parse().ok()?;
    let bytelen = fields[3].parse().ok()?;
    let cas_unique = if with_cas {
        Some(fields[4].parse().ok()?)
    } else {
        None
    };

    Some(ValueHeader {
        key: fields[1].to_string(),
        flags,
        bytelen,
        cas_unique,
    })
}

/// Parse one `STAT <name> <value>` line; the value may contain spaces
pub fn parse_stat_line(line: &str) -> Option<(String, String)> {
    let body = line.strip_suffix("\r\n")?;
    let mut fields = body.splitn(3, ' ');

    if fields.next()? != "STAT" {
        return None;
    }
    let name = fields.next()?;
    let value = fields.next().unwrap_or("");

    Some((name.to_string(), value.trim().to_string()))
}

/// Parse a `VERSION <v>` line, returning the trimmed version string
pub fn parse_version_line(line: &str) -> Option<String> {
    let rest = line.strip_prefix("VERSION ")?;
    Some(rest.trim().to_string())
}

/// Parse an arithmetic success line: a bare decimal integer
pub fn parse_numeric_line(line: &str) -> Option<u64> {
    line.trim().parse().ok()
}

/// Classify a non-success reply line into an error kind.
///
/// `CLIENT_ERROR` and `SERVER_ERROR` carry the remainder of the line as
/// the message; the bare status tokens carry the caller-supplied context.
/// A line matching no known token is a fatal `Protocol` error: the parser
/// and the connection can no longer be trusted to agree on byte boundaries.
pub fn classify_reply(line: &str, context: &str) -> MemtextError {
    if let Some(msg) = line.strip_prefix("CLIENT_ERROR") {
        return MemtextError::Client(msg.trim().to_string());
    }
    if let Some(msg) = line.strip_prefix("SERVER_ERROR") {
        return MemtextError::Server(msg.trim().to_string());
    }

    match line.trim() {
        "ERROR" => MemtextError::Server(context.to_string()),
        "EXISTS" => MemtextError::Exists(context.to_string()),
        "NOT_FOUND" => MemtextError::NotFound(context.to_string()),
        "NOT_STORED" => MemtextError::NotStored(context.to_string()),
        _ => MemtextError::Protocol(format!("unexpected reply line {:?} ({})", line, context)),
    }
}
