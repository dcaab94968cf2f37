//! Request encoding
//!
//! Builds fully framed request bytes for each command family. Headers are
//! single ASCII lines of space-joined tokens terminated by CR LF; storage
//! requests append the raw value bytes plus a trailing CR LF. Framing is
//! complete before the bytes are handed to the transport, so pipelining a
//! request never delays its encoding.

/// Line terminator for command headers and payloads
const CRLF: &[u8] = b"\r\n";

/// Join tokens into a CR LF terminated header line
fn header_line(tokens: &[&str]) -> Vec<u8> {
    let mut line = tokens.join(" ").into_bytes();
    line.extend_from_slice(CRLF);
    line
}

/// Encode a retrieval request: `get`/`gets` with one or more keys
pub fn retrieval_request(verb: &str, keys: &[&str]) -> Vec<u8> {
    let mut tokens = Vec::with_capacity(1 + keys.len());
    tokens.push(verb);
    tokens.extend_from_slice(keys);
    header_line(&tokens)
}

/// Encode a storage request: `set`/`add`/`replace`/`append`/`prepend`/`cas`.
///
/// The declared byte length is exactly `value.len()`; the value itself is
/// sent raw, unescaped, followed by a CR LF that is not part of the value.
pub fn storage_request(
    verb: &str,
    key: &str,
    flags: u32,
    exptime: u32,
    value: &[u8],
    cas_unique: Option<u64>,
    noreply: bool,
) -> Vec<u8> {
    let flags = flags.to_string();
    let exptime = exptime.to_string();
    let bytelen = value.len().to_string();

    let mut tokens = vec![verb, key, flags.as_str(), exptime.as_str(), bytelen.as_str()];
    let cas;
    if let Some(token) = cas_unique {
        cas = token.to_string();
        tokens.push(cas.as_str());
    }
    if noreply {
        tokens.push("noreply");
    }

    let mut request = header_line(&tokens);
    request.reserve(value.len() + CRLF.len());
    request.extend_from_slice(value);
    request.extend_from_slice(CRLF);
    request
}

/// Encode an arithmetic request: `incr`/`decr`
pub fn arithmetic_request(verb: &str, key: &str, delta: u64, noreply: bool) -> Vec<u8> {
    let delta = delta.to_string();
    let mut tokens = vec![verb, key, delta.as_str()];
    if noreply {
        tokens.push("noreply");
    }
    header_line(&tokens)
}

/// Encode a `delete` request
pub fn delete_request(key: &str, noreply: bool) -> Vec<u8> {
    let mut tokens = vec!["delete", key];
    if noreply {
        tokens.push("noreply");
    }
    header_line(&tokens)
}

/// Encode a `touch` request
pub fn touch_request(key: &str, exptime: u32, noreply: bool) -> Vec<u8> {
    let exptime = exptime.to_string();
    let mut tokens = vec!["touch", key, exptime.as_str()];
    if noreply {
        tokens.push("noreply");
    }
    header_line(&tokens)
}

/// Encode a `flush_all` request with an optional delay in seconds
pub fn flush_all_request(delay: Option<u32>, noreply: bool) -> Vec<u8> {
    let mut tokens = vec!["flush_all"];
    let delay_token;
    if let Some(seconds) = delay {
        delay_token = seconds.to_string();
        tokens.push(delay_token.as_str());
    }
    if noreply {
        tokens.push("noreply");
    }
    header_line(&tokens)
}

/// Encode a `stats` request
pub fn stats_request() -> Vec<u8> {
    header_line(&["stats"])
}

/// Encode a `version` request
pub fn version_request() -> Vec<u8> {
    header_line(&["version"])
}

/// Encode a `quit` request
pub fn quit_request() -> Vec<u8> {
    header_line(&["quit"])
}
