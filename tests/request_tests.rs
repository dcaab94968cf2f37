//! Request Encoding Tests
//!
//! Wire-format verification for every command family.

use memtext::protocol::{
    arithmetic_request, delete_request, flush_all_request, quit_request, retrieval_request,
    stats_request, storage_request, touch_request, version_request,
};

// =============================================================================
// Retrieval family
// =============================================================================

#[test]
fn test_get_single_key() {
    assert_eq!(retrieval_request("get", &["a"]), b"get a\r\n");
}

#[test]
fn test_get_multiple_keys_space_joined() {
    assert_eq!(retrieval_request("get", &["a", "b", "c"]), b"get a b c\r\n");
}

#[test]
fn test_gets_variant() {
    assert_eq!(retrieval_request("gets", &["k1", "k2"]), b"gets k1 k2\r\n");
}

// =============================================================================
// Storage family
// =============================================================================

#[test]
fn test_set_header_and_payload() {
    let request = storage_request("set", "key", 5, 3600, b"hello", None, false);
    assert_eq!(request, b"set key 5 3600 5\r\nhello\r\n");
}

#[test]
fn test_set_noreply() {
    let request = storage_request("set", "key", 0, 0, b"hi", None, true);
    assert_eq!(request, b"set key 0 0 2 noreply\r\nhi\r\n");
}

#[test]
fn test_cas_token_precedes_noreply() {
    let request = storage_request("cas", "key", 0, 0, b"abc", Some(42), true);
    assert_eq!(request, b"cas key 0 0 3 42 noreply\r\nabc\r\n");
}

#[test]
fn test_cas_without_noreply() {
    let request = storage_request("cas", "key", 0, 0, b"abc", Some(7), false);
    assert_eq!(request, b"cas key 0 0 3 7\r\nabc\r\n");
}

#[test]
fn test_declared_length_counts_bytes_exactly() {
    // Embedded CR LF bytes are sent raw and counted, never escaped
    let request = storage_request("set", "k", 0, 0, b"ab\r\ncd", None, false);
    assert_eq!(request, b"set k 0 0 6\r\nab\r\ncd\r\n");
}

#[test]
fn test_empty_value() {
    let request = storage_request("set", "k", 0, 0, b"", None, false);
    assert_eq!(request, b"set k 0 0 0\r\n\r\n");
}

#[test]
fn test_append_and_prepend_verbs() {
    assert_eq!(
        storage_request("append", "k", 0, 0, b"x", None, false),
        b"append k 0 0 1\r\nx\r\n"
    );
    assert_eq!(
        storage_request("prepend", "k", 0, 0, b"x", None, false),
        b"prepend k 0 0 1\r\nx\r\n"
    );
}

// =============================================================================
// Arithmetic family
// =============================================================================

#[test]
fn test_incr() {
    assert_eq!(arithmetic_request("incr", "hits", 1, false), b"incr hits 1\r\n");
}

#[test]
fn test_decr_noreply() {
    assert_eq!(
        arithmetic_request("decr", "hits", 5, true),
        b"decr hits 5 noreply\r\n"
    );
}

// =============================================================================
// Simple commands
// =============================================================================

#[test]
fn test_delete() {
    assert_eq!(delete_request("k", false), b"delete k\r\n");
    assert_eq!(delete_request("k", true), b"delete k noreply\r\n");
}

#[test]
fn test_touch() {
    assert_eq!(touch_request("k", 300, false), b"touch k 300\r\n");
    assert_eq!(touch_request("k", 0, true), b"touch k 0 noreply\r\n");
}

#[test]
fn test_flush_all() {
    assert_eq!(flush_all_request(None, false), b"flush_all\r\n");
    assert_eq!(flush_all_request(Some(60), false), b"flush_all 60\r\n");
    assert_eq!(flush_all_request(Some(60), true), b"flush_all 60 noreply\r\n");
    assert_eq!(flush_all_request(None, true), b"flush_all noreply\r\n");
}

#[test]
fn test_fixed_headers() {
    assert_eq!(stats_request(), b"stats\r\n");
    assert_eq!(version_request(), b"version\r\n");
    assert_eq!(quit_request(), b"quit\r\n");
}

#[test]
fn test_no_trailing_space_when_options_absent() {
    // Optional tokens must not leave a dangling separator
    for request in [
        delete_request("k", false),
        arithmetic_request("incr", "k", 1, false),
        storage_request("set", "k", 0, 0, b"v", None, false),
    ] {
        let header_end = request.windows(2).position(|w| w == b"\r\n").unwrap();
        assert_ne!(request[header_end - 1], b' ');
    }
}
