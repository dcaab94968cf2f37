//! Client
//!
//! Command methods over one connection: each call formats request bytes,
//! hands them to the transport (immediately, or queued when the request is
//! noreply-flagged and pipeline mode is on), then reads and parses the
//! reply on demand.
//!
//! Fully synchronous and single-threaded: a client instance must be
//! confined to one logical caller at a time. Requests deferred in pipeline
//! mode are not visible to the server until `flush_pipeline` is called, so
//! interleaving them with immediate requests reorders what the server sees.

use std::io::{Read, Write};

use crate::error::{MemtextError, Result};
use crate::protocol::{
    arithmetic_request, classify_reply, delete_request, flush_all_request, parse_numeric_line,
    parse_stat_line, parse_value_header, parse_version_line, quit_request, retrieval_request,
    stats_request, storage_request, touch_request, version_request, Item, ItemMap, Stats,
    DELETED_LINE, END_LINE, OK_LINE, STORED_LINE, TOUCHED_LINE,
};
use crate::transport::TransportBuffer;

/// Longest value prefix quoted in storage error messages
const VALUE_PREVIEW_LEN: usize = 10;

/// A memcached client bound to a single connection.
///
/// Generic over the stream so tests can drive it with an in-memory double;
/// `ClientParams::connect` produces a `Client<TcpStream>`.
pub struct Client<S> {
    /// Framing primitives over the connection
    transport: TransportBuffer<S>,

    /// Whether noreply requests are deferred until `flush_pipeline`
    pipeline_mode: bool,
}

impl<S: Read + Write> Client<S> {
    /// Wrap an already connected stream
    pub fn from_stream(stream: S, pipeline_mode: bool) -> Self {
        Self {
            transport: TransportBuffer::new(stream),
            pipeline_mode,
        }
    }

    /// Borrow the underlying stream
    pub fn get_ref(&self) -> &S {
        self.transport.get_ref()
    }

    /// Whether this client defers noreply requests
    pub fn pipeline_mode(&self) -> bool {
        self.pipeline_mode
    }

    // -------------------------------------------------------------------------
    // Retrieval family
    // -------------------------------------------------------------------------

    /// Retrieve a single item; a miss is a `NotFound` error
    pub fn get(&mut self, key: &str) -> Result<Item> {
        let mut items = self.get_multi(&[key])?;
        items
            .remove(key)
            .ok_or_else(|| MemtextError::NotFound(format!("the item with key {:?} was not found", key)))
    }

    /// Retrieve a single item with its CAS token; a miss is `NotFound`
    pub fn gets(&mut self, key: &str) -> Result<Item> {
        let mut items = self.gets_multi(&[key])?;
        items
            .remove(key)
            .ok_or_else(|| MemtextError::NotFound(format!("the item with key {:?} was not found", key)))
    }

    /// Retrieve several keys at once, in server reply order.
    ///
    /// Keys absent from the reply are simply omitted, never an error.
    pub fn get_multi(&mut self, keys: &[&str]) -> Result<ItemMap> {
        self.retrieval_family("get", false, keys)
    }

    /// CAS-aware variant of `get_multi`: items carry their cas token
    pub fn gets_multi(&mut self, keys: &[&str]) -> Result<ItemMap> {
        self.retrieval_family("gets", true, keys)
    }

    /// The core retrieval parse loop.
    ///
    /// The batch ends in one of two ways, and both must stay: the sentinel
    /// can arrive as the very first line (empty result, caught by the
    /// header-mismatch check) or directly after the last item's payload
    /// with no further header line (caught by the post-payload peek).
    /// Collapsing them either drops the last item or blocks waiting for a
    /// sentinel that was already consumed.
    fn retrieval_family(&mut self, verb: &str, with_cas: bool, keys: &[&str]) -> Result<ItemMap> {
        let request = retrieval_request(verb, keys);
        self.transport.write(&request)?;
        tracing::trace!("sent {} request for {} key(s)", verb, keys.len());

        let mut items = ItemMap::new();

        loop {
            let line = self.transport.read_line()?;
            let header = match parse_value_header(&line, with_cas) {
                Some(header) => header,
                None if line == END_LINE => break,
                None => {
                    return Err(classify_reply(
                        &line,
                        &format!("could not {} keys {:?}", verb, keys),
                    ))
                }
            };

            // Declared payload plus its trailing CR LF, which is framing,
            // not value bytes
            let mut value = self.transport.read_exact(header.bytelen + 2)?;
            value.truncate(header.bytelen);

            let key = header.key;
            items.insert(
                key.clone(),
                Item {
                    key,
                    flags: header.flags,
                    value,
                    cas_unique: header.cas_unique,
                },
            );

            if self.transport.peek_contains(END_LINE.as_bytes(), true)? {
                break;
            }
        }

        Ok(items)
    }

    // -------------------------------------------------------------------------
    // Storage family
    // -------------------------------------------------------------------------

    /// Store a value unconditionally
    pub fn set(
        &mut self,
        key: &str,
        value: &[u8],
        flags: u32,
        exptime: u32,
        noreply: bool,
    ) -> Result<()> {
        self.storage_family("set", key, value, flags, exptime, None, noreply)
    }

    /// Store only if the key does not exist yet
    pub fn add(
        &mut self,
        key: &str,
        value: &[u8],
        flags: u32,
        exptime: u32,
        noreply: bool,
    ) -> Result<()> {
        self.storage_family("add", key, value, flags, exptime, None, noreply)
    }

    /// Store only if the key already exists
    pub fn replace(
        &mut self,
        key: &str,
        value: &[u8],
        flags: u32,
        exptime: u32,
        noreply: bool,
    ) -> Result<()> {
        self.storage_family("replace", key, value, flags, exptime, None, noreply)
    }

    /// Append bytes to an existing value
    pub fn append(
        &mut self,
        key: &str,
        value: &[u8],
        flags: u32,
        exptime: u32,
        noreply: bool,
    ) -> Result<()> {
        self.storage_family("append", key, value, flags, exptime, None, noreply)
    }

    /// Prepend bytes to an existing value
    pub fn prepend(
        &mut self,
        key: &str,
        value: &[u8],
        flags: u32,
        exptime: u32,
        noreply: bool,
    ) -> Result<()> {
        self.storage_family("prepend", key, value, flags, exptime, None, noreply)
    }

    /// Store only if the item is unchanged since the `gets` that produced
    /// the cas token; a conflict is an `Exists` error
    pub fn cas(
        &mut self,
        key: &str,
        value: &[u8],
        flags: u32,
        exptime: u32,
        cas_unique: u64,
        noreply: bool,
    ) -> Result<()> {
        self.storage_family("cas", key, value, flags, exptime, Some(cas_unique), noreply)
    }

    fn storage_family(
        &mut self,
        verb: &str,
        key: &str,
        value: &[u8],
        flags: u32,
        exptime: u32,
        cas_unique: Option<u64>,
        noreply: bool,
    ) -> Result<()> {
        let request = storage_request(verb, key, flags, exptime, value, cas_unique, noreply);
        self.send(&request, noreply)?;

        if noreply {
            return Ok(());
        }

        let line = self.transport.read_line()?;
        if line == STORED_LINE {
            Ok(())
        } else {
            Err(classify_reply(
                &line,
                &format!(
                    "could not {} key {:?} to {:?}...",
                    verb,
                    key,
                    value_preview(value)
                ),
            ))
        }
    }

    // -------------------------------------------------------------------------
    // Arithmetic family
    // -------------------------------------------------------------------------

    /// Increment a counter, returning the new value (`None` under noreply)
    pub fn incr(&mut self, key: &str, delta: u64, noreply: bool) -> Result<Option<u64>> {
        self.arithmetic_family("incr", key, delta, noreply)
    }

    /// Decrement a counter, returning the new value (`None` under noreply)
    pub fn decr(&mut self, key: &str, delta: u64, noreply: bool) -> Result<Option<u64>> {
        self.arithmetic_family("decr", key, delta, noreply)
    }

    fn arithmetic_family(
        &mut self,
        verb: &str,
        key: &str,
        delta: u64,
        noreply: bool,
    ) -> Result<Option<u64>> {
        let request = arithmetic_request(verb, key, delta, noreply);
        self.send(&request, noreply)?;

        if noreply {
            return Ok(None);
        }

        let line = self.transport.read_line()?;
        match parse_numeric_line(&line) {
            Some(value) => Ok(Some(value)),
            None => Err(classify_reply(
                &line,
                &format!("could not {} key {:?}", verb, key),
            )),
        }
    }

    // -------------------------------------------------------------------------
    // Simple commands
    // -------------------------------------------------------------------------

    /// Delete a key; a miss is a `NotFound` error
    pub fn delete(&mut self, key: &str, noreply: bool) -> Result<()> {
        let request = delete_request(key, noreply);
        self.send(&request, noreply)?;

        if noreply {
            return Ok(());
        }
        self.expect_line(DELETED_LINE, &format!("could not delete key {:?}", key))
    }

    /// Update an item's expiry without touching its value
    pub fn touch(&mut self, key: &str, exptime: u32, noreply: bool) -> Result<()> {
        let request = touch_request(key, exptime, noreply);
        self.send(&request, noreply)?;

        if noreply {
            return Ok(());
        }
        self.expect_line(TOUCHED_LINE, &format!("could not touch key {:?}", key))
    }

    /// Invalidate all items, optionally after a delay in seconds
    pub fn flush_all(&mut self, delay: Option<u32>, noreply: bool) -> Result<()> {
        let request = flush_all_request(delay, noreply);
        self.send(&request, noreply)?;

        if noreply {
            return Ok(());
        }
        self.expect_line(OK_LINE, "could not perform flush_all")
    }

    /// Read the server's statistics into an ordered name-to-value mapping
    pub fn stats(&mut self) -> Result<Stats> {
        self.transport.write(&stats_request())?;

        let mut stats = Stats::new();
        loop {
            let line = self.transport.read_line()?;
            if line == END_LINE {
                break;
            }
            match parse_stat_line(&line) {
                Some((name, value)) => stats.insert(name, value),
                None => return Err(classify_reply(&line, "could not read stats")),
            }
        }

        Ok(stats)
    }

    /// Ask the server for its version string
    pub fn version(&mut self) -> Result<String> {
        self.transport.write(&version_request())?;

        let line = self.transport.read_line()?;
        parse_version_line(&line).ok_or_else(|| classify_reply(&line, "could not read version"))
    }

    /// Tell the server to drop the connection. No reply is read.
    pub fn quit(&mut self) -> Result<()> {
        self.transport.write(&quit_request())
    }

    // -------------------------------------------------------------------------
    // Pipeline control
    // -------------------------------------------------------------------------

    /// Transmit every queued noreply request, in the order it was issued
    pub fn flush_pipeline(&mut self) -> Result<()> {
        self.transport.flush_pipeline()
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Route a framed request: queued when it is noreply-flagged and
    /// pipeline mode is on, transmitted immediately otherwise
    fn send(&mut self, request: &[u8], noreply: bool) -> Result<()> {
        if noreply && self.pipeline_mode {
            self.transport.write_pipelined(request);
            Ok(())
        } else {
            self.transport.write(request)
        }
    }

    /// Read one reply line and require an exact success token
    fn expect_line(&mut self, expected: &str, context: &str) -> Result<()> {
        let line = self.transport.read_line()?;
        if line == expected {
            Ok(())
        } else {
            Err(classify_reply(&line, context))
        }
    }
}

/// A bounded, lossy preview of a value for error messages
fn value_preview(value: &[u8]) -> String {
    let cut = value.len().min(VALUE_PREVIEW_LEN);
    String::from_utf8_lossy(&value[..cut]).into_owned()
}
