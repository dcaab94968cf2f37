//! Client configuration
//!
//! Immutable connection parameters, used only to construct a client.

use std::net::TcpStream;
use std::time::Duration;

use crate::client::Client;
use crate::error::Result;

/// Parameters for constructing a client bound to one connection
#[derive(Debug, Clone)]
pub struct ClientParams {
    /// Server hostname or address
    pub host: String,

    /// Server port
    pub port: u16,

    /// When set, noreply requests are queued client-side until
    /// `flush_pipeline` instead of being transmitted immediately
    pub pipeline_mode: bool,

    /// Socket read timeout in milliseconds (0 = block indefinitely)
    pub read_timeout_ms: u64,

    /// Socket write timeout in milliseconds (0 = block indefinitely)
    pub write_timeout_ms: u64,
}

impl ClientParams {
    /// Parameters for the given server with defaults: no pipelining,
    /// no socket timeouts
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            pipeline_mode: false,
            read_timeout_ms: 0,
            write_timeout_ms: 0,
        }
    }

    /// Enable or disable pipeline mode
    pub fn pipeline_mode(mut self, enabled: bool) -> Self {
        self.pipeline_mode = enabled;
        self
    }

    /// Set the socket read timeout (in milliseconds, 0 disables)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.read_timeout_ms = ms;
        self
    }

    /// Set the socket write timeout (in milliseconds, 0 disables)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.write_timeout_ms = ms;
        self
    }

    /// Open the TCP connection and produce a ready client
    pub fn connect(&self) -> Result<Client<TcpStream>> {
        let stream = TcpStream::connect((self.host.as_str(), self.port))?;

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        if self.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(self.read_timeout_ms)))?;
        }
        if self.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(self.write_timeout_ms)))?;
        }

        tracing::debug!(
            "connected to {}:{} (pipeline_mode={})",
            self.host,
            self.port,
            self.pipeline_mode
        );

        Ok(Client::from_stream(stream, self.pipeline_mode))
    }
}
