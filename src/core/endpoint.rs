//! Remote endpoint description.
//!
//! An [`Endpoint`] is an address/port pair with a fixed address capacity of
//! [`NETWORK_ADDR_LEN`] bytes. Construction is checked: an address that does
//! not fit is either rejected ([`Endpoint::new`]) or truncated on purpose with
//! the truncation reported ([`Endpoint::truncating`]).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::constants::NETWORK_ADDR_LEN;

/// Errors building an [`Endpoint`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// Address does not fit in the endpoint buffer.
    #[error("address is {len} bytes, capacity is {max}")]
    AddressTooLong {
        /// Length of the rejected address.
        len: usize,
        /// Address capacity.
        max: usize,
    },

    /// Address is empty.
    #[error("empty address")]
    EmptyAddress,

    /// `host:port` text could not be split or the port is not a number.
    #[error("malformed endpoint: {0}")]
    Malformed(String),
}

/// A remote datagram peer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    addr: String,
    port: u16,
}

impl Endpoint {
    /// Create an endpoint, rejecting addresses longer than [`NETWORK_ADDR_LEN`].
    pub fn new(addr: impl Into<String>, port: u16) -> Result<Self, EndpointError> {
        let addr = addr.into();
        if addr.is_empty() {
            return Err(EndpointError::EmptyAddress);
        }
        if addr.len() > NETWORK_ADDR_LEN {
            return Err(EndpointError::AddressTooLong {
                len: addr.len(),
                max: NETWORK_ADDR_LEN,
            });
        }
        Ok(Self { addr, port })
    }

    /// Create an endpoint, cutting the address down to [`NETWORK_ADDR_LEN`]
    /// bytes if needed.
    ///
    /// The cut lands on a character boundary. The returned flag is `true`
    /// when bytes were dropped.
    pub fn truncating(addr: &str, port: u16) -> (Self, bool) {
        let mut end = addr.len().min(NETWORK_ADDR_LEN);
        while !addr.is_char_boundary(end) {
            end -= 1;
        }
        let truncated = end < addr.len();
        let endpoint = Self {
            addr: addr[..end].to_owned(),
            port,
        };
        (endpoint, truncated)
    }

    /// The address text (IP literal or host name).
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// The port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// `(host, port)` pair suitable for name resolution.
    pub fn to_host_port(&self) -> (&str, u16) {
        (&self.addr, self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.addr.contains(':') {
            write!(f, "[{}]:{}", self.addr, self.port)
        } else {
            write!(f, "{}:{}", self.addr, self.port)
        }
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    /// Parse `host:port` or `[v6addr]:port`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| EndpointError::Malformed(s.to_owned()))?;
        let host = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host);
        let port = port
            .parse::<u16>()
            .map_err(|_| EndpointError::Malformed(s.to_owned()))?;
        Self::new(host, port)
    }
}
