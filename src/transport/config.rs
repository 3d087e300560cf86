//! Transport configuration.

use std::net::{IpAddr, SocketAddr};

use url::{Host, Url};

use crate::core::constants::{
    COAP_DEFAULT_PORT, COAP_MSG_MAX_PDU_LEN, COAP_SCHEME, COAPS_DEFAULT_PORT, COAPS_SCHEME,
};
use crate::core::{Endpoint, TransportError, TransportResult};

/// Delivery mode, fixed when the transport is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportMode {
    /// Plain UDP.
    Plain,
    /// DTLS over UDP.
    Secure,
}

impl TransportMode {
    /// Default port for this mode.
    pub fn default_port(self) -> u16 {
        match self {
            TransportMode::Plain => COAP_DEFAULT_PORT,
            TransportMode::Secure => COAPS_DEFAULT_PORT,
        }
    }
}

/// Transport configuration.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Plain or secure delivery.
    pub mode: TransportMode,

    /// Remote peer.
    pub remote: Endpoint,

    /// PEM-encoded CA certificate for verifying the server (secure mode).
    pub ca_cert_pem: Option<Vec<u8>>,

    /// Server name checked against the certificate (secure mode).
    pub host: Option<String>,

    /// Largest datagram payload read or written.
    pub max_pdu_len: usize,

    /// Local bind address. An ephemeral port is used when unset.
    pub local_addr: Option<SocketAddr>,
}

impl TransportConfig {
    /// Configuration with defaults for everything but mode and peer.
    pub fn new(mode: TransportMode, remote: Endpoint) -> Self {
        Self {
            mode,
            remote,
            ca_cert_pem: None,
            host: None,
            max_pdu_len: COAP_MSG_MAX_PDU_LEN,
            local_addr: None,
        }
    }

    /// Start a builder.
    pub fn builder() -> TransportConfigBuilder {
        TransportConfigBuilder::new()
    }

    /// Build a configuration from a `coap://` or `coaps://` URI.
    ///
    /// The scheme picks the mode and default port. Any path or query is
    /// ignored. For `coaps` with a host name (not an IP literal), the name
    /// is also used for certificate verification.
    pub fn from_uri(uri: &str) -> TransportResult<Self> {
        let url = uri.parse::<Url>()?;
        let mode = match url.scheme() {
            COAP_SCHEME => TransportMode::Plain,
            COAPS_SCHEME => TransportMode::Secure,
            _ => return Err(TransportError::InvalidParameter("unsupported uri scheme")),
        };

        let host = match url.host() {
            Some(Host::Domain(name)) if !name.is_empty() => name.to_owned(),
            Some(Host::Ipv4(ip)) => ip.to_string(),
            Some(Host::Ipv6(ip)) => ip.to_string(),
            _ => return Err(TransportError::InvalidParameter("uri has no host")),
        };
        let port = url.port().unwrap_or_else(|| mode.default_port());

        let mut config = Self::new(mode, Endpoint::new(&host, port)?);
        if mode == TransportMode::Secure && host.parse::<IpAddr>().is_err() {
            config.host = Some(host);
        }
        Ok(config)
    }

    /// Reject values `init` cannot work with.
    pub fn validate(&self) -> TransportResult<()> {
        if self.remote.addr().is_empty() {
            return Err(TransportError::InvalidParameter("remote address is empty"));
        }
        if self.remote.port() == 0 {
            return Err(TransportError::InvalidParameter("remote port is zero"));
        }
        if self.max_pdu_len == 0 {
            return Err(TransportError::InvalidParameter("max pdu length is zero"));
        }
        Ok(())
    }
}

/// Builder for [`TransportConfig`].
#[derive(Debug, Default)]
pub struct TransportConfigBuilder {
    mode: Option<TransportMode>,
    remote: Option<Endpoint>,
    ca_cert_pem: Option<Vec<u8>>,
    host: Option<String>,
    max_pdu_len: Option<usize>,
    local_addr: Option<SocketAddr>,
}

impl TransportConfigBuilder {
    /// Create a new builder. Mode defaults to plain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delivery mode.
    pub fn mode(mut self, mode: TransportMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Use DTLS.
    pub fn secure(self) -> Self {
        self.mode(TransportMode::Secure)
    }

    /// Set the remote endpoint.
    pub fn remote(mut self, remote: Endpoint) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Set the CA certificate (PEM).
    pub fn ca_cert_pem(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.ca_cert_pem = Some(pem.into());
        self
    }

    /// Set the expected server name.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the largest datagram payload.
    pub fn max_pdu_len(mut self, len: usize) -> Self {
        self.max_pdu_len = Some(len);
        self
    }

    /// Bind locally to `addr`.
    pub fn local_addr(mut self, addr: SocketAddr) -> Self {
        self.local_addr = Some(addr);
        self
    }

    /// Build the configuration.
    ///
    /// Fails with [`TransportError::InvalidParameter`] if no remote endpoint
    /// was given.
    pub fn build(self) -> TransportResult<TransportConfig> {
        let remote = self
            .remote
            .ok_or(TransportError::InvalidParameter("remote endpoint not set"))?;
        let mut config = TransportConfig::new(self.mode.unwrap_or(TransportMode::Plain), remote);
        config.ca_cert_pem = self.ca_cert_pem;
        config.host = self.host;
        config.local_addr = self.local_addr;
        if let Some(len) = self.max_pdu_len {
            config.max_pdu_len = len;
        }
        config.validate()?;
        Ok(config)
    }
}
