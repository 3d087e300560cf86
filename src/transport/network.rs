//! Unified datagram transport.
//!
//! [`Transport`] picks plain UDP or DTLS once, at [`Transport::init`], and
//! forwards every `read` and `write` to that path.
//!
//! ```text
//!   Uninitialized ──init ok──► Ready ──deinit──► Torn down
//!
//!   secure sub-state:  NoSession ──► Created ──► Closed
//!                                       │          ▲
//!                                       └─ fatal read / deinit
//! ```

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::config::{TransportConfig, TransportMode};
use super::plain;
use super::socket::CoapSocket;
use crate::core::{Endpoint, TransportError, TransportResult};
use crate::dtls::{DtlsEngine, DtlsOptions, NoDtls, SecureSession, SessionState};

/// The delivery path chosen at construction.
#[derive(Debug)]
enum Link<E: DtlsEngine> {
    Plain,
    Secure(SecureSession<E::Context>),
}

/// A datagram transport to one remote endpoint.
///
/// Methods take `&mut self`: one owner drives a transport at a time.
#[derive(Debug)]
pub struct Transport<E: DtlsEngine = NoDtls> {
    /// Socket; `None` after `deinit`.
    socket: Option<CoapSocket>,
    /// Configured remote endpoint.
    remote: Endpoint,
    /// Resolved remote address.
    peer: SocketAddr,
    /// Largest datagram payload read or written.
    max_pdu_len: usize,
    /// Plain or secure path. A session exists iff this is `Secure`.
    link: Link<E>,
}

impl Transport<NoDtls> {
    /// Build a plain UDP transport.
    ///
    /// A secure `config` fails with [`TransportError::SecureEstablishment`].
    pub async fn plain(config: TransportConfig) -> TransportResult<Self> {
        Self::init(config, &NoDtls).await
    }
}

impl<E: DtlsEngine> Transport<E> {
    /// Open the socket and, in secure mode, establish the DTLS session.
    ///
    /// If establishment fails, the session context and the socket are both
    /// released before the error is returned.
    pub async fn init(config: TransportConfig, engine: &E) -> TransportResult<Self> {
        config.validate()?;
        let TransportConfig {
            mode,
            remote,
            ca_cert_pem,
            host,
            max_pdu_len,
            local_addr,
        } = config;

        let peer = resolve(&remote).await?;
        let socket = CoapSocket::open(peer, local_addr).await?;
        debug!(%remote, %peer, ?mode, "transport socket opened");

        let link = match mode {
            TransportMode::Plain => {
                if ca_cert_pem.is_some() || host.is_some() {
                    debug!(%remote, "plain transport ignores DTLS options");
                }
                Link::Plain
            }
            TransportMode::Secure => {
                let mut session = SecureSession::init(engine)?;
                let options = DtlsOptions {
                    socket: socket.socket_arc(),
                    remote: remote.clone(),
                    peer,
                    ca_cert_pem,
                    host,
                };
                if let Err(err) = session.create(options).await {
                    warn!(%remote, error = %err, "secure transport init failed, closing socket");
                    return Err(err);
                }
                Link::Secure(session)
            }
        };

        info!(%remote, ?mode, "transport ready");
        Ok(Self {
            socket: Some(socket),
            remote,
            peer,
            max_pdu_len,
            link,
        })
    }

    /// Send `data` to the remote as one datagram (one record in secure mode).
    ///
    /// Fails with [`TransportError::InvalidParameter`] if `data` is larger
    /// than the configured PDU limit, after `deinit`, or when the secure
    /// session is no longer established.
    pub async fn write(&mut self, data: &[u8]) -> TransportResult<usize> {
        if data.len() > self.max_pdu_len {
            return Err(TransportError::InvalidParameter(
                "payload exceeds max pdu length",
            ));
        }
        let socket = self
            .socket
            .as_ref()
            .ok_or(TransportError::InvalidParameter("transport is torn down"))?;

        match &mut self.link {
            Link::Plain => plain::write(socket, data).await,
            Link::Secure(session) => {
                debug!(remote = %self.remote, len = data.len(), "send secure datagram");
                session.write(data).await
            }
        }
    }

    /// Receive one datagram into `buf`, waiting at most `timeout`.
    ///
    /// `buf` is zero-filled before reading. `Ok(0)` means nothing arrived.
    /// In secure mode, [`TransportError::SecurePeerClosed`] and
    /// [`TransportError::SecureFatalAlert`] report that the session just
    /// ended; every later `write` fails until a new transport is built.
    pub async fn read(&mut self, buf: &mut [u8], timeout: Duration) -> TransportResult<usize> {
        let socket = self
            .socket
            .as_ref()
            .ok_or(TransportError::InvalidParameter("transport is torn down"))?;

        match &mut self.link {
            Link::Plain => plain::read(socket, buf, self.max_pdu_len, timeout).await,
            Link::Secure(session) => {
                buf.fill(0);
                let limit = buf.len().min(self.max_pdu_len);
                let len = session.read(&mut buf[..limit], timeout).await?;
                debug!(remote = %self.remote, len, "recv secure datagram");
                Ok(len)
            }
        }
    }

    /// Close the socket and free the session, if any.
    ///
    /// Best effort and idempotent: nothing here can fail.
    pub fn deinit(&mut self) {
        if let Some(socket) = self.socket.take() {
            drop(socket);
            debug!(remote = %self.remote, "transport socket closed");
        }
        if let Link::Secure(session) = &mut self.link {
            session.free();
        }
    }

    /// Delivery mode.
    pub fn mode(&self) -> TransportMode {
        match self.link {
            Link::Plain => TransportMode::Plain,
            Link::Secure(_) => TransportMode::Secure,
        }
    }

    /// Configured remote endpoint.
    pub fn remote(&self) -> &Endpoint {
        &self.remote
    }

    /// Resolved remote address.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Local socket address, `None` after `deinit`.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.socket.as_ref().and_then(|s| s.local_addr().ok())
    }

    /// Secure session state; `None` in plain mode.
    pub fn session_state(&self) -> Option<SessionState> {
        match &self.link {
            Link::Plain => None,
            Link::Secure(session) => Some(session.state()),
        }
    }

    /// Check if the socket is still open.
    pub fn is_open(&self) -> bool {
        self.socket.is_some()
    }

    /// Largest datagram payload read or written.
    pub fn max_pdu_len(&self) -> usize {
        self.max_pdu_len
    }
}

async fn resolve(remote: &Endpoint) -> TransportResult<SocketAddr> {
    if let Ok(ip) = remote.addr().parse() {
        return Ok(SocketAddr::new(ip, remote.port()));
    }
    let resolve_err = |source| TransportError::Resolve {
        endpoint: remote.to_string(),
        source,
    };
    tokio::net::lookup_host(remote.to_host_port())
        .await
        .map_err(resolve_err)?
        .next()
        .ok_or_else(|| resolve_err(io::Error::new(io::ErrorKind::NotFound, "no addresses")))
}
