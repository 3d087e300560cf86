//! The seam between this crate and a DTLS implementation.
//!
//! A DTLS engine hands out one context per session. The context performs
//! the handshake over the transport's UDP socket and then encrypts and
//! decrypts application data. Dropping a context frees it.

use std::fmt;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::UdpSocket;

use crate::core::{DtlsCode, Endpoint};

/// Everything a context needs to establish a session.
#[derive(Debug, Clone)]
pub struct DtlsOptions {
    /// Socket shared with the transport, already connected to `peer`.
    pub socket: Arc<UdpSocket>,
    /// Remote endpoint as configured.
    pub remote: Endpoint,
    /// Resolved remote address.
    pub peer: SocketAddr,
    /// PEM-encoded CA certificate used to verify the server.
    pub ca_cert_pem: Option<Vec<u8>>,
    /// Expected server name for certificate hostname verification.
    pub host: Option<String>,
}

/// Factory for DTLS session contexts.
pub trait DtlsEngine {
    /// Per-session state owned by a [`SecureSession`](super::SecureSession).
    type Context: DtlsContext;

    /// Allocate a fresh, not yet connected context.
    fn init(&self) -> Result<Self::Context, DtlsCode>;
}

/// One DTLS session.
///
/// Implementations report [`DtlsCode::PeerCloseNotify`] and
/// [`DtlsCode::FatalAlertMessage`] from `read` when the peer ends the
/// session; the owner frees the context right after.
pub trait DtlsContext: Send + fmt::Debug {
    /// Run the handshake against `options.peer`.
    fn create(&mut self, options: DtlsOptions)
    -> impl Future<Output = Result<(), DtlsCode>> + Send;

    /// Wait up to `timeout` for application data.
    ///
    /// Returns `Ok(0)` when nothing arrived in time.
    fn read(
        &mut self,
        buf: &mut [u8],
        timeout: Duration,
    ) -> impl Future<Output = Result<usize, DtlsCode>> + Send;

    /// Encrypt and send `data` as one record.
    fn write(&mut self, data: &[u8]) -> impl Future<Output = Result<usize, DtlsCode>> + Send;
}

/// Engine for transports that never go secure.
///
/// `init` always fails with [`DtlsCode::SessionCreateFailed`], so asking a
/// `Transport<NoDtls>` for secure mode is reported as an establishment
/// failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDtls;

/// Context type of [`NoDtls`]. It has no values.
#[derive(Debug)]
pub enum NoContext {}

impl DtlsEngine for NoDtls {
    type Context = NoContext;

    fn init(&self) -> Result<NoContext, DtlsCode> {
        Err(DtlsCode::SessionCreateFailed)
    }
}

impl DtlsContext for NoContext {
    async fn create(&mut self, _options: DtlsOptions) -> Result<(), DtlsCode> {
        match *self {}
    }

    async fn read(&mut self, _buf: &mut [u8], _timeout: Duration) -> Result<usize, DtlsCode> {
        match *self {}
    }

    async fn write(&mut self, _data: &[u8]) -> Result<usize, DtlsCode> {
        match *self {}
    }
}
