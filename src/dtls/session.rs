//! Secure session lifecycle.
//!
//! A [`SecureSession`] owns one DTLS context from allocation to free. The
//! context is dropped exactly once: on a failed handshake, when a read sees
//! the peer end the session, on an explicit [`SecureSession::free`], or when
//! the session itself is dropped.

use std::fmt;
use std::time::Duration;

use tracing::{debug, info, trace, warn};

use super::engine::{DtlsContext, DtlsEngine, DtlsOptions};
use crate::core::{Endpoint, TransportError, TransportResult};

/// Lifecycle state of a [`SecureSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Context allocated, handshake not run yet.
    Uninitialized,
    /// Handshake done, application data may flow.
    Created,
    /// Context freed. A closed session never comes back.
    Closed,
}

/// A DTLS session and the context behind it.
pub struct SecureSession<C: DtlsContext> {
    /// Engine context; `None` once freed.
    context: Option<C>,
    /// Current state.
    state: SessionState,
    /// Remote endpoint, known after `create`.
    remote: Option<Endpoint>,
}

impl<C: DtlsContext> SecureSession<C> {
    /// Allocate a context from `engine`.
    pub fn init<E>(engine: &E) -> TransportResult<Self>
    where
        E: DtlsEngine<Context = C>,
    {
        let context = engine.init().map_err(|code| {
            warn!(%code, "dtls context allocation failed");
            TransportError::from_establish_code(code)
        })?;
        trace!("dtls context allocated");
        Ok(Self {
            context: Some(context),
            state: SessionState::Uninitialized,
            remote: None,
        })
    }

    /// Run the handshake.
    ///
    /// On failure the context is freed before returning and the engine's
    /// code is kept in [`TransportError::SecureEstablishment`].
    pub async fn create(&mut self, options: DtlsOptions) -> TransportResult<()> {
        if self.state != SessionState::Uninitialized {
            return Err(TransportError::InvalidParameter(
                "secure session already created or closed",
            ));
        }
        let Some(context) = self.context.as_mut() else {
            return Err(TransportError::InvalidParameter("secure session has no context"));
        };

        let remote = options.remote.clone();
        debug!(%remote, host = ?options.host, ca = options.ca_cert_pem.is_some(), "dtls handshake");
        let result = context.create(options).await;
        self.remote = Some(remote);

        match result {
            Ok(()) => {
                self.state = SessionState::Created;
                info!(remote = %self.remote_display(), "dtls session created");
                Ok(())
            }
            Err(code) => {
                warn!(remote = %self.remote_display(), %code, "dtls session create failed");
                self.free();
                Err(TransportError::from_establish_code(code))
            }
        }
    }

    /// Read decrypted application data, waiting at most `timeout`.
    ///
    /// Returns `Ok(0)` on timeout. If the peer closed the session or sent a
    /// fatal alert, the context is freed and the matching error returned.
    pub async fn read(&mut self, buf: &mut [u8], timeout: Duration) -> TransportResult<usize> {
        let context = self.established()?;
        trace!(capacity = buf.len(), ?timeout, "dtls read");

        match context.read(buf, timeout).await {
            Ok(len) => {
                trace!(len, "dtls read complete");
                Ok(len)
            }
            Err(code) if code.ends_session() => {
                info!(remote = %self.remote_display(), %code, "dtls session ended by peer");
                self.free();
                Err(TransportError::from_read_code(code))
            }
            Err(code) => {
                debug!(remote = %self.remote_display(), %code, "dtls read failed");
                Err(TransportError::from_read_code(code))
            }
        }
    }

    /// Encrypt and send `data`.
    ///
    /// Fails with [`TransportError::InvalidParameter`] unless the session is
    /// [`SessionState::Created`]. Engine failures come back as
    /// [`TransportError::Secure`] with the engine's code and leave the
    /// session open.
    pub async fn write(&mut self, data: &[u8]) -> TransportResult<usize> {
        let context = self.established()?;
        match context.write(data).await {
            Ok(len) => {
                trace!(len, "dtls write complete");
                Ok(len)
            }
            Err(code) => {
                debug!(remote = %self.remote_display(), %code, "dtls write failed");
                Err(TransportError::from_write_code(code))
            }
        }
    }

    /// Free the context. Safe to call more than once.
    pub fn free(&mut self) {
        if let Some(context) = self.context.take() {
            drop(context);
            debug!(remote = %self.remote_display(), "dtls context freed");
        }
        self.state = SessionState::Closed;
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if application data may flow.
    pub fn is_created(&self) -> bool {
        self.state == SessionState::Created
    }

    fn established(&mut self) -> TransportResult<&mut C> {
        match (self.state, self.context.as_mut()) {
            (SessionState::Created, Some(context)) => Ok(context),
            _ => Err(TransportError::InvalidParameter(
                "secure session not established",
            )),
        }
    }

    fn remote_display(&self) -> String {
        self.remote
            .as_ref()
            .map_or_else(|| "-".to_owned(), Endpoint::to_string)
    }
}

impl<C: DtlsContext> Drop for SecureSession<C> {
    fn drop(&mut self) {
        self.free();
    }
}

impl<C: DtlsContext> fmt::Debug for SecureSession<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureSession")
            .field("state", &self.state)
            .field("remote", &self.remote)
            .finish_non_exhaustive()
    }
}
