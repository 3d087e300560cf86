//! Error types for the datagram transport.
//!
//! Socket failures, DTLS engine codes and configuration problems all end up
//! in [`TransportError`]. DTLS codes are carried as a nested [`DtlsCode`] so
//! callers can still tell a rejected certificate from an unreachable peer.

use std::io;

use thiserror::Error;

use super::code::DtlsCode;
use super::endpoint::EndpointError;

/// Transport layer errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Bad configuration or an operation the current state does not allow.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// Endpoint could not be built.
    #[error("endpoint error: {0}")]
    Endpoint(#[from] EndpointError),

    /// Transport URI could not be parsed.
    #[error("invalid uri: {0}")]
    Uri(#[from] url::ParseError),

    /// Socket operation failed.
    #[error("internal transport error: {0}")]
    Internal(#[from] io::Error),

    /// Endpoint did not resolve to any socket address.
    #[error("could not resolve {endpoint}: {source}")]
    Resolve {
        /// The endpoint as text.
        endpoint: String,
        /// Lookup failure, or `NotFound` when the lookup returned nothing.
        #[source]
        source: io::Error,
    },

    /// Secure session could not be established.
    #[error("secure session establishment failed: {0}")]
    SecureEstablishment(DtlsCode),

    /// Peer closed the secure session. The session has been freed.
    #[error("secure session closed by peer")]
    SecurePeerClosed,

    /// Peer sent a fatal alert. The session has been freed.
    #[error("secure session aborted by fatal alert")]
    SecureFatalAlert,

    /// Any other DTLS engine failure during read or write.
    #[error("secure session error: {0}")]
    Secure(DtlsCode),
}

impl TransportError {
    /// Map a code observed while establishing a session.
    pub fn from_establish_code(code: DtlsCode) -> Self {
        TransportError::SecureEstablishment(code)
    }

    /// Map a code observed on a session read.
    ///
    /// Close and fatal-alert codes become the variants that report a freed
    /// session, because the read path frees the context when it sees them.
    pub fn from_read_code(code: DtlsCode) -> Self {
        match code {
            DtlsCode::PeerCloseNotify => TransportError::SecurePeerClosed,
            DtlsCode::FatalAlertMessage => TransportError::SecureFatalAlert,
            other => TransportError::Secure(other),
        }
    }

    /// Map a code observed on a session write.
    ///
    /// Writes never free the session, so the code is kept as is.
    pub fn from_write_code(code: DtlsCode) -> Self {
        TransportError::Secure(code)
    }

    /// The DTLS engine code behind this error, if any.
    pub fn dtls_code(&self) -> Option<DtlsCode> {
        match self {
            TransportError::SecureEstablishment(code) | TransportError::Secure(code) => {
                Some(*code)
            }
            TransportError::SecurePeerClosed => Some(DtlsCode::PeerCloseNotify),
            TransportError::SecureFatalAlert => Some(DtlsCode::FatalAlertMessage),
            _ => None,
        }
    }

    /// Check if the secure session is gone after this error.
    ///
    /// The transport must be rebuilt to talk securely again.
    pub fn is_session_fatal(&self) -> bool {
        matches!(
            self,
            TransportError::SecurePeerClosed
                | TransportError::SecureFatalAlert
                | TransportError::SecureEstablishment(_)
        )
    }

    /// Check if this error came from the DTLS engine.
    pub fn is_security_error(&self) -> bool {
        self.dtls_code().is_some()
    }
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;
