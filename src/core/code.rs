//! DTLS engine result codes.
//!
//! Engines report outcomes in a flat 32-bit code space. [`DtlsCode`] names
//! the values this layer reacts to and keeps everything else verbatim in
//! [`DtlsCode::Other`], so no diagnostic is lost on the way up.

use std::fmt;

use super::constants::*;

/// A result code reported by a DTLS engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DtlsCode {
    /// The engine rejected a parameter.
    InvalidParam,
    /// The CA certificate could not be parsed.
    InvalidCaCertificate,
    /// The handshake has not finished.
    HandshakeInProgress,
    /// The handshake failed (certificate rejected, peer unreachable, ...).
    HandshakeFailed,
    /// The peer sent a fatal alert; the session must be abandoned.
    FatalAlertMessage,
    /// The peer closed the session gracefully.
    PeerCloseNotify,
    /// The engine could not allocate or set up a session.
    SessionCreateFailed,
    /// Reading from the record layer failed.
    ReadDataFailed,
    /// Any engine-specific code without a name here.
    Other(u32),
}

impl DtlsCode {
    /// Decode a raw engine code.
    ///
    /// Returns `None` for [`DTLS_SUCCESS`], which is not an error.
    pub fn from_raw(raw: u32) -> Option<Self> {
        let code = match raw {
            DTLS_SUCCESS => return None,
            DTLS_INVALID_PARAM => Self::InvalidParam,
            DTLS_INVALID_CA_CERTIFICATE => Self::InvalidCaCertificate,
            DTLS_HANDSHAKE_IN_PROGRESS => Self::HandshakeInProgress,
            DTLS_HANDSHAKE_FAILED => Self::HandshakeFailed,
            DTLS_FATAL_ALERT_MESSAGE => Self::FatalAlertMessage,
            DTLS_PEER_CLOSE_NOTIFY => Self::PeerCloseNotify,
            DTLS_SESSION_CREATE_FAILED => Self::SessionCreateFailed,
            DTLS_READ_DATA_FAILED => Self::ReadDataFailed,
            other => Self::Other(other),
        };
        Some(code)
    }

    /// The raw engine code.
    pub fn as_raw(self) -> u32 {
        match self {
            Self::InvalidParam => DTLS_INVALID_PARAM,
            Self::InvalidCaCertificate => DTLS_INVALID_CA_CERTIFICATE,
            Self::HandshakeInProgress => DTLS_HANDSHAKE_IN_PROGRESS,
            Self::HandshakeFailed => DTLS_HANDSHAKE_FAILED,
            Self::FatalAlertMessage => DTLS_FATAL_ALERT_MESSAGE,
            Self::PeerCloseNotify => DTLS_PEER_CLOSE_NOTIFY,
            Self::SessionCreateFailed => DTLS_SESSION_CREATE_FAILED,
            Self::ReadDataFailed => DTLS_READ_DATA_FAILED,
            Self::Other(raw) => raw,
        }
    }

    /// Whether the session is unusable after this code was observed.
    pub fn ends_session(self) -> bool {
        matches!(self, Self::FatalAlertMessage | Self::PeerCloseNotify)
    }
}

impl fmt::Display for DtlsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidParam => "invalid parameter",
            Self::InvalidCaCertificate => "invalid CA certificate",
            Self::HandshakeInProgress => "handshake in progress",
            Self::HandshakeFailed => "handshake failed",
            Self::FatalAlertMessage => "fatal alert",
            Self::PeerCloseNotify => "peer close notify",
            Self::SessionCreateFailed => "session create failed",
            Self::ReadDataFailed => "read data failed",
            Self::Other(_) => "engine error",
        };
        write!(f, "{name} (0x{:08x})", self.as_raw())
    }
}
