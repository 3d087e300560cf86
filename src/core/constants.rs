//! Transport constants.
//!
//! Sizes and defaults shared by the plain and secure datagram paths.

// =============================================================================
// ENDPOINT
// =============================================================================

/// Capacity of an endpoint address, in bytes.
///
/// Fits any dotted IPv4 address and short IPv6 literals. Longer names go in
/// the DTLS host field.
pub const NETWORK_ADDR_LEN: usize = 16;

/// Default CoAP port (plain UDP).
pub const COAP_DEFAULT_PORT: u16 = 5683;

/// Default CoAPS port (DTLS).
pub const COAPS_DEFAULT_PORT: u16 = 5684;

/// URI scheme for plain CoAP.
pub const COAP_SCHEME: &str = "coap";

/// URI scheme for CoAP over DTLS.
pub const COAPS_SCHEME: &str = "coaps";

// =============================================================================
// DATAGRAM SIZES
// =============================================================================

/// Largest CoAP PDU buffered by this layer.
pub const COAP_MSG_MAX_PDU_LEN: usize = 1280;

// =============================================================================
// DTLS RESULT CODES
// =============================================================================

/// Base of the DTLS engine result code space.
pub const DTLS_ERROR_BASE: u32 = 1 << 24;

/// Operation completed.
pub const DTLS_SUCCESS: u32 = 0;

/// Engine rejected a parameter.
pub const DTLS_INVALID_PARAM: u32 = DTLS_ERROR_BASE | 1;

/// CA certificate could not be parsed.
pub const DTLS_INVALID_CA_CERTIFICATE: u32 = DTLS_ERROR_BASE | 2;

/// Handshake has not finished yet.
pub const DTLS_HANDSHAKE_IN_PROGRESS: u32 = DTLS_ERROR_BASE | 3;

/// Handshake failed.
pub const DTLS_HANDSHAKE_FAILED: u32 = DTLS_ERROR_BASE | 4;

/// Peer sent a fatal alert.
pub const DTLS_FATAL_ALERT_MESSAGE: u32 = DTLS_ERROR_BASE | 5;

/// Peer sent close_notify.
pub const DTLS_PEER_CLOSE_NOTIFY: u32 = DTLS_ERROR_BASE | 6;

/// Engine could not allocate or set up the session.
pub const DTLS_SESSION_CREATE_FAILED: u32 = DTLS_ERROR_BASE | 7;

/// Record layer read failed.
pub const DTLS_READ_DATA_FAILED: u32 = DTLS_ERROR_BASE | 8;
