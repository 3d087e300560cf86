//! # coap-netlink
//!
//! Datagram transport for CoAP clients on constrained devices.
//!
//! One [`Transport`](transport::Transport) carries opaque CoAP PDUs either
//! over plain UDP or over a DTLS session, chosen once from configuration:
//!
//! - **Plain**: datagrams go straight to the socket
//! - **Secure**: a pluggable DTLS engine encrypts them; the session is
//!   freed automatically if the peer closes it or sends a fatal alert
//! - **Errors**: socket failures and DTLS engine codes map into one
//!   [`TransportError`], with the engine code kept for diagnosis
//!
//! Retransmission, deduplication and everything above raw bytes belong to
//! the CoAP layer, not here.
//!
//! ## Feature Flags
//!
//! - `transport` (default): tokio sockets, the DTLS session seam and the
//!   dispatcher
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::time::Duration;
//! use coap_netlink::prelude::*;
//!
//! # async fn run() -> Result<(), TransportError> {
//! let config = TransportConfig::from_uri("coap://192.0.2.10")?;
//! let mut transport = Transport::plain(config).await?;
//!
//! transport.write(&[0x40, 0x01, 0x12, 0x34]).await?;
//!
//! let mut buf = [0u8; 1280];
//! let len = transport.read(&mut buf, Duration::from_secs(2)).await?;
//! println!("received {len} bytes");
//!
//! transport.deinit();
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Core module (always included)
pub mod core;

// DTLS session seam (feature-gated)
#[cfg(feature = "transport")]
#[cfg_attr(docsrs, doc(cfg(feature = "transport")))]
pub mod dtls;

// Transport layer (feature-gated)
#[cfg(feature = "transport")]
#[cfg_attr(docsrs, doc(cfg(feature = "transport")))]
pub mod transport;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::*;

    #[cfg(feature = "transport")]
    pub use crate::dtls::{DtlsContext, DtlsEngine, DtlsOptions, NoDtls, SecureSession, SessionState};

    #[cfg(feature = "transport")]
    pub use crate::transport::{Transport, TransportConfig, TransportConfigBuilder, TransportMode};
}

// Re-export commonly used items at crate root
pub use crate::core::{DtlsCode, Endpoint, EndpointError, TransportError, TransportResult};

#[cfg(feature = "transport")]
pub use transport::{Transport, TransportConfig, TransportMode};
