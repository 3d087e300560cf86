//! Datagram transport layer.
//!
//! - **Socket**: [`CoapSocket`], a tokio UDP socket connected to one peer
//! - **Plain I/O**: [`plain`], unsecured send and timed receive
//! - **Dispatcher**: [`Transport`], one `read`/`write` surface over plain
//!   UDP or a DTLS [`SecureSession`](crate::dtls::SecureSession)
//! - **Configuration**: [`TransportConfig`] and its builder
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          CoAP message layer             │
//! ├─────────────────────────────────────────┤
//! │            Transport                    │  ← This module
//! │     mode dispatch, PDU limit            │
//! ├────────────────────┬────────────────────┤
//! │    Plain I/O       │  SecureSession     │
//! │                    │  (DTLS engine)     │
//! ├────────────────────┴────────────────────┤
//! │              UDP                        │
//! └─────────────────────────────────────────┘
//! ```

mod config;
mod network;
pub mod plain;
mod socket;

pub use config::{TransportConfig, TransportConfigBuilder, TransportMode};
pub use network::Transport;
pub use socket::CoapSocket;
