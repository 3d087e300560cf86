//! Core types: endpoints, DTLS result codes, the error taxonomy and constants.
//!
//! Nothing here touches a socket, so this module builds without the
//! `transport` feature.

mod code;
pub mod constants;
mod endpoint;
mod error;

pub use code::DtlsCode;
pub use endpoint::{Endpoint, EndpointError};
pub use error::{TransportError, TransportResult};
