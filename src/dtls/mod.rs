//! DTLS session seam and lifecycle.
//!
//! The crate does not implement DTLS itself. An engine plugs in through
//! [`DtlsEngine`] and [`DtlsContext`]; [`SecureSession`] owns the resulting
//! context and decides when it is freed.
//!
//! ```text
//!   init ──► Uninitialized ──create ok──► Created ──read: close/alert──► Closed
//!                  │                          │                           ▲
//!                  └──────create failed───────┴───────────free────────────┘
//! ```

mod engine;
#[cfg(test)]
pub(crate) mod script;
mod session;

pub use engine::{DtlsContext, DtlsEngine, DtlsOptions, NoContext, NoDtls};
pub use session::{SecureSession, SessionState};
