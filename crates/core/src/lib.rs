//! Domain layer of the identity and session engine.
//!
//! Nothing in this crate performs I/O: persistence lives in `warden-db` and
//! the HTTP boundary in `warden-api`.

pub mod clock;
pub mod error;
pub mod identity;
pub mod session;
pub mod types;
