//! Identity and session engine.
//!
//! - [`password`] -- Peppered Argon2id hashing and verification.
//! - [`identity`] -- Uniqueness-guarded create/update workflow, lookups and login.
//! - [`session`] -- Session issuance, validation, sliding renewal and revocation.

pub mod identity;
pub mod password;
pub mod session;
