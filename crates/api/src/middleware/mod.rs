//! Request extractors for session-authenticated endpoints.
//!
//! - [`auth::SessionToken`] -- Raw token from the `session_id` cookie.
//! - [`auth::CurrentSession`] -- Validated and renewed session.

pub mod auth;
