//! Data access for each table. Repositories are zero-sized structs with
//! associated async functions taking the pool explicitly.

pub mod session_repo;
pub mod user_repo;

pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
