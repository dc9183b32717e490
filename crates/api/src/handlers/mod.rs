pub mod sessions;
pub mod user;
pub mod users;

use warden_core::error::CoreError;

use crate::error::AppError;

/// Fallback for a known path hit with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::Core(CoreError::method_not_allowed())
}
