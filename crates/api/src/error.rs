use axum::extract::rejection::JsonRejection;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use warden_core::error::CoreError;
use warden_core::identity::UniqueField;
use warden_core::session::SessionCookie;

/// Application-level error type for HTTP handlers and services.
///
/// Wraps [`CoreError`] for domain errors and adds infrastructure variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses of
/// the shape `{ name, message, action, statusCode }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `warden_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler and service return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Translate a lost uniqueness race into the same `ValidationError` the
    /// pre-check would have raised. Other database errors pass through.
    pub fn from_unique_violation(err: sqlx::Error) -> Self {
        match unique_violation_field(&err) {
            Some(field) => AppError::Core(field.taken()),
            None => AppError::Database(err),
        }
    }

    /// The domain view of this error; infrastructure faults become `Internal`.
    pub fn to_core(&self) -> CoreError {
        match self {
            AppError::Core(core) => core.clone(),
            AppError::Database(err) => match unique_violation_field(err) {
                Some(field) => field.taken(),
                None => CoreError::Internal(err.to_string()),
            },
            AppError::InternalError(msg) => CoreError::Internal(msg.clone()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field = errors
            .field_errors()
            .keys()
            .min()
            .map(|k| k.to_string())
            .unwrap_or_else(|| "campo".to_string());
        AppError::Core(CoreError::validation(
            format!("O {field} informado é inválido."),
            format!("Verifique o {field} enviado e tente novamente."),
        ))
    }
}

/// A body that is not JSON, lacks the JSON content type, or does not fit the
/// request shape is a client error like any other validation failure.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
        AppError::Core(CoreError::validation(
            "O corpo da requisição é inválido.",
            "Envie um JSON válido com todos os campos obrigatórios e tente novamente.",
        ))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let core = self.to_core();

        if let CoreError::Internal(detail) = &core {
            tracing::error!(error = %detail, "Internal error");
        }

        let status =
            StatusCode::from_u16(core.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = json!({
            "name": core.name(),
            "message": core.public_message(),
            "action": core.action(),
            "statusCode": core.status_code(),
        });

        let mut response = (status, axum::Json(body)).into_response();

        // Any session failure also tells the client to drop its cookie.
        if core.is_unauthorized() {
            if let Ok(value) = HeaderValue::from_str(&SessionCookie::clear().to_string()) {
                response.headers_mut().append(SET_COOKIE, value);
            }
        }

        response
    }
}

/// PostgreSQL unique violation (23505) on one of the login-identifier indexes.
fn unique_violation_field(err: &sqlx::Error) -> Option<UniqueField> {
    let db_err = err.as_database_error()?;
    if db_err.code().as_deref() != Some("23505") {
        return None;
    }
    db_err.constraint().and_then(UniqueField::from_constraint)
}
