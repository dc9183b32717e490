//! Domain error taxonomy.
//!
//! Every expected failure of the identity and session engine is one of the
//! typed variants below. Each carries a human-readable `message` and an
//! `action` telling the caller how to remediate, plus a stable taxonomy
//! [`name`](CoreError::name) and an HTTP-mappable
//! [`status_code`](CoreError::status_code).
//!
//! Texts are pt-BR, matching what clients of the deployed service expect.

/// Domain-level error returned by the identity and session operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// User-correctable input problem (duplicate username/email, malformed field).
    #[error("{message}")]
    Validation { message: String, action: String },

    /// The referenced identity (by id, username or email) does not exist.
    #[error("{message}")]
    NotFound { message: String, action: String },

    /// Missing, unknown, expired or revoked session, or bad login credentials.
    #[error("{message}")]
    Unauthorized { message: String, action: String },

    /// The endpoint exists but does not accept the request method.
    #[error("{message}")]
    MethodNotAllowed { message: String, action: String },

    /// Unexpected fault. The payload is for logs only and never reaches clients.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>, action: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            action: action.into(),
        }
    }

    pub fn not_found(message: impl Into<String>, action: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            action: action.into(),
        }
    }

    /// The single error used for every session failure.
    ///
    /// "Never existed", "expired" and "revoked" are deliberately indistinguishable.
    pub fn no_active_session() -> Self {
        Self::Unauthorized {
            message: "Usuário não possui sessão ativa".into(),
            action: "Verifique se este usuário está logado e tente novamente".into(),
        }
    }

    /// Login failure; does not reveal whether the email or the password was wrong.
    pub fn invalid_credentials() -> Self {
        Self::Unauthorized {
            message: "Dados de autenticação não conferem.".into(),
            action: "Verifique se os dados enviados estão corretos.".into(),
        }
    }

    pub fn method_not_allowed() -> Self {
        Self::MethodNotAllowed {
            message: "Método não permitido para este endpoint.".into(),
            action: "Verifique se o método HTTP enviado é válido para este endpoint.".into(),
        }
    }

    /// Taxonomy tag exposed to clients as `name`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "ValidationError",
            Self::NotFound { .. } => "NotFoundError",
            Self::Unauthorized { .. } => "UnauthorizedError",
            Self::MethodNotAllowed { .. } => "MethodNotAllowedError",
            Self::Internal(_) => "InternalServerError",
        }
    }

    /// HTTP status code the boundary layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::Unauthorized { .. } => 401,
            Self::NotFound { .. } => 404,
            Self::MethodNotAllowed { .. } => 405,
            Self::Internal(_) => 500,
        }
    }

    /// Client-facing message. Internal faults are masked.
    pub fn public_message(&self) -> &str {
        match self {
            Self::Validation { message, .. }
            | Self::NotFound { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::MethodNotAllowed { message, .. } => message,
            Self::Internal(_) => "Um erro interno não esperado aconteceu.",
        }
    }

    /// Remediation hint for the client.
    pub fn action(&self) -> &str {
        match self {
            Self::Validation { action, .. }
            | Self::NotFound { action, .. }
            | Self::Unauthorized { action, .. }
            | Self::MethodNotAllowed { action, .. } => action,
            Self::Internal(_) => "Entre em contato com o suporte.",
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}
