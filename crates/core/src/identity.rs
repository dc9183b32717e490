//! Identity lookup keys and login-identifier uniqueness rules.
//!
//! Usernames and emails are unique case-insensitively. The persistence layer
//! runs a single pre-check query returning every row that matches either
//! candidate; [`find_collision`] decides which field collided so the error
//! names it. Username wins when both collide.

use crate::error::CoreError;

/// Unique index on `lower(username)`.
pub const USERNAME_CONSTRAINT: &str = "uq_users_username_lower";

/// Unique index on `lower(email)`.
pub const EMAIL_CONSTRAINT: &str = "uq_users_email_lower";

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Field an identity was looked up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserLookup {
    Id,
    Username,
    Email,
}

impl UserLookup {
    fn label(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Username => "username",
            Self::Email => "email",
        }
    }

    /// Field-specific `NotFoundError`.
    pub fn not_found(self) -> CoreError {
        let label = self.label();
        CoreError::not_found(
            format!("O {label} informado não foi encontrado no sistema"),
            format!("Verifique se o {label} está digitado corretamente"),
        )
    }
}

// ---------------------------------------------------------------------------
// Uniqueness
// ---------------------------------------------------------------------------

/// A login identifier that must be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
}

impl UniqueField {
    fn label(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
        }
    }

    /// `ValidationError` naming the collided field.
    pub fn taken(self) -> CoreError {
        let label = self.label();
        CoreError::validation(
            format!("O {label} informado já está sendo utilizado."),
            format!("Utilize outro {label} para esta operação."),
        )
    }

    /// Map a database unique-index name back to the field it guards.
    pub fn from_constraint(constraint: &str) -> Option<Self> {
        match constraint {
            USERNAME_CONSTRAINT => Some(Self::Username),
            EMAIL_CONSTRAINT => Some(Self::Email),
            _ => None,
        }
    }
}

/// Candidate values checked by the pre-check. `None` fields are not checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueCandidate<'a> {
    pub username: Option<&'a str>,
    pub email: Option<&'a str>,
}

impl<'a> UniqueCandidate<'a> {
    pub fn username(username: &'a str) -> Self {
        Self {
            username: Some(username),
            email: None,
        }
    }

    pub fn email(email: &'a str) -> Self {
        Self {
            username: None,
            email: Some(email),
        }
    }

    /// Nothing to check: both fields absent or empty.
    pub fn is_empty(&self) -> bool {
        self.username.is_none_or(str::is_empty) && self.email.is_none_or(str::is_empty)
    }
}

/// Login identifiers of an existing row returned by the pre-check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingIdentifiers {
    pub username: String,
    pub email: String,
}

/// Decide which field of `candidate` collides with `existing`, if any.
///
/// A row can match on username but not email or the reverse, so each field is
/// compared again here. All rows are scanned for a username collision before
/// any email collision is reported.
pub fn find_collision(
    candidate: &UniqueCandidate<'_>,
    existing: &[ExistingIdentifiers],
) -> Option<UniqueField> {
    let collides = |wanted: Option<&str>, held: &str| {
        wanted.is_some_and(|w| !w.is_empty() && w.to_lowercase() == held.to_lowercase())
    };

    if existing
        .iter()
        .any(|row| collides(candidate.username, &row.username))
    {
        return Some(UniqueField::Username);
    }
    if existing
        .iter()
        .any(|row| collides(candidate.email, &row.email))
    {
        return Some(UniqueField::Email);
    }
    None
}
