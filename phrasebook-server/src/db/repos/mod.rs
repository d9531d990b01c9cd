//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for list operations (no N+1)
//! - Handles conflicts via ON CONFLICT (no check-then-insert)
//! - Uses transactions for multi-step operations
//!
//! Steps shared between repositories (creating a user, binding a session,
//! resolving a category) are free functions over `&mut PgConnection` so they
//! can run inside another repository's transaction.

pub mod users;
pub mod sessions;
pub mod reference;
pub mod phrases;
pub mod votes;

pub use users::User;
pub use sessions::SessionRepo;
pub use reference::{Category, Language, ReferenceRepo};
pub use phrases::{PhraseRecord, PhraseRepo, Submission, Submitter};
pub use votes::{Tally, VoteOutcome, VoteRepo};

/// SQLSTATE for foreign_key_violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Map a foreign-key violation on `constraint` to `NotFound`; any other
    /// error passes through unchanged.
    pub(crate) fn missing_reference(
        err: sqlx::Error,
        constraint: &str,
        resource: &'static str,
        id: impl ToString,
    ) -> Self {
        let is_match = match &err {
            sqlx::Error::Database(db) => {
                db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION)
                    && db.constraint() == Some(constraint)
            }
            _ => false,
        };

        if is_match {
            Self::not_found(resource, id)
        } else {
            Self::Sqlx(err)
        }
    }
}
