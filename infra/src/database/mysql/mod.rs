//! MySQL repository implementations

pub mod token_repository_impl;
pub mod user_repository_impl;

pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;

use uh_core::errors::DomainError;

/// Logs a failed query and hides its details behind `DomainError::Internal`
pub(crate) fn query_failed(context: &str, err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, "{}", context);
    DomainError::internal(format!("{}: {}", context, err))
}

/// Whether the error is a MySQL duplicate-key violation (error 1062)
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation()
        }
        _ => false,
    }
}
