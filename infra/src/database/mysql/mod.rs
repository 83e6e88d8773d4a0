//! MySQL repository implementations

use ts_core::errors::DomainError;

/// Map any lower-level failure to an opaque database error
pub(crate) fn db_err(e: impl std::fmt::Display) -> DomainError {
    DomainError::Database {
        message: e.to_string(),
    }
}

mod code_repository_impl;
mod email_log_repository_impl;
mod user_repository_impl;
mod workspace_repository_impl;

pub use code_repository_impl::MySqlCodeRepository;
pub use email_log_repository_impl::MySqlEmailLogRepository;
pub use user_repository_impl::MySqlUserRepository;
pub use workspace_repository_impl::MySqlWorkspaceRepository;
