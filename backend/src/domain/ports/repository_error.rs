//! Error shared by the persistence ports.

use super::define_port_error;
use crate::domain::Error;

define_port_error! {
    /// Persistence errors raised by repository adapters.
    pub enum RepositoryError {
        /// Store connection could not be established.
        Connection { message: String } => "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Duplicate { message: String } => "duplicate record: {message}",
    }
}

/// Translate a repository failure into a domain error for `subject`.
///
/// Connection problems become `service_unavailable`, query failures
/// `internal_error`, and uniqueness violations `conflict`.
pub fn map_repository_error(subject: &str, error: RepositoryError) -> Error {
    match error {
        RepositoryError::Connection { message } => {
            Error::service_unavailable(format!("{subject} repository unavailable: {message}"))
        }
        RepositoryError::Query { message } => {
            Error::internal(format!("{subject} repository error: {message}"))
        }
        RepositoryError::Duplicate { message } => {
            Error::conflict(format!("{subject} already exists: {message}"))
        }
    }
}
