//! Error translation shared by the Diesel repositories.

use std::fmt::Display;

use tracing::{debug, warn};

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Map pool failures to a connection error.
pub(crate) fn map_pool_error(error: PoolError) -> RepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    RepositoryError::connection(message)
}

/// Map Diesel failures to repository errors.
///
/// Unique violations become [`RepositoryError::Duplicate`] carrying the
/// constraint name so services can report which value clashed.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> RepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            RepositoryError::duplicate(info.constraint_name().unwrap_or("unique constraint"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection closed")
        }
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        _ => RepositoryError::query("database error"),
    }
}

/// Map a stored value that no longer parses into the domain.
///
/// Rows are written only by this adapter, so a failure means the table was
/// edited by hand or a migration diverged.
pub(crate) fn map_row_error(table: &'static str, error: impl Display) -> RepositoryError {
    warn!(table, error = %error, "stored row failed domain validation");
    RepositoryError::query(format!("corrupt {table} row: {error}"))
}

/// Convert a row count to the `bool` the ports return for deletes.
pub(crate) fn deleted(rows: usize) -> bool {
    rows > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    struct Info(Option<&'static str>);

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("rooms")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.0
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info(constraint)))
    }

    #[rstest]
    fn unique_violation_names_the_constraint() {
        let err = map_diesel_error(database_error(
            DatabaseErrorKind::UniqueViolation,
            Some("rooms_number_key"),
        ));
        assert_eq!(err, RepositoryError::duplicate("rooms_number_key"));
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::ClosedConnection, None), true)]
    #[case(database_error(DatabaseErrorKind::ForeignKeyViolation, None), false)]
    #[case(DieselError::NotFound, false)]
    fn connection_failures_are_distinguished(#[case] error: DieselError, #[case] connection: bool) {
        let mapped = map_diesel_error(error);
        assert_eq!(
            matches!(mapped, RepositoryError::Connection { .. }),
            connection
        );
    }

    #[rstest]
    fn pool_errors_are_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, RepositoryError::connection("timed out"));
    }
}
