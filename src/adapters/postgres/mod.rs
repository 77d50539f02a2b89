//! PostgreSQL adapter implementations.
//!
//! sqlx-backed implementations of the persistence ports. Row structs
//! mirror the table layout and convert into domain aggregates.

mod catalog_reader;
mod certificate_repository;
mod enrollment_repository;
mod payment_repository;
mod progress_repository;
mod user_directory;

pub use catalog_reader::PostgresCatalogReader;
pub use certificate_repository::PostgresCertificateRepository;
pub use enrollment_repository::PostgresEnrollmentRepository;
pub use payment_repository::PostgresPaymentRepository;
pub use progress_repository::PostgresProgressRepository;
pub use user_directory::PostgresUserDirectory;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Maps a sqlx error to a domain error, surfacing unique-constraint
/// violations as `Conflict`.
pub(crate) fn map_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return DomainError::new(ErrorCode::Conflict, db_err.to_string());
        }
    }
    DomainError::new(ErrorCode::DatabaseError, err.to_string())
}
