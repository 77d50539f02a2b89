//! Foundation value objects shared across the domain.

mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{AuthenticatedUser, Role};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    CertificateId, CourseId, EnrollmentId, LectureId, OrganizationId, PaymentId, UserId,
};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
