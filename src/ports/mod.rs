//! Ports: contracts between the application core and the outside world.

mod artifact_storage;
mod catalog_reader;
mod certificate_renderer;
mod certificate_repository;
mod enrollment_repository;
mod payment_provider;
mod payment_repository;
mod progress_repository;
mod user_directory;

pub use artifact_storage::ArtifactStorage;
pub use catalog_reader::CatalogReader;
pub use certificate_renderer::CertificateRenderer;
pub use certificate_repository::CertificateRepository;
pub use enrollment_repository::EnrollmentRepository;
pub use payment_provider::{
    CreateOrderRequest, CreatePaymentLinkRequest, PaymentProvider, ProviderError, ProviderOrder,
    ProviderPaymentLink,
};
pub use payment_repository::PaymentRepository;
pub use progress_repository::ProgressRepository;
pub use user_directory::{UserAccount, UserDirectory};
