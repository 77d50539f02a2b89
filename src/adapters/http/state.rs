//! Shared HTTP application state.
//!
//! Arc-wrapped ports plus the settings each use case needs. Handlers are
//! constructed on demand from the shared state, so every request composes
//! the same dependency graph.

use std::sync::Arc;

use crate::application::handlers::admin::{AdminSeatSettings, ProvisionAdminHandler};
use crate::application::handlers::certificate::{
    CertificateSettings, DownloadCertificateHandler, IssueCertificateHandler,
    ListCertificatesHandler,
};
use crate::application::handlers::enrollment::{
    CheckoutSettings, ConfirmPaymentHandler, EnrollHandler, HandlePaymentWebhookHandler,
    SettlePaymentHandler,
};
use crate::application::handlers::media::{
    PlaybackSettings, PlayLectureHandler, StreamLectureHandler,
};
use crate::application::handlers::progress::{
    CourseCompletionHandler, MarkLectureCompleteHandler, RecordProgressHandler,
};
use crate::domain::media::VideoTokenService;
use crate::domain::payment::SignatureVerifier;
use crate::ports::{
    ArtifactStorage, CatalogReader, CertificateRenderer, CertificateRepository,
    EnrollmentRepository, PaymentProvider, PaymentRepository, ProgressRepository, UserDirectory,
};

/// Shared application state, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogReader>,
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub progress: Arc<dyn ProgressRepository>,
    pub certificates: Arc<dyn CertificateRepository>,
    pub users: Arc<dyn UserDirectory>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub storage: Arc<dyn ArtifactStorage>,
    pub certificate_renderer: Arc<dyn CertificateRenderer>,
    pub signature_verifier: Arc<SignatureVerifier>,
    pub video_tokens: Arc<VideoTokenService>,

    pub checkout_settings: CheckoutSettings,
    pub playback_settings: PlaybackSettings,
    pub certificate_settings: CertificateSettings,
    pub admin_seat_settings: AdminSeatSettings,

    /// HS256 secret for access tokens.
    pub auth_secret: String,
}

impl AppState {
    fn settlement_handler(&self) -> Arc<SettlePaymentHandler> {
        Arc::new(SettlePaymentHandler::new(
            self.payments.clone(),
            self.enrollments.clone(),
            self.users.clone(),
        ))
    }

    fn completion_handler(&self) -> Arc<CourseCompletionHandler> {
        Arc::new(CourseCompletionHandler::new(
            self.catalog.clone(),
            self.progress.clone(),
            self.enrollments.clone(),
        ))
    }

    fn issue_certificate_handler(&self) -> Arc<IssueCertificateHandler> {
        Arc::new(IssueCertificateHandler::new(
            self.certificates.clone(),
            self.users.clone(),
            self.catalog.clone(),
            self.certificate_renderer.clone(),
            self.storage.clone(),
            self.certificate_settings.clone(),
        ))
    }

    pub fn enroll_handler(&self) -> EnrollHandler {
        EnrollHandler::new(
            self.catalog.clone(),
            self.enrollments.clone(),
            self.payments.clone(),
            self.payment_provider.clone(),
            self.checkout_settings.clone(),
        )
    }

    pub fn confirm_payment_handler(&self) -> ConfirmPaymentHandler {
        ConfirmPaymentHandler::new(
            self.payments.clone(),
            self.signature_verifier.clone(),
            self.settlement_handler(),
        )
    }

    pub fn payment_webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(
            self.payments.clone(),
            self.signature_verifier.clone(),
            self.settlement_handler(),
        )
    }

    pub fn record_progress_handler(&self) -> RecordProgressHandler {
        RecordProgressHandler::new(
            self.catalog.clone(),
            self.enrollments.clone(),
            self.progress.clone(),
            self.completion_handler(),
            self.issue_certificate_handler(),
        )
    }

    pub fn mark_lecture_complete_handler(&self) -> MarkLectureCompleteHandler {
        MarkLectureCompleteHandler::new(
            self.catalog.clone(),
            self.enrollments.clone(),
            self.progress.clone(),
            self.completion_handler(),
            self.issue_certificate_handler(),
        )
    }

    pub fn play_lecture_handler(&self) -> PlayLectureHandler {
        PlayLectureHandler::new(
            self.catalog.clone(),
            self.enrollments.clone(),
            self.users.clone(),
            self.video_tokens.clone(),
            self.playback_settings.clone(),
        )
    }

    pub fn stream_lecture_handler(&self) -> StreamLectureHandler {
        StreamLectureHandler::new(
            self.catalog.clone(),
            self.enrollments.clone(),
            self.video_tokens.clone(),
            self.storage.clone(),
        )
    }

    pub fn list_certificates_handler(&self) -> ListCertificatesHandler {
        ListCertificatesHandler::new(self.certificates.clone())
    }

    pub fn download_certificate_handler(&self) -> DownloadCertificateHandler {
        DownloadCertificateHandler::new(self.certificates.clone(), self.storage.clone())
    }

    pub fn provision_admin_handler(&self) -> ProvisionAdminHandler {
        ProvisionAdminHandler::new(
            self.users.clone(),
            self.payments.clone(),
            self.payment_provider.clone(),
            self.admin_seat_settings.clone(),
        )
    }
}
