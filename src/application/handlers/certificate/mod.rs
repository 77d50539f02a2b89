//! Certificate issuance and queries.

mod get_certificates;
mod issue_certificate;

pub use get_certificates::{
    CertificateDownload, DownloadCertificateHandler, ListCertificatesHandler,
};
pub use issue_certificate::{CertificateSettings, IssueCertificateHandler};
