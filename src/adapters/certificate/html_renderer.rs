//! HTML certificate renderer.
//!
//! Renders a self-contained HTML document. The artifact carries the student
//! name, course title, certificate number, issue date, issuer name, and an
//! optional signature image reference.

use crate::domain::certificate::CertificateContent;
use crate::domain::foundation::DomainError;
use crate::ports::CertificateRenderer;

/// Renders certificates as standalone HTML documents.
#[derive(Default)]
pub struct HtmlCertificateRenderer;

impl HtmlCertificateRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl CertificateRenderer for HtmlCertificateRenderer {
    fn render(&self, content: &CertificateContent) -> Result<Vec<u8>, DomainError> {
        let signature_block = match &content.signature_image_path {
            Some(path) => format!(
                r#"<img class="signature" src="/media/file/{}" alt="signature">"#,
                escape(path)
            ),
            None => String::new(),
        };

        let html = format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Certificate {number}</title>
<style>
  body {{ font-family: Georgia, serif; text-align: center; margin: 4rem; }}
  .frame {{ border: 6px double #2b2b2b; padding: 4rem 3rem; }}
  h1 {{ font-size: 2.4rem; letter-spacing: 0.08em; }}
  .student {{ font-size: 1.8rem; font-weight: bold; margin: 1.2rem 0; }}
  .meta {{ color: #555; margin-top: 2rem; }}
  .issuer {{ margin-top: 3rem; text-align: left; }}
  .signature {{ max-height: 60px; display: block; margin-bottom: 0.4rem; }}
</style>
</head>
<body>
<div class="frame">
  <h1>Certificate of Completion</h1>
  <p>This certifies that</p>
  <p class="student">{student}</p>
  <p>has successfully completed the course &lsquo;{course}&rsquo;</p>
  <p class="meta">Certificate No: {number}<br>Issued on: {issued}</p>
  <div class="issuer">
    {signature_block}
    <span>Teacher: {issuer}</span>
  </div>
</div>
</body>
</html>
"#,
            student = escape(&content.student_name),
            course = escape(&content.course_title),
            number = escape(&content.certificate_no),
            issued = escape(&content.issued_on),
            issuer = escape(&content.issuer_name),
            signature_block = signature_block,
        );
        Ok(html.into_bytes())
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
