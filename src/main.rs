//! Courseflow server binary.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use courseflow::adapters::certificate::{HtmlCertificateRenderer, LocalFileStorage};
use courseflow::adapters::http::{app_router, state::AppState};
use courseflow::adapters::postgres::{
    PostgresCatalogReader, PostgresCertificateRepository, PostgresEnrollmentRepository,
    PostgresPaymentRepository, PostgresProgressRepository, PostgresUserDirectory,
};
use courseflow::adapters::razorpay::{RazorpayClient, RazorpayConfig};
use courseflow::application::handlers::admin::AdminSeatSettings;
use courseflow::application::handlers::certificate::CertificateSettings;
use courseflow::application::handlers::enrollment::CheckoutSettings;
use courseflow::application::handlers::media::PlaybackSettings;
use courseflow::config::AppConfig;
use courseflow::domain::media::VideoTokenService;
use courseflow::domain::payment::SignatureVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "courseflow=info,tower_http=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let state = AppState {
        catalog: Arc::new(PostgresCatalogReader::new(pool.clone())),
        enrollments: Arc::new(PostgresEnrollmentRepository::new(pool.clone())),
        payments: Arc::new(PostgresPaymentRepository::new(pool.clone())),
        progress: Arc::new(PostgresProgressRepository::new(pool.clone())),
        certificates: Arc::new(PostgresCertificateRepository::new(pool.clone())),
        users: Arc::new(PostgresUserDirectory::new(pool.clone())),
        payment_provider: Arc::new(RazorpayClient::new(RazorpayConfig::new(
            config.payment.key_id.clone(),
            config.payment.key_secret.clone(),
        ))),
        storage: Arc::new(LocalFileStorage::new(config.media.storage_path.clone())),
        certificate_renderer: Arc::new(HtmlCertificateRenderer::new()),
        signature_verifier: Arc::new(SignatureVerifier::new(
            config.payment.key_secret.clone(),
            config.payment.webhook_secret.clone(),
            config.payment.allow_unverified_webhooks,
        )),
        video_tokens: Arc::new(VideoTokenService::new(
            config.media.video_signing_secret.clone(),
        )),
        checkout_settings: CheckoutSettings {
            key_id: config.payment.key_id.clone(),
            currency: config.payment.currency.clone(),
            commission_pct: config.payment.commission_pct,
        },
        playback_settings: PlaybackSettings {
            public_base_url: config.server.public_base_url.clone(),
            token_ttl_secs: config.media.token_ttl_secs,
        },
        certificate_settings: CertificateSettings {
            issuer_name: config.certificate.issuer_name.clone(),
            signature_image_path: config.certificate.signature_image_path.clone(),
        },
        admin_seat_settings: AdminSeatSettings {
            price: config.payment.admin_seat_price,
            currency: config.payment.currency.clone(),
        },
        auth_secret: config.auth.jwt_secret.clone(),
    };

    let app = app_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "courseflow listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
