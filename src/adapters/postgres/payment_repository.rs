//! PostgreSQL implementation of PaymentRepository.
//!
//! `claim_created` is the concurrency-critical operation: it uses a
//! conditional update (`WHERE status = 'created'`) and the affected-row
//! count to guarantee exactly one winner under racing confirmations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    CourseId, DomainError, EnrollmentId, ErrorCode, OrganizationId, PaymentId, Timestamp, UserId,
};
use crate::domain::payment::{PaymentIntent, PaymentPurpose, PaymentStatus};
use crate::ports::PaymentRepository;

use super::map_db_error;

/// sqlx-backed payment intent store.
pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    purpose: String,
    enrollment_id: Option<Uuid>,
    course_id: Option<Uuid>,
    user_id: Option<Uuid>,
    organization_id: Option<Uuid>,
    amount: i64,
    commission: i64,
    currency: String,
    status: String,
    provider_order_id: Option<String>,
    provider_payment_id: Option<String>,
    provider_signature: Option<String>,
    payment_link_id: Option<String>,
    payment_link_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for PaymentIntent {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let purpose = match row.purpose.as_str() {
            "course_enrollment" => {
                let enrollment_id = row.enrollment_id.ok_or_else(|| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        "course_enrollment intent without enrollment_id",
                    )
                })?;
                let course_id = row.course_id.ok_or_else(|| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        "course_enrollment intent without course_id",
                    )
                })?;
                PaymentPurpose::CourseEnrollment {
                    enrollment_id: EnrollmentId::from_uuid(enrollment_id),
                    course_id: CourseId::from_uuid(course_id),
                }
            }
            "admin_subscription" => {
                let user_id = row.user_id.ok_or_else(|| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        "admin_subscription intent without user_id",
                    )
                })?;
                PaymentPurpose::AdminSubscription {
                    user_id: UserId::from_uuid(user_id),
                }
            }
            other => {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid payment purpose: {}", other),
                ))
            }
        };
        let status = PaymentStatus::parse(&row.status).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid payment status: {}", row.status),
            )
        })?;
        Ok(PaymentIntent {
            id: PaymentId::from_uuid(row.id),
            purpose,
            organization_id: row.organization_id.map(OrganizationId::from_uuid),
            amount: row.amount,
            commission: row.commission,
            currency: row.currency,
            status,
            provider_order_id: row.provider_order_id,
            provider_payment_id: row.provider_payment_id,
            provider_signature: row.provider_signature,
            payment_link_id: row.payment_link_id,
            payment_link_url: row.payment_link_url,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn purpose_columns(purpose: &PaymentPurpose) -> (Option<Uuid>, Option<Uuid>, Option<Uuid>) {
    match purpose {
        PaymentPurpose::CourseEnrollment {
            enrollment_id,
            course_id,
        } => (
            Some(*enrollment_id.as_uuid()),
            Some(*course_id.as_uuid()),
            None,
        ),
        PaymentPurpose::AdminSubscription { user_id } => (None, None, Some(*user_id.as_uuid())),
    }
}

const SELECT_COLUMNS: &str = "id, purpose, enrollment_id, course_id, user_id, organization_id, \
     amount, commission, currency, status, provider_order_id, provider_payment_id, \
     provider_signature, payment_link_id, payment_link_url, created_at, updated_at";

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn save(&self, intent: &PaymentIntent) -> Result<(), DomainError> {
        let (enrollment_id, course_id, user_id) = purpose_columns(&intent.purpose);
        sqlx::query(
            r#"
            INSERT INTO payments
                (id, purpose, enrollment_id, course_id, user_id, organization_id,
                 amount, commission, currency, status, provider_order_id,
                 provider_payment_id, provider_signature, payment_link_id,
                 payment_link_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(intent.id.as_uuid())
        .bind(intent.purpose.as_str())
        .bind(enrollment_id)
        .bind(course_id)
        .bind(user_id)
        .bind(intent.organization_id.as_ref().map(|o| *o.as_uuid()))
        .bind(intent.amount)
        .bind(intent.commission)
        .bind(&intent.currency)
        .bind(intent.status.as_str())
        .bind(&intent.provider_order_id)
        .bind(&intent.provider_payment_id)
        .bind(&intent.provider_signature)
        .bind(&intent.payment_link_id)
        .bind(&intent.payment_link_url)
        .bind(intent.created_at.as_datetime())
        .bind(intent.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }

    async fn update(&self, intent: &PaymentIntent) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET status = $2, provider_order_id = $3, provider_payment_id = $4,
                provider_signature = $5, payment_link_id = $6, payment_link_url = $7,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(intent.id.as_uuid())
        .bind(intent.status.as_str())
        .bind(&intent.provider_order_id)
        .bind(&intent.provider_payment_id)
        .bind(&intent.provider_signature)
        .bind(&intent.payment_link_id)
        .bind(&intent.payment_link_url)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("PaymentIntent"));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<PaymentIntent>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;
        row.map(PaymentIntent::try_from).transpose()
    }

    async fn find_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<PaymentIntent>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments WHERE provider_order_id = $1",
            SELECT_COLUMNS
        ))
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;
        row.map(PaymentIntent::try_from).transpose()
    }

    async fn find_by_enrollment(
        &self,
        enrollment_id: &EnrollmentId,
    ) -> Result<Option<PaymentIntent>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments WHERE enrollment_id = $1 ORDER BY created_at ASC LIMIT 1",
            SELECT_COLUMNS
        ))
        .bind(enrollment_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;
        row.map(PaymentIntent::try_from).transpose()
    }

    async fn claim_created(
        &self,
        id: &PaymentId,
        provider_payment_id: Option<&str>,
        provider_signature: Option<&str>,
    ) -> Result<bool, DomainError> {
        // Optimistic claim: only a row still in `created` is updated, so of
        // any number of racing confirmations exactly one sees rows_affected=1
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET status = 'paid',
                provider_payment_id = COALESCE($2, provider_payment_id),
                provider_signature = COALESCE($3, provider_signature),
                updated_at = now()
            WHERE id = $1 AND status = 'created'
            "#,
        )
        .bind(id.as_uuid())
        .bind(provider_payment_id)
        .bind(provider_signature)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }
}
