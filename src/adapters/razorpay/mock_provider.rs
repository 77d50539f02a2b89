//! Mock payment provider for tests and offline development.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{
    CreateOrderRequest, CreatePaymentLinkRequest, PaymentProvider, ProviderError, ProviderOrder,
    ProviderPaymentLink,
};

/// Deterministic in-process payment provider.
///
/// Hands out sequentially numbered order and link ids, and can be switched
/// into a failing mode to exercise provider-outage paths.
#[derive(Default)]
pub struct MockPaymentProvider {
    counter: AtomicU32,
    fail_with: Mutex<Option<ProviderError>>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with the given error.
    pub fn failing(error: ProviderError) -> Self {
        Self {
            counter: AtomicU32::new(0),
            fail_with: Mutex::new(Some(error)),
        }
    }

    fn check_failure(&self) -> Result<(), ProviderError> {
        match &*self.fail_with.lock().unwrap() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn next(&self) -> u32 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<ProviderOrder, ProviderError> {
        self.check_failure()?;
        Ok(ProviderOrder {
            id: format!("order_mock_{:06}", self.next()),
            amount_minor: request.amount * 100,
            currency: request.currency,
        })
    }

    async fn create_payment_link(
        &self,
        request: CreatePaymentLinkRequest,
    ) -> Result<ProviderPaymentLink, ProviderError> {
        self.check_failure()?;
        let id = format!("plink_mock_{:06}", self.next());
        Ok(ProviderPaymentLink {
            url: format!("https://pay.mock.test/{}?ref={}", id, request.reference_id),
            id,
        })
    }
}
