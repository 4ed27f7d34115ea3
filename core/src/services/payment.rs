//! Payment collaborator used by the checkout flow.
//!
//! Real processors live outside this crate; the checkout path only needs the
//! trait. The mock validates inputs and records what it was asked to charge.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::errors::{DomainError, DomainResult};

/// Collects payment for a stay at checkout
#[async_trait]
pub trait PaymentService: Send + Sync {
    async fn process_payment(&self, stay_id: i64, amount: f64, method: &str) -> DomainResult<()>;
}

/// A charge recorded by [`MockPaymentService`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPayment {
    pub stay_id: i64,
    pub amount: f64,
    pub method: String,
}

/// In-memory payment processor for testing. Validates inputs, then either
/// records the charge or declines everything, depending on construction.
pub struct MockPaymentService {
    payments: RwLock<Vec<RecordedPayment>>,
    decline_all: bool,
}

impl MockPaymentService {
    pub fn new() -> Self {
        Self {
            payments: RwLock::new(Vec::new()),
            decline_all: false,
        }
    }

    /// A processor that declines every charge, for failure-path tests
    pub fn declining() -> Self {
        Self {
            payments: RwLock::new(Vec::new()),
            decline_all: true,
        }
    }

    /// Charges accepted so far
    pub async fn recorded(&self) -> Vec<RecordedPayment> {
        self.payments.read().await.clone()
    }
}

impl Default for MockPaymentService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentService for MockPaymentService {
    async fn process_payment(&self, stay_id: i64, amount: f64, method: &str) -> DomainResult<()> {
        if stay_id <= 0 {
            return Err(DomainError::validation("Invalid stay id for payment"));
        }
        if amount < 0.0 {
            return Err(DomainError::validation(
                "Payment amount cannot be negative",
            ));
        }
        if method.trim().is_empty() {
            return Err(DomainError::validation("Payment method cannot be empty"));
        }

        if self.decline_all {
            return Err(DomainError::Payment {
                stay_id,
                message: "payment declined".to_string(),
            });
        }

        self.payments.write().await.push(RecordedPayment {
            stay_id,
            amount,
            method: method.to_string(),
        });
        info!(stay_id, amount, method, "payment processed");
        Ok(())
    }
}
