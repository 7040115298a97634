//! Driving port for recording purchases against the loyalty ledger.

use async_trait::async_trait;

use crate::domain::{AccountId, PurchaseAmount, PurchaseReceipt, ServiceError, StaffMember};

/// Use-case port for purchase registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoyaltyLedger: Send + Sync {
    /// Count a qualifying purchase for the customer `customer_id`.
    async fn record_purchase(
        &self,
        staff: &StaffMember,
        customer_id: AccountId,
        amount: PurchaseAmount,
    ) -> Result<PurchaseReceipt, ServiceError>;
}
