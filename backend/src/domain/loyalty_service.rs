//! Purchase registration against the loyalty ledger.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::loyalty::qualifies;
use crate::domain::ports::{AccountRepository, LoyaltyLedger};
use crate::domain::{AccountId, PurchaseAmount, PurchaseReceipt, Role, ServiceError, StaffMember};

/// Loyalty ledger service.
///
/// The increment and the read of the new count happen in one repository
/// call, so concurrent purchases for the same customer can never observe or
/// report the same count twice.
#[derive(Clone)]
pub struct LoyaltyLedgerService<R> {
    accounts: Arc<R>,
}

impl<R> LoyaltyLedgerService<R> {
    /// Create a new service backed by `accounts`.
    pub const fn new(accounts: Arc<R>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl<R> LoyaltyLedger for LoyaltyLedgerService<R>
where
    R: AccountRepository,
{
    async fn record_purchase(
        &self,
        staff: &StaffMember,
        customer_id: AccountId,
        amount: PurchaseAmount,
    ) -> Result<PurchaseReceipt, ServiceError> {
        if !qualifies(amount) {
            debug!(%customer_id, %amount, "purchase below qualifying amount");
            return Err(ServiceError::below_threshold(amount.to_string()));
        }

        let customer = self
            .accounts
            .increment_purchase_count(customer_id, Role::Customer)
            .await?
            .ok_or_else(|| ServiceError::not_found("customer not found"))?;

        let receipt = PurchaseReceipt::new(&customer, amount, staff);
        info!(
            %customer_id,
            new_count = %receipt.new_count,
            reward_earned = receipt.reward_earned,
            recorded_by = %staff.display_name(),
            "purchase recorded"
        );
        Ok(receipt)
    }
}
