//! Loyalty reward rules.
//!
//! Every eighth qualifying purchase earns a reward. A purchase qualifies when
//! its amount is at least [`QUALIFYING_AMOUNT`]. The count only ever grows by
//! one per qualifying purchase; rewards are never "spent", so
//! [`has_unclaimed_reward`] stays true once the first cycle completes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Account, AccountId, DisplayName, Money, PurchaseCount, StaffMember};

/// Purchases per reward.
pub const REWARD_CYCLE: u32 = 8;

/// Smallest amount that counts towards a reward (100.00).
pub const QUALIFYING_AMOUNT: Money = Money::from_minor_units(10_000);

/// Amount of a single purchase.
pub type PurchaseAmount = Money;

/// Whether a purchase of `amount` counts towards a reward.
#[must_use]
pub fn qualifies(amount: PurchaseAmount) -> bool {
    amount >= QUALIFYING_AMOUNT
}

/// Purchases left before the next reward.
///
/// Returns [`REWARD_CYCLE`], never zero, when `count` is a multiple of the
/// cycle: the reward for that multiple has already been earned.
///
/// # Examples
/// ```
/// use loyalty::domain::{purchases_until_reward, PurchaseCount};
///
/// assert_eq!(purchases_until_reward(PurchaseCount::new(3)), 5);
/// assert_eq!(purchases_until_reward(PurchaseCount::new(8)), 8);
/// ```
#[must_use]
pub const fn purchases_until_reward(count: PurchaseCount) -> u32 {
    REWARD_CYCLE - count.get() % REWARD_CYCLE
}

/// Whether the account has completed at least one reward cycle.
#[must_use]
pub const fn has_unclaimed_reward(count: PurchaseCount) -> bool {
    count.get() >= REWARD_CYCLE
}

/// Whether reaching `count` earns a reward.
#[must_use]
pub const fn reward_earned(count: PurchaseCount) -> bool {
    count.get() > 0 && count.get() % REWARD_CYCLE == 0
}

/// Outcome of a recorded purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    #[schema(value_type = i64, example = 12)]
    pub customer_id: AccountId,
    #[schema(value_type = String, example = "Luis")]
    pub customer_name: DisplayName,
    #[schema(value_type = String, example = "120.00")]
    pub amount: PurchaseAmount,
    #[schema(value_type = u32, example = 8)]
    pub new_count: PurchaseCount,
    pub reward_earned: bool,
    #[schema(example = 8)]
    pub purchases_until_reward: u32,
    #[schema(value_type = String, example = "Rosa")]
    pub recorded_by: DisplayName,
}

impl PurchaseReceipt {
    /// Build the receipt for `customer` after its count was incremented.
    #[must_use]
    pub fn new(customer: &Account, amount: PurchaseAmount, staff: &StaffMember) -> Self {
        let new_count = customer.purchase_count;
        Self {
            customer_id: customer.id,
            customer_name: customer.display_name.clone(),
            amount,
            new_count,
            reward_earned: reward_earned(new_count),
            purchases_until_reward: purchases_until_reward(new_count),
            recorded_by: staff.display_name().clone(),
        }
    }
}
