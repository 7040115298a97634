//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they stay testable with mocks or in-memory adapters.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccessCodeRegistry, AccountRepository, AccountsQuery, LoginService, LoyaltyLedger,
    MenuCatalogue, MenuRepository, PasswordHasher, RegistrationService, StaffManagement,
};
use crate::domain::{AccountService, LoyaltyLedgerService, MenuService, StaffService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn AccountsQuery>,
    pub ledger: Arc<dyn LoyaltyLedger>,
    pub staff: Arc<dyn StaffManagement>,
    pub menu: Arc<dyn MenuCatalogue>,
}

/// Driven adapters the domain services are assembled from.
pub struct StateAdapters<R, C, H, M> {
    pub accounts: Arc<R>,
    pub codes: Arc<C>,
    pub hasher: Arc<H>,
    pub menu: Arc<M>,
    pub clock: Arc<dyn Clock>,
}

impl<R, C, H, M> From<StateAdapters<R, C, H, M>> for HttpState
where
    R: AccountRepository + 'static,
    C: AccessCodeRegistry + 'static,
    H: PasswordHasher + 'static,
    M: MenuRepository + 'static,
{
    fn from(adapters: StateAdapters<R, C, H, M>) -> Self {
        let StateAdapters {
            accounts,
            codes,
            hasher,
            menu,
            clock,
        } = adapters;
        let account_service = Arc::new(AccountService::new(accounts.clone(), codes, hasher));
        Self {
            registration: account_service.clone(),
            login: account_service.clone(),
            accounts: account_service,
            ledger: Arc::new(LoyaltyLedgerService::new(accounts.clone())),
            staff: Arc::new(StaffService::new(accounts)),
            menu: Arc::new(MenuService::new(menu, clock)),
        }
    }
}
