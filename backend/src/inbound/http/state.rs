//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    HonourCommand, HonourQuery, LoginService, NominationCommand, NominationQuery,
    PermissionCommand, RegistrationService, ReviewCommand, ReviewQuery, UsersQuery,
};
use crate::domain::{AccountService, HonourService, NominationService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential checking.
    pub login: Arc<dyn LoginService>,
    /// Account creation.
    pub registration: Arc<dyn RegistrationService>,
    /// Account reads.
    pub users: Arc<dyn UsersQuery>,
    /// Tier administration.
    pub permissions: Arc<dyn PermissionCommand>,
    /// Nomination mutations.
    pub nominations: Arc<dyn NominationCommand>,
    /// Nomination reads.
    pub nominations_query: Arc<dyn NominationQuery>,
    /// Review-log appends.
    pub reviews: Arc<dyn ReviewCommand>,
    /// Review-log reads.
    pub reviews_query: Arc<dyn ReviewQuery>,
    /// Honour awards.
    pub honours: Arc<dyn HonourCommand>,
    /// Honour archive reads.
    pub honours_query: Arc<dyn HonourQuery>,
}

impl HttpState {
    /// Wire the state from the three domain services, each of which
    /// implements several driving ports.
    #[must_use]
    pub fn from_services(
        accounts: Arc<AccountService>,
        nominations: Arc<NominationService>,
        honours: Arc<HonourService>,
    ) -> Self {
        Self {
            login: accounts.clone(),
            registration: accounts.clone(),
            users: accounts.clone(),
            permissions: accounts,
            nominations: nominations.clone(),
            nominations_query: nominations.clone(),
            reviews: nominations.clone(),
            reviews_query: nominations,
            honours: honours.clone(),
            honours_query: honours,
        }
    }
}
