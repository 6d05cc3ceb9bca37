//! Domain ports for the hexagonal boundary.
//!
//! Driving ports are the use-case traits HTTP handlers call; driven ports
//! are the repository and hasher traits domain services call. Concrete
//! adapters live under `outbound/`.

mod honour_command;
mod honour_query;
mod honour_repository;
mod login_service;
mod nomination_command;
mod nomination_query;
mod nomination_repository;
mod password_hasher;
mod permission_command;
mod registration_service;
mod review_command;
mod review_comment_repository;
mod review_query;
mod user_repository;
mod users_query;

pub use honour_command::HonourCommand;
pub use honour_query::HonourQuery;
pub use honour_repository::{HonourPersistenceError, HonourRepository};
pub use login_service::LoginService;
pub use nomination_command::NominationCommand;
pub use nomination_query::NominationQuery;
pub use nomination_repository::{NominationPersistenceError, NominationRepository};
pub use password_hasher::{PasswordHasher, PasswordHasherError};
pub use permission_command::PermissionCommand;
pub use registration_service::RegistrationService;
pub use review_command::ReviewCommand;
pub use review_comment_repository::{ReviewCommentPersistenceError, ReviewCommentRepository};
pub use review_query::ReviewQuery;
pub use user_repository::{UserPersistenceError, UserRepository};
pub use users_query::UsersQuery;
