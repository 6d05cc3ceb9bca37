//! PostgreSQL persistence adapters implementing the domain's driven ports.

mod diesel_honour_repository;
mod diesel_nomination_repository;
mod diesel_review_comment_repository;
mod diesel_user_repository;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_honour_repository::DieselHonourRepository;
pub use diesel_nomination_repository::DieselNominationRepository;
pub use diesel_review_comment_repository::DieselReviewCommentRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
