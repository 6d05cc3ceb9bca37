//! In-memory adapters and fixtures shared by unit, handler, and
//! integration tests.
//!
//! Compiled only for tests and the `test-support` feature; nothing here is
//! reachable from a release build.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::honour::{Honour, HonourFilter};
use crate::domain::nomination::{Nomination, NominationFilter};
use crate::domain::ports::{
    HonourPersistenceError, HonourRepository, NominationPersistenceError, NominationRepository,
    PasswordHasher, PasswordHasherError, ReviewCommentPersistenceError, ReviewCommentRepository,
    UserPersistenceError, UserRepository,
};
use crate::domain::review::ReviewComment;
use crate::domain::status::NominationStatus;
use crate::domain::tier::PermissionTier;
use crate::domain::user::{DiscordUsername, RobloxUsername, User, UserId};

/// Transparent hasher for tests: "hashes" are the password wrapped in a
/// recognisable marker, so assertions stay readable.
#[derive(Debug, Default)]
pub struct FakePasswordHasher;

impl PasswordHasher for FakePasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHasherError> {
        Ok(format!("fake:{password}"))
    }

    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordHasherError> {
        let Some(stored) = stored_hash.strip_prefix("fake:") else {
            return Err(PasswordHasherError::hash("unrecognised hash format"));
        };
        Ok(stored == password)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Test doubles never hold the lock across a panic point.
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Mutex-backed user store honouring the unique-handle constraint.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = lock(&self.users);
        let duplicate = users
            .iter()
            .any(|u| u.roblox_username() == user.roblox_username());
        if duplicate {
            return Err(UserPersistenceError::DuplicateHandle);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(lock(&self.users).iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_roblox_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(lock(&self.users)
            .iter()
            .find(|u| u.roblox_username().as_ref() == username)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut users: Vec<User> = lock(&self.users).clone();
        users.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(users)
    }

    async fn update_permission(
        &self,
        id: &UserId,
        permission: PermissionTier,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut users = lock(&self.users);
        let Some(user) = users.iter_mut().find(|u| u.id() == id) else {
            return Ok(None);
        };
        *user = user.clone().with_permission(permission);
        Ok(Some(user.clone()))
    }
}

/// Mutex-backed nomination store.
#[derive(Debug, Default)]
pub struct InMemoryNominationRepository {
    nominations: Mutex<Vec<Nomination>>,
}

impl InMemoryNominationRepository {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NominationRepository for InMemoryNominationRepository {
    async fn insert(&self, nomination: &Nomination) -> Result<(), NominationPersistenceError> {
        lock(&self.nominations).push(nomination.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Nomination>, NominationPersistenceError> {
        Ok(lock(&self.nominations)
            .iter()
            .find(|n| n.id == id)
            .cloned())
    }

    async fn list(
        &self,
        filter: NominationFilter,
    ) -> Result<Vec<Nomination>, NominationPersistenceError> {
        let mut matched: Vec<Nomination> = lock(&self.nominations)
            .iter()
            .filter(|n| filter.status.is_none_or(|s| n.status == s))
            .filter(|n| filter.field.is_none_or(|f| n.fields.contains(&f)))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: NominationStatus,
    ) -> Result<Option<Nomination>, NominationPersistenceError> {
        let mut nominations = lock(&self.nominations);
        let Some(nomination) = nominations.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        nomination.status = status;
        Ok(Some(nomination.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, NominationPersistenceError> {
        let mut nominations = lock(&self.nominations);
        let before = nominations.len();
        nominations.retain(|n| n.id != id);
        Ok(nominations.len() < before)
    }
}

/// Mutex-backed review-comment log.
#[derive(Debug, Default)]
pub struct InMemoryReviewCommentRepository {
    comments: Mutex<HashMap<Uuid, Vec<ReviewComment>>>,
}

impl InMemoryReviewCommentRepository {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewCommentRepository for InMemoryReviewCommentRepository {
    async fn insert(&self, comment: &ReviewComment) -> Result<(), ReviewCommentPersistenceError> {
        lock(&self.comments)
            .entry(comment.nomination_id)
            .or_default()
            .push(comment.clone());
        Ok(())
    }

    async fn list_for_nomination(
        &self,
        nomination_id: Uuid,
    ) -> Result<Vec<ReviewComment>, ReviewCommentPersistenceError> {
        Ok(lock(&self.comments)
            .get(&nomination_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Mutex-backed honours ledger with in-process search.
#[derive(Debug, Default)]
pub struct InMemoryHonourRepository {
    honours: Mutex<Vec<Honour>>,
}

impl InMemoryHonourRepository {
    /// Empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HonourRepository for InMemoryHonourRepository {
    async fn insert(&self, honour: &Honour) -> Result<(), HonourPersistenceError> {
        lock(&self.honours).push(honour.clone());
        Ok(())
    }

    async fn search(&self, filter: &HonourFilter) -> Result<Vec<Honour>, HonourPersistenceError> {
        let term = filter.search.as_deref().map(str::to_lowercase);
        let mut matched: Vec<Honour> = lock(&self.honours)
            .iter()
            .filter(|h| {
                term.as_deref().is_none_or(|t| {
                    h.roblox_username.as_ref().to_lowercase().contains(t)
                        || h.discord_username.as_ref().to_lowercase().contains(t)
                })
            })
            .filter(|h| filter.field.is_none_or(|f| h.field == f))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.awarded_at.cmp(&a.awarded_at));
        Ok(matched)
    }
}

/// Insert a user with the given handle and tier; the password is `hunter2`
/// hashed by [`FakePasswordHasher`].
pub async fn seed_user(
    repo: &Arc<InMemoryUserRepository>,
    roblox: &str,
    tier: PermissionTier,
) -> User {
    let user = User::new(
        UserId::random(),
        RobloxUsername::new(roblox).expect("valid roblox handle"),
        DiscordUsername::new(format!("@{}", roblox.replace('_', "."))).expect("valid discord handle"),
        "fake:hunter2".to_owned(),
        tier,
        chrono::Utc::now(),
    );
    repo.insert(&user).await.expect("insert seeded user");
    user
}
