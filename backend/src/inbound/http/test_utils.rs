//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::test as actix_test;
use serde_json::json;

use crate::domain::user::User;
use crate::domain::{AccountService, FinalisePolicy, HonourService, NominationService};
use crate::inbound::http::state::HttpState;
use crate::test_support::{
    FakePasswordHasher, InMemoryHonourRepository, InMemoryNominationRepository,
    InMemoryReviewCommentRepository, InMemoryUserRepository, seed_user,
};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Accounts seeded by [`seeded_test_state`], one per tier.
pub struct TestAccounts {
    /// `plain_member`, tier `User`.
    pub member: User,
    /// `committee_kim`, tier `Honours Committee`.
    pub committee: User,
    /// `admin_alice`, tier `Admin`.
    pub admin: User,
}

/// Build an [`HttpState`] over in-memory stores, seeded with one account per
/// tier. Every account's password is `hunter2`.
pub async fn seeded_test_state() -> (HttpState, TestAccounts) {
    let users = Arc::new(InMemoryUserRepository::new());
    let member = seed_user(&users, "plain_member", crate::domain::tier::PermissionTier::User).await;
    let committee = seed_user(
        &users,
        "committee_kim",
        crate::domain::tier::PermissionTier::HonoursCommittee,
    )
    .await;
    let admin = seed_user(&users, "admin_alice", crate::domain::tier::PermissionTier::Admin).await;

    let accounts = Arc::new(AccountService::new(
        users.clone(),
        Arc::new(FakePasswordHasher),
    ));
    let nominations = Arc::new(NominationService::new(
        Arc::new(InMemoryNominationRepository::new()),
        Arc::new(InMemoryReviewCommentRepository::new()),
        users.clone(),
        FinalisePolicy::default(),
    ));
    let honours = Arc::new(HonourService::new(
        Arc::new(InMemoryHonourRepository::new()),
        users,
    ));

    (
        HttpState::from_services(accounts, nominations, honours),
        TestAccounts {
            member,
            committee,
            admin,
        },
    )
}

/// Log in as a seeded account through `POST /api/auth/login` and return the
/// session cookie. The app under test must mount the auth handlers.
pub async fn login_cookie<S, B>(app: &S, username: &str) -> Cookie<'static>
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse<B>,
            Error = actix_web::Error,
        >,
{
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "username": username, "password": "hunter2" }))
            .to_request(),
    )
    .await;
    assert!(
        res.status().is_success(),
        "login failed for {username}: {}",
        res.status()
    );
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}
