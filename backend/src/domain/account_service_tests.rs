//! Unit tests for [`AccountService`] over in-memory doubles.

use std::sync::Arc;

use rstest::rstest;

use super::account_service::AccountService;
use super::auth::{LoginCredentials, RegistrationRequest};
use super::error::ErrorCode;
use super::ports::{LoginService, PermissionCommand, RegistrationService, UsersQuery};
use super::tier::PermissionTier;
use super::user::UserId;
use crate::test_support::{FakePasswordHasher, InMemoryUserRepository, seed_user};

fn service() -> (AccountService, Arc<InMemoryUserRepository>) {
    let users = Arc::new(InMemoryUserRepository::new());
    let service = AccountService::new(users.clone(), Arc::new(FakePasswordHasher));
    (service, users)
}

#[actix_rt::test]
async fn registration_creates_a_user_tier_account() {
    let (service, _) = service();
    let request = RegistrationRequest::try_from_parts("builder_ben", "@builder.ben", "hunter2")
        .expect("valid request");
    let user = service.register(request).await.expect("registration");
    assert_eq!(user.permission(), PermissionTier::User);
    assert!(!user.is_admin());
    assert_ne!(user.password_hash(), "hunter2");
}

#[actix_rt::test]
async fn duplicate_handle_registration_conflicts() {
    let (service, users) = service();
    seed_user(&users, "builder_ben", PermissionTier::User).await;
    let request = RegistrationRequest::try_from_parts("builder_ben", "@other.ben", "hunter2")
        .expect("valid request");
    let err = service.register(request).await.expect_err("must conflict");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[actix_rt::test]
async fn login_succeeds_with_correct_password() {
    let (service, users) = service();
    let seeded = seed_user(&users, "builder_ben", PermissionTier::User).await;
    let creds = LoginCredentials::try_from_parts("builder_ben", "hunter2").expect("credentials");
    let user = service.authenticate(&creds).await.expect("login");
    assert_eq!(user.id(), seeded.id());
}

#[rstest]
#[case("builder_ben", "wrong-password")]
#[case("no_such_user", "hunter2")]
#[actix_rt::test]
async fn login_failures_share_a_generic_error(#[case] username: &str, #[case] password: &str) {
    let (service, users) = service();
    seed_user(&users, "builder_ben", PermissionTier::User).await;
    let creds = LoginCredentials::try_from_parts(username, password).expect("credentials");
    let err = service.authenticate(&creds).await.expect_err("must fail");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), "invalid credentials");
}

#[actix_rt::test]
async fn listing_users_requires_admin() {
    let (service, users) = service();
    let member = seed_user(&users, "plain_member", PermissionTier::User).await;
    let committee = seed_user(&users, "committee_kim", PermissionTier::HonoursCommittee).await;
    let admin = seed_user(&users, "admin_alice", PermissionTier::Admin).await;

    for actor in [member.id(), committee.id()] {
        let err = service.list_users(actor).await.expect_err("must be refused");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
    let listed = service.list_users(admin.id()).await.expect("admin listing");
    assert_eq!(listed.len(), 3);
}

#[actix_rt::test]
async fn unknown_session_subject_reads_as_unauthenticated() {
    let (service, _) = service();
    let err = service
        .list_users(&UserId::random())
        .await
        .expect_err("must be refused");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[actix_rt::test]
async fn permission_change_takes_immediate_effect() {
    let (service, users) = service();
    let admin = seed_user(&users, "admin_alice", PermissionTier::Admin).await;
    let member = seed_user(&users, "plain_member", PermissionTier::User).await;

    let err = service
        .list_users(member.id())
        .await
        .expect_err("member cannot list");
    assert_eq!(err.code(), ErrorCode::Forbidden);

    let updated = service
        .set_permission(admin.id(), member.id(), PermissionTier::Admin)
        .await
        .expect("permission update");
    assert!(updated.is_admin());

    service
        .list_users(member.id())
        .await
        .expect("promoted member can now list");
}

#[actix_rt::test]
async fn permission_change_rejects_non_admin_actor_and_unknown_target() {
    let (service, users) = service();
    let admin = seed_user(&users, "admin_alice", PermissionTier::Admin).await;
    let member = seed_user(&users, "plain_member", PermissionTier::User).await;

    let err = service
        .set_permission(member.id(), admin.id(), PermissionTier::User)
        .await
        .expect_err("non-admin must be refused");
    assert_eq!(err.code(), ErrorCode::Forbidden);

    let err = service
        .set_permission(admin.id(), &UserId::random(), PermissionTier::Admin)
        .await
        .expect_err("unknown target");
    assert_eq!(err.code(), ErrorCode::NotFound);
}
