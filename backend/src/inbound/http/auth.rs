//! Authentication handlers: register, login, logout, and session
//! introspection.
//!
//! ```text
//! POST /api/auth/register {"robloxUsername":"x","discordUsername":"@x","password":"pw"}
//! POST /api/auth/login    {"username":"x","password":"pw"}
//! POST /api/auth/logout
//! GET  /api/auth/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::auth::{AuthValidationError, LoginCredentials, RegistrationRequest};
use crate::domain::error::Error;
use crate::domain::user::HandleValidationError;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::UserResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    /// Roblox handle used at registration.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Registration request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    /// Desired Roblox handle, unique across accounts.
    pub roblox_username: String,
    /// Discord handle, `@name` or legacy `name#1234`.
    pub discord_username: String,
    /// Plaintext password.
    pub password: String,
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Login success", body = UserResponse,
         headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginBody>,
) -> ApiResult<web::Json<UserResponse>> {
    let body = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&body.username, &body.password)
        .map_err(map_auth_validation_error)?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(user.id())?;
    Ok(web::Json(user.into()))
}

/// Create an account and establish a session.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterBody,
    responses(
        (status = 201, description = "Account created", body = UserResponse,
         headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Handle already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let request = RegistrationRequest::try_from_parts(
        &body.roblox_username,
        &body.discord_username,
        &body.password,
    )
    .map_err(map_auth_validation_error)?;
    let user = state.registration.register(request).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// End the current session. Always succeeds, even without one.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Session ended")
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Return the account behind the current session.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not logged in", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/auth/me")]
pub async fn me(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let user = state
        .users
        .find_user(&user_id)
        .await?
        .ok_or_else(|| Error::unauthorized("session does not match a registered user"))?;
    Ok(web::Json(user.into()))
}

fn map_auth_validation_error(err: AuthValidationError) -> Error {
    match err {
        AuthValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        AuthValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
        AuthValidationError::Handle(HandleValidationError::InvalidRobloxUsername) => {
            Error::invalid_request(HandleValidationError::InvalidRobloxUsername.to_string())
                .with_details(json!({ "field": "robloxUsername", "code": "invalid_handle" }))
        }
        AuthValidationError::Handle(HandleValidationError::InvalidDiscordUsername) => {
            Error::invalid_request(HandleValidationError::InvalidDiscordUsername.to_string())
                .with_details(json!({ "field": "discordUsername", "code": "invalid_handle" }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test as actix_test};
    use serde_json::Value;

    use crate::inbound::http::test_utils::{seeded_test_state, test_session_middleware};

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .service(
                web::scope("/api")
                    .service(login)
                    .service(register)
                    .service(logout)
                    .service(me),
            )
    }

    #[actix_web::test]
    async fn register_then_me_round_trips_the_account() {
        let (state, _) = seeded_test_state().await;
        let app = actix_test::init_service(test_app(state)).await;

        let register_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(json!({
                    "robloxUsername": "fresh_recruit",
                    "discordUsername": "@fresh.recruit",
                    "password": "hunter2"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(register_res.status(), StatusCode::CREATED);
        let cookie = register_res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie");

        let me_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/auth/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(me_res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(me_res).await;
        assert_eq!(body["robloxUsername"], "fresh_recruit");
        assert_eq!(body["permission"], "User");
        assert_eq!(body["isAdmin"], false);
    }

    #[actix_web::test]
    async fn duplicate_registration_is_a_conflict() {
        let (state, _) = seeded_test_state().await;
        let app = actix_test::init_service(test_app(state)).await;
        let payload = json!({
            "robloxUsername": "plain_member",
            "discordUsername": "@someone.else",
            "password": "hunter2"
        });
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(payload)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "conflict");
    }

    #[actix_web::test]
    async fn invalid_handle_shapes_are_bad_requests() {
        let (state, _) = seeded_test_state().await;
        let app = actix_test::init_service(test_app(state)).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(json!({
                    "robloxUsername": "no",
                    "discordUsername": "@ok.handle",
                    "password": "hunter2"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "robloxUsername");
    }

    #[actix_web::test]
    async fn login_failures_are_generic() {
        let (state, _) = seeded_test_state().await;
        let app = actix_test::init_service(test_app(state)).await;
        for payload in [
            json!({ "username": "plain_member", "password": "wrong" }),
            json!({ "username": "no_such_user", "password": "hunter2" }),
        ] {
            let res = actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri("/api/auth/login")
                    .set_json(payload)
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
            let body: Value = actix_test::read_body_json(res).await;
            assert_eq!(body["message"], "invalid credentials");
        }
    }

    #[actix_web::test]
    async fn logout_invalidates_the_session() {
        let (state, _) = seeded_test_state().await;
        let app = actix_test::init_service(test_app(state)).await;

        let login_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({ "username": "plain_member", "password": "hunter2" }))
                .to_request(),
        )
        .await;
        assert_eq!(login_res.status(), StatusCode::OK);
        let cookie = login_res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie");

        let logout_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/auth/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(logout_res.status(), StatusCode::NO_CONTENT);
        let cleared = logout_res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("removal cookie");

        let me_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/auth/me")
                .cookie(cleared)
                .to_request(),
        )
        .await;
        assert_eq!(me_res.status(), StatusCode::UNAUTHORIZED);
    }
}
