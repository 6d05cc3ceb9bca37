//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{AccountService, FinalisePolicy, HonourService, NominationService};
use crate::inbound::http::auth::{login, logout, me, register};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::honours::{award_honour, search_honours};
use crate::inbound::http::nominations::{
    delete_nomination, list_nominations, list_under_review, submit_nomination,
    transition_nomination,
};
use crate::inbound::http::reviews::{add_comment, list_comments};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{list_users, set_permission};
use crate::middleware::Trace;
use crate::outbound::crypto::Argon2PasswordHasher;
use crate::outbound::persistence::{
    DbPool, DieselHonourRepository, DieselNominationRepository, DieselReviewCommentRepository,
    DieselUserRepository,
};

/// Wire database-backed adapters into the domain services.
fn build_http_state(pool: &DbPool, policy: FinalisePolicy) -> web::Data<HttpState> {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let nominations = Arc::new(DieselNominationRepository::new(pool.clone()));
    let reviews = Arc::new(DieselReviewCommentRepository::new(pool.clone()));
    let honours = Arc::new(DieselHonourRepository::new(pool.clone()));
    let hasher = Arc::new(Argon2PasswordHasher::new());

    let accounts = Arc::new(AccountService::new(users.clone(), hasher));
    let nominations = Arc::new(NominationService::new(
        nominations,
        reviews,
        users.clone(),
        policy,
    ));
    let honours = Arc::new(HonourService::new(honours, users));

    web::Data::new(HttpState::from_services(accounts, nominations, honours))
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    // `/nominations/under-review` must register before the `{id}` routes so
    // the literal segment wins.
    let api = web::scope("/api")
        .wrap(session)
        .service(login)
        .service(register)
        .service(logout)
        .service(me)
        .service(list_users)
        .service(set_permission)
        .service(list_under_review)
        .service(list_nominations)
        .service(submit_nomination)
        .service(transition_nomination)
        .service(delete_nomination)
        .service(list_comments)
        .service(add_comment)
        .service(search_honours)
        .service(award_honour);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool,
        finalise_policy,
    } = config;
    let http_state = build_http_state(&db_pool, finalise_policy);

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
