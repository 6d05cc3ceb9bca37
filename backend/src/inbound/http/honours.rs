//! Honours archive handlers: public search and admin awarding.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::error::Error;
use crate::domain::field::RecognitionField;
use crate::domain::honour::{AwardDraft, HonourFilter, HonourValidationError};
use crate::domain::user::HandleValidationError;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::HonourResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query string accepted by `GET /api/honours`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Case-insensitive substring matched against either recipient handle.
    pub search: Option<String>,
    /// Restrict to one recognition field.
    pub field: Option<String>,
}

impl SearchQuery {
    fn into_filter(self) -> Result<HonourFilter, Error> {
        let field = self
            .field
            .map(|raw| {
                raw.parse::<RecognitionField>().map_err(|err| {
                    Error::invalid_request(err.to_string())
                        .with_details(json!({ "field": "field", "code": "unknown_field" }))
                })
            })
            .transpose()?;
        let search = self.search.filter(|term| !term.trim().is_empty());
        Ok(HonourFilter { search, field })
    }
}

/// Request body for `POST /api/honours`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwardBody {
    /// Recipient's Roblox handle.
    pub roblox_username: String,
    /// Recipient's Discord handle.
    pub discord_username: String,
    /// Display title, at most 128 characters.
    pub title: String,
    /// Recognition field wire string.
    #[schema(value_type = String, example = "Military")]
    pub field: String,
    /// Optional citation text.
    pub description: Option<String>,
}

/// Public honours archive, newest first.
#[utoipa::path(
    get,
    path = "/api/honours",
    params(SearchQuery),
    responses(
        (status = 200, description = "Honours", body = [HonourResponse]),
        (status = 400, description = "Unknown field filter", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["honours"],
    operation_id = "searchHonours",
    security([])
)]
#[get("/honours")]
pub async fn search_honours(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<Vec<HonourResponse>>> {
    let filter = query.into_inner().into_filter()?;
    let honours = state.honours_query.search(filter).await?;
    Ok(web::Json(honours.into_iter().map(Into::into).collect()))
}

/// Record an awarded honour. Admin only.
#[utoipa::path(
    post,
    path = "/api/honours",
    request_body = AwardBody,
    responses(
        (status = 201, description = "Honour recorded", body = HonourResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Insufficient permission", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["honours"],
    operation_id = "awardHonour"
)]
#[post("/honours")]
pub async fn award_honour(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AwardBody>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let body = payload.into_inner();
    let field = body.field.parse::<RecognitionField>().map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "field", "code": "unknown_field" }))
    })?;
    let draft = AwardDraft::try_from_parts(
        &body.roblox_username,
        &body.discord_username,
        &body.title,
        field,
        body.description.as_deref(),
    )
    .map_err(map_honour_validation_error)?;
    let honour = state.honours.award(&actor, draft).await?;
    Ok(HttpResponse::Created().json(HonourResponse::from(honour)))
}

fn map_honour_validation_error(err: HonourValidationError) -> Error {
    let (field, code) = match &err {
        HonourValidationError::Handle(HandleValidationError::InvalidRobloxUsername) => {
            ("robloxUsername", "invalid_handle")
        }
        HonourValidationError::Handle(HandleValidationError::InvalidDiscordUsername) => {
            ("discordUsername", "invalid_handle")
        }
        HonourValidationError::EmptyTitle => ("title", "empty_title"),
        HonourValidationError::TitleTooLong => ("title", "title_too_long"),
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": field, "code": code }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test as actix_test};
    use serde_json::Value;

    use crate::inbound::http::test_utils::{login_cookie, seeded_test_state, test_session_middleware};

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
                    .service(crate::inbound::http::auth::login)
                    .service(search_honours)
                    .service(award_honour),
            )
    }

    fn award_payload(roblox: &str, discord: &str, field: &str) -> Value {
        json!({
            "robloxUsername": roblox,
            "discordUsername": discord,
            "title": "Military Cross",
            "field": field,
            "description": "held the line"
        })
    }

    #[actix_web::test]
    async fn awarding_requires_admin() {
        let (state, _) = seeded_test_state().await;
        let app = actix_test::init_service(test_app(state)).await;
        let committee = login_cookie(&app, "committee_kim").await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/honours")
                .cookie(committee)
                .set_json(award_payload("decorated_dan", "@decorated.dan", "Military"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn archive_search_is_public_and_case_insensitive() {
        let (state, _) = seeded_test_state().await;
        let app = actix_test::init_service(test_app(state)).await;
        let admin = login_cookie(&app, "admin_alice").await;

        for (roblox, discord, field) in [
            ("decorated_dan", "@decorated.dan", "Military"),
            ("envoy_erin", "@envoy.erin", "Diplomatic"),
        ] {
            let res = actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri("/api/honours")
                    .cookie(admin.clone())
                    .set_json(award_payload(roblox, discord, field))
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::CREATED);
        }

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/honours?search=DECORATED")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let found: Value = actix_test::read_body_json(res).await;
        assert_eq!(found.as_array().map(Vec::len), Some(1));
        assert_eq!(found[0]["robloxUsername"], "decorated_dan");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/honours?field=Diplomatic")
                .to_request(),
        )
        .await;
        let found: Value = actix_test::read_body_json(res).await;
        assert_eq!(found.as_array().map(Vec::len), Some(1));
        assert_eq!(found[0]["field"], "Diplomatic");
    }

    #[actix_web::test]
    async fn unknown_field_filter_is_a_bad_request() {
        let (state, _) = seeded_test_state().await;
        let app = actix_test::init_service(test_app(state)).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/honours?field=Sport")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
