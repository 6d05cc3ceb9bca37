//! Nomination handlers: public listing, submission, status transitions,
//! deletion, and the committee review queue.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::field::RecognitionField;
use crate::domain::nomination::{NominationDraft, NominationFilter, NominationValidationError};
use crate::domain::status::NominationStatus;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{NominationResponse, NominationWithCommentsResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query string accepted by `GET /api/nominations`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Restrict to one lifecycle status.
    pub status: Option<String>,
    /// Restrict to nominations naming this recognition field.
    pub field: Option<String>,
}

impl ListQuery {
    fn into_filter(self) -> Result<NominationFilter, Error> {
        let status = self
            .status
            .map(|raw| {
                raw.parse::<NominationStatus>().map_err(|err| {
                    Error::invalid_request(err.to_string())
                        .with_details(json!({ "field": "status", "code": "unknown_status" }))
                })
            })
            .transpose()?;
        let field = self
            .field
            .map(|raw| {
                raw.parse::<RecognitionField>().map_err(|err| {
                    Error::invalid_request(err.to_string())
                        .with_details(json!({ "field": "field", "code": "unknown_field" }))
                })
            })
            .transpose()?;
        Ok(NominationFilter { status, field })
    }
}

/// Request body for `POST /api/nominations`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBody {
    /// Nominee's Roblox handle; format-checked, not required to be registered.
    pub nominee_roblox_username: String,
    /// One or more recognition field wire strings.
    #[schema(value_type = Vec<String>, example = json!(["Military", "Diplomatic"]))]
    pub fields: Vec<String>,
    /// Why the nominee deserves recognition, at most 500 characters.
    pub description: String,
}

/// Request body for `PATCH /api/nominations/{id}/status`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransitionBody {
    /// Target lifecycle status wire string.
    #[schema(value_type = String, example = "under_review")]
    pub status: String,
}

/// Public nomination listing, newest first.
#[utoipa::path(
    get,
    path = "/api/nominations",
    params(ListQuery),
    responses(
        (status = 200, description = "Nominations", body = [NominationResponse]),
        (status = 400, description = "Unknown status or field filter", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["nominations"],
    operation_id = "listNominations",
    security([])
)]
#[get("/nominations")]
pub async fn list_nominations(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<Vec<NominationResponse>>> {
    let filter = query.into_inner().into_filter()?;
    let nominations = state.nominations_query.list(filter).await?;
    Ok(web::Json(nominations.into_iter().map(Into::into).collect()))
}

/// Submit a nomination. The nominator is taken from the session, never the
/// request body.
#[utoipa::path(
    post,
    path = "/api/nominations",
    request_body = SubmitBody,
    responses(
        (status = 201, description = "Nomination created", body = NominationResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["nominations"],
    operation_id = "submitNomination"
)]
#[post("/nominations")]
pub async fn submit_nomination(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SubmitBody>,
) -> ApiResult<HttpResponse> {
    let nominator = session.require_user_id()?;
    let body = payload.into_inner();
    let fields = parse_fields(&body.fields)?;
    let draft = NominationDraft::try_from_parts(
        &body.nominee_roblox_username,
        fields,
        &body.description,
    )
    .map_err(map_nomination_validation_error)?;
    let nomination = state.nominations.submit(&nominator, draft).await?;
    Ok(HttpResponse::Created().json(NominationResponse::from(nomination)))
}

/// Move a nomination through its lifecycle.
#[utoipa::path(
    patch,
    path = "/api/nominations/{id}/status",
    params(("id" = Uuid, Path, description = "Nomination identifier")),
    request_body = TransitionBody,
    responses(
        (status = 200, description = "Updated nomination", body = NominationResponse),
        (status = 400, description = "Unknown status or illegal transition", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Insufficient permission", body = Error),
        (status = 404, description = "Nomination not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["nominations"],
    operation_id = "transitionNomination"
)]
#[patch("/nominations/{id}/status")]
pub async fn transition_nomination(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: web::Json<TransitionBody>,
) -> ApiResult<web::Json<NominationResponse>> {
    let actor = session.require_user_id()?;
    let target = payload.status.parse::<NominationStatus>().map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "status", "code": "unknown_status" }))
    })?;
    let nomination = state
        .nominations
        .transition(&actor, path.into_inner(), target)
        .await?;
    Ok(web::Json(nomination.into()))
}

/// Delete a nomination. Admin only.
#[utoipa::path(
    delete,
    path = "/api/nominations/{id}",
    params(("id" = Uuid, Path, description = "Nomination identifier")),
    responses(
        (status = 200, description = "Nomination removed"),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Insufficient permission", body = Error),
        (status = 404, description = "Nomination not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["nominations"],
    operation_id = "deleteNomination"
)]
#[delete("/nominations/{id}")]
pub async fn delete_nomination(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    state.nominations.delete(&actor, path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Committee review queue: nominations under review, with comments.
#[utoipa::path(
    get,
    path = "/api/nominations/under-review",
    responses(
        (status = 200, description = "Review queue", body = [NominationWithCommentsResponse]),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Insufficient permission", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["nominations"],
    operation_id = "listUnderReview"
)]
#[get("/nominations/under-review")]
pub async fn list_under_review(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<NominationWithCommentsResponse>>> {
    let actor = session.require_user_id()?;
    let queue = state.nominations_query.under_review(&actor).await?;
    Ok(web::Json(queue.into_iter().map(Into::into).collect()))
}

fn parse_fields(raw: &[String]) -> Result<Vec<RecognitionField>, Error> {
    raw.iter()
        .map(|value| {
            value.parse::<RecognitionField>().map_err(|err| {
                Error::invalid_request(err.to_string())
                    .with_details(json!({ "field": "fields", "code": "unknown_field" }))
            })
        })
        .collect()
}

fn map_nomination_validation_error(err: NominationValidationError) -> Error {
    let (field, code) = match &err {
        NominationValidationError::Nominee(_) => ("nomineeRobloxUsername", "invalid_handle"),
        NominationValidationError::EmptyFields => ("fields", "empty_fields"),
        NominationValidationError::EmptyDescription => ("description", "empty_description"),
        NominationValidationError::DescriptionTooLong => ("description", "description_too_long"),
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": field, "code": code }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test as actix_test};
    use serde_json::Value;

    use crate::inbound::http::test_utils::{TestAccounts, login_cookie, seeded_test_state, test_session_middleware};

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
                    // Registration order matters: the literal segment must
                    // win over the `{id}` pattern.
                    .service(list_under_review)
                    .service(list_nominations)
                    .service(submit_nomination)
                    .service(transition_nomination)
                    .service(delete_nomination),
            )
    }

    async fn seeded_app() -> (
        impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        TestAccounts,
    ) {
        let (state, accounts) = seeded_test_state().await;
        (actix_test::init_service(test_app(state)).await, accounts)
    }

    fn submit_payload() -> Value {
        json!({
            "nomineeRobloxUsername": "nominee_nick",
            "fields": ["Military"],
            "description": "held the line"
        })
    }

    #[actix_web::test]
    async fn anonymous_submission_is_unauthorised() {
        let (app, _) = seeded_app().await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/nominations")
                .set_json(submit_payload())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn submission_round_trips_camel_case_json() {
        let (app, _) = seeded_app().await;
        let cookie = login_cookie(&app, "plain_member").await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/nominations")
                .cookie(cookie)
                .set_json(submit_payload())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["status"], "pending");
        assert_eq!(body["nomineeRobloxUsername"], "nominee_nick");
        assert!(body.get("nominee_roblox_username").is_none());

        let list_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/nominations?status=pending&field=Military")
                .to_request(),
        )
        .await;
        assert_eq!(list_res.status(), StatusCode::OK);
        let listed: Value = actix_test::read_body_json(list_res).await;
        assert_eq!(listed.as_array().map(Vec::len), Some(1));
    }

    #[actix_web::test]
    async fn unknown_filter_values_are_bad_requests() {
        let (app, _) = seeded_app().await;
        for uri in [
            "/api/nominations?status=archived",
            "/api/nominations?field=Sport",
        ] {
            let res = actix_test::call_service(
                &app,
                actix_test::TestRequest::get().uri(uri).to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
            let body: Value = actix_test::read_body_json(res).await;
            assert_eq!(body["code"], "invalid_request");
        }
    }

    #[actix_web::test]
    async fn transition_enforces_permissions_and_edges() {
        let (app, _) = seeded_app().await;
        let member = login_cookie(&app, "plain_member").await;
        let admin = login_cookie(&app, "admin_alice").await;

        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/nominations")
                .cookie(member.clone())
                .set_json(submit_payload())
                .to_request(),
        )
        .await;
        let nomination: Value = actix_test::read_body_json(created).await;
        let id = nomination["id"].as_str().expect("id").to_owned();

        let forbidden = actix_test::call_service(
            &app,
            actix_test::TestRequest::patch()
                .uri(&format!("/api/nominations/{id}/status"))
                .cookie(member)
                .set_json(json!({ "status": "approved" }))
                .to_request(),
        )
        .await;
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        let illegal = actix_test::call_service(
            &app,
            actix_test::TestRequest::patch()
                .uri(&format!("/api/nominations/{id}/status"))
                .cookie(admin.clone())
                .set_json(json!({ "status": "approved" }))
                .to_request(),
        )
        .await;
        assert_eq!(illegal.status(), StatusCode::BAD_REQUEST);

        let triaged = actix_test::call_service(
            &app,
            actix_test::TestRequest::patch()
                .uri(&format!("/api/nominations/{id}/status"))
                .cookie(admin)
                .set_json(json!({ "status": "under_review" }))
                .to_request(),
        )
        .await;
        assert_eq!(triaged.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(triaged).await;
        assert_eq!(body["status"], "under_review");
    }

    #[actix_web::test]
    async fn deletion_requires_admin_and_an_existing_record() {
        let (app, _) = seeded_app().await;
        let member = login_cookie(&app, "plain_member").await;
        let admin = login_cookie(&app, "admin_alice").await;

        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/nominations")
                .cookie(member.clone())
                .set_json(submit_payload())
                .to_request(),
        )
        .await;
        let nomination: Value = actix_test::read_body_json(created).await;
        let id = nomination["id"].as_str().expect("id").to_owned();

        let forbidden = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/nominations/{id}"))
                .cookie(member)
                .to_request(),
        )
        .await;
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        let deleted = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/nominations/{id}"))
                .cookie(admin.clone())
                .to_request(),
        )
        .await;
        assert_eq!(deleted.status(), StatusCode::OK);

        let missing = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/nominations/{id}"))
                .cookie(admin)
                .to_request(),
        )
        .await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn review_queue_is_committee_only() {
        let (app, _) = seeded_app().await;
        let member = login_cookie(&app, "plain_member").await;
        let committee = login_cookie(&app, "committee_kim").await;

        let forbidden = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/nominations/under-review")
                .cookie(member)
                .to_request(),
        )
        .await;
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        let allowed = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/nominations/under-review")
                .cookie(committee)
                .to_request(),
        )
        .await;
        assert_eq!(allowed.status(), StatusCode::OK);
    }
}
