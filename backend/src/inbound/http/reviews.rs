//! Review-comment handlers: public log reads and committee appends.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::review::{CommentText, CommentValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::CommentResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query string accepted by `GET /api/reviews`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQueryParams {
    /// Nomination whose comments to list. Required.
    pub nomination_id: Option<Uuid>,
}

/// Request body for `POST /api/reviews`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentBody {
    /// Nomination the comment attaches to.
    pub nomination_id: Uuid,
    /// Comment text, at most 500 characters.
    pub comment: String,
}

/// List the comments attached to a nomination, oldest first.
///
/// Deliberately unauthenticated: the review log is public record once
/// written.
#[utoipa::path(
    get,
    path = "/api/reviews",
    params(ReviewQueryParams),
    responses(
        (status = 200, description = "Comments", body = [CommentResponse]),
        (status = 400, description = "Missing nominationId", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "listReviewComments",
    security([])
)]
#[get("/reviews")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    query: web::Query<ReviewQueryParams>,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    let Some(nomination_id) = query.nomination_id else {
        return Err(Error::invalid_request("nominationId is required")
            .with_details(json!({ "field": "nominationId", "code": "missing_parameter" })));
    };
    let comments = state.reviews_query.comments_for(nomination_id).await?;
    Ok(web::Json(comments.into_iter().map(Into::into).collect()))
}

/// Append a committee comment to a nomination.
#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = AddCommentBody,
    responses(
        (status = 201, description = "Comment appended", body = CommentResponse),
        (status = 400, description = "Invalid comment", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Insufficient permission", body = Error),
        (status = 404, description = "Nomination not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "addReviewComment"
)]
#[post("/reviews")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AddCommentBody>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let body = payload.into_inner();
    let comment = CommentText::new(&body.comment).map_err(map_comment_validation_error)?;
    let record = state
        .reviews
        .add_comment(&actor, body.nomination_id, comment)
        .await?;
    Ok(HttpResponse::Created().json(CommentResponse::from(record)))
}

fn map_comment_validation_error(err: CommentValidationError) -> Error {
    let code = match err {
        CommentValidationError::EmptyComment => "empty_comment",
        CommentValidationError::CommentTooLong => "comment_too_long",
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "comment", "code": code }))
}
