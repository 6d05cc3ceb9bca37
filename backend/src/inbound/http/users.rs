//! User administration handlers: listing accounts and changing tiers.

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::tier::PermissionTier;
use crate::domain::user::UserId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::UserResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body for `PUT /api/users/{id}/permission`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetPermissionBody {
    /// Target tier wire string: `User`, `Honours Committee`, or `Admin`.
    #[schema(value_type = String, example = "Honours Committee")]
    pub permission: String,
}

/// List every registered account. Admin only.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Insufficient permission", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let actor = session.require_user_id()?;
    let users = state.users.list_users(&actor).await?;
    Ok(web::Json(users.into_iter().map(Into::into).collect()))
}

/// Change a user's permission tier. Admin only; takes effect on the
/// target's next request because tiers are read from storage, not the
/// session.
#[utoipa::path(
    put,
    path = "/api/users/{id}/permission",
    params(("id" = Uuid, Path, description = "Target user identifier")),
    request_body = SetPermissionBody,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Unknown permission tier", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Insufficient permission", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "setPermission"
)]
#[put("/users/{id}/permission")]
pub async fn set_permission(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: web::Json<SetPermissionBody>,
) -> ApiResult<web::Json<UserResponse>> {
    let actor = session.require_user_id()?;
    let permission = payload.permission.parse::<PermissionTier>().map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "permission", "code": "unknown_tier" }))
    })?;
    let target = UserId::from_uuid(path.into_inner());
    let updated = state
        .permissions
        .set_permission(&actor, &target, permission)
        .await?;
    Ok(web::Json(updated.into()))
}
