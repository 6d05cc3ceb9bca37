//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct that generates the OpenAPI specification for
//! the REST API: all HTTP endpoints from the inbound layer, the response and
//! request schemas, and the session cookie security scheme. Swagger UI serves
//! the document in debug builds only.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::error::{Error, ErrorCode};
use crate::inbound::http::auth::{LoginBody, RegisterBody};
use crate::inbound::http::honours::AwardBody;
use crate::inbound::http::nominations::{SubmitBody, TransitionBody};
use crate::inbound::http::reviews::AddCommentBody;
use crate::inbound::http::schemas::{
    CommentResponse, HonourResponse, NominationResponse, NominationWithCommentsResponse,
    UserResponse,
};
use crate::inbound::http::users::SetPermissionBody;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Honours backend API",
        description = "HTTP interface for nomination submission, committee \
                       review, and the public honours archive."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::me,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::set_permission,
        crate::inbound::http::nominations::list_nominations,
        crate::inbound::http::nominations::submit_nomination,
        crate::inbound::http::nominations::transition_nomination,
        crate::inbound::http::nominations::delete_nomination,
        crate::inbound::http::nominations::list_under_review,
        crate::inbound::http::reviews::list_comments,
        crate::inbound::http::reviews::add_comment,
        crate::inbound::http::honours::search_honours,
        crate::inbound::http::honours::award_honour,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        UserResponse,
        NominationResponse,
        NominationWithCommentsResponse,
        CommentResponse,
        HonourResponse,
        LoginBody,
        RegisterBody,
        SetPermissionBody,
        SubmitBody,
        TransitionBody,
        AddCommentBody,
        AwardBody,
    )),
    tags(
        (name = "auth", description = "Registration, login, and session state"),
        (name = "users", description = "Account listing and permission management"),
        (name = "nominations", description = "Nomination submission and review workflow"),
        (name = "reviews", description = "Committee review comments"),
        (name = "honours", description = "The public honours archive"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::ApiDoc;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn user_schema_omits_the_password_hash() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user_schema = schemas.get("UserResponse").expect("UserResponse schema");

        assert_object_schema_has_field(user_schema, "robloxUsername");
        assert_object_schema_has_field(user_schema, "permission");
        match user_schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(!obj.properties.contains_key("passwordHash"));
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn every_workflow_path_is_registered() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/login",
            "/api/auth/register",
            "/api/auth/logout",
            "/api/auth/me",
            "/api/users",
            "/api/users/{id}/permission",
            "/api/nominations",
            "/api/nominations/{id}/status",
            "/api/nominations/{id}",
            "/api/nominations/under-review",
            "/api/reviews",
            "/api/honours",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "path {path} should be documented"
            );
        }
    }
}
