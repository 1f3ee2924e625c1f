//! OpenAPI document served at `/openapi.json`.

use crate::error::{ErrorBody, ErrorDetail};
use crate::model::{User, UserInput};
use crate::response::MessageBody;
use crate::routes::{HealthBody, ReadyBody};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student Management API",
        description = "CRUD over student records with request validation and health checks."
    ),
    paths(
        crate::handlers::user::create,
        crate::handlers::user::list,
        crate::handlers::user::read,
        crate::handlers::user::update,
        crate::handlers::user::delete,
        crate::routes::common::health,
        crate::routes::common::ready,
    ),
    components(schemas(User, UserInput, MessageBody, ErrorBody, ErrorDetail, HealthBody, ReadyBody)),
    tags(
        (name = "users", description = "Student records"),
        (name = "health", description = "Liveness and readiness checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_user_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        for expected in ["/users/", "/users/{id}", "/health", "/ready"] {
            assert!(paths.iter().any(|p| p == expected), "missing {expected} in {paths:?}");
        }
        let item = &doc.paths.paths["/users/{id}"];
        assert!(item.get.is_some() && item.put.is_some() && item.delete.is_some());
    }

    #[test]
    fn registers_user_schema() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.schemas.contains_key("User"));
        assert!(components.schemas.contains_key("ErrorBody"));
    }
}
