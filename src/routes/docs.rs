//! API documentation
//!
//! The OpenAPI document is generated from the handler annotations and the
//! model schemas. Swagger UI lives at `/swagger-ui/`, and `/` redirects there.

use super::gender;
use crate::error::ErrorResponse;
use crate::models::{CreateGenderRequest, Gender, UpdateGenderRequest};
use axum::response::Redirect;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const DOC_PATH: &str = "/swagger.json";
pub const UI_PATH: &str = "/swagger-ui";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gender CRUD API",
        version = "1.0",
        description = "A simple CRUD API for managing gender"
    ),
    paths(
        gender::list_genders,
        gender::create_gender,
        gender::get_gender,
        gender::update_gender,
        gender::delete_gender,
    ),
    components(schemas(Gender, CreateGenderRequest, UpdateGenderRequest, ErrorResponse)),
    tags((name = "genders", description = "Gender operations"))
)]
pub struct ApiDoc;

/// Swagger UI plus the JSON document it reads
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(UI_PATH).url(DOC_PATH, ApiDoc::openapi())
}

/// Landing page, like the interactive docs served at the root
pub async fn index() -> Redirect {
    Redirect::temporary(&format!("{UI_PATH}/"))
}
