//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

/// Returns the OpenAPI spec for the service.
pub fn openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pixlift API",
        version = "0.1.0",
        description = "Image enhancement proxy: uploads an image to a remote enhancement provider, polls until the job completes, and serves the enhanced result from local storage."
    ),
    paths(
        handlers::enhance::enhance_image,
        handlers::artifact::get_artifact,
    ),
    components(schemas(
        handlers::enhance::EnhanceResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "enhance", description = "Image enhancement endpoints")
    )
)]
pub struct ApiDoc;
