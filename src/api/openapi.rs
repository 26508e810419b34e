use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::routes::categories::list_categories,
        crate::api::routes::categories::category_tree,
        crate::api::routes::categories::category_debug,
        crate::api::routes::categories::get_category,
        crate::api::routes::health,
        crate::api::routes::ready,
    ),
    components(
        schemas(
            crate::api::dtos::CategoryNodeDto,
            crate::api::dtos::CategoryTreeResponse,
            crate::api::dtos::CategoryDebugResponse,
            crate::api::dtos::FlatCategoryDto,
            crate::api::dtos::LevelCountsDto,
            crate::api::dtos::ErrorResponse,
        )
    ),
    tags(
        (name = "categories", description = "Category hierarchy projections"),
        (name = "health", description = "Health check endpoints"),
    ),
    info(
        title = "Storefront Catalog API",
        version = "0.1.0",
        description = "Read-only category hierarchy for the storefront",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Swagger UI under `/swagger-ui/`, backed by the generated document at
/// `/api-docs/openapi.json`.
pub fn configure_swagger_ui(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
