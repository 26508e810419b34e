use actix_web::{web, HttpResponse, HttpResponseBuilder};
use uuid::Uuid;

use crate::api::dtos::{CategoryDebugResponse, CategoryNodeDto, CategoryTreeResponse};
use crate::api::routes::AppState;
use crate::domain::{forest_max_depth, max_depth, DomainError, TreeOutcome};
use crate::error::{AppError, AppResult};

pub const PARTIAL_RESULT_HEADER: &str = "x-partial-result";

/// Deepest tree a response will nest. JSON serialization recurses once per
/// level, so anything deeper is rejected instead of rendered.
pub const MAX_RESPONSE_DEPTH: usize = 256;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .route("", web::get().to(list_categories))
            .route("/tree", web::get().to(category_tree))
            .route("/debug", web::get().to(category_debug))
            .route("/{id}", web::get().to(get_category)),
    );
}

/// 200 response that flags truncated subtrees with `x-partial-result`.
fn tree_response<T>(state: &AppState, outcome: &TreeOutcome<T>) -> HttpResponseBuilder {
    let mut response = HttpResponse::Ok();
    if outcome.is_partial() {
        let truncated = outcome.failed_ids().len();
        state.metrics.record_partial_tree(truncated);
        response.insert_header((PARTIAL_RESULT_HEADER, truncated.to_string()));
    }
    response
}

fn ensure_renderable(depth: usize) -> AppResult<()> {
    if depth > MAX_RESPONSE_DEPTH {
        tracing::warn!(depth, limit = MAX_RESPONSE_DEPTH, "Category tree too deep to render");
        return Err(DomainError::DepthLimitExceeded {
            limit: MAX_RESPONSE_DEPTH,
        }
        .into());
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Every root category with its full subtree", body = [CategoryNodeDto]),
        (status = 500, description = "Category store failure", body = crate::api::dtos::ErrorResponse),
    ),
    tag = "categories"
)]
pub async fn list_categories(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let outcome = state.category_service.get_full_forest().await?;
    ensure_renderable(forest_max_depth(outcome.value()))?;
    let mut response = tree_response(&state, &outcome);
    let body: Vec<CategoryNodeDto> = outcome
        .into_value()
        .into_iter()
        .map(CategoryNodeDto::from)
        .collect();
    Ok(response.json(body))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/tree",
    responses(
        (status = 200, description = "Annotated forest with subtree sizes and depth", body = CategoryTreeResponse),
        (status = 500, description = "Category store failure", body = crate::api::dtos::ErrorResponse),
    ),
    tag = "categories"
)]
pub async fn category_tree(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let outcome = state.category_service.get_annotated_forest().await?;
    ensure_renderable(outcome.value().max_depth)?;
    let mut response = tree_response(&state, &outcome);
    Ok(response.json(CategoryTreeResponse::from(outcome.into_value())))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/debug",
    responses(
        (status = 200, description = "Flat listing with inferred levels", body = CategoryDebugResponse),
        (status = 500, description = "Category store failure", body = crate::api::dtos::ErrorResponse),
    ),
    tag = "categories"
)]
pub async fn category_debug(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let diagnostics = state.category_service.get_flat_diagnostics().await?;
    Ok(HttpResponse::Ok().json(CategoryDebugResponse::from(diagnostics)))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    params(("id" = String, Path, description = "Category id")),
    responses(
        (status = 200, description = "The category with its full subtree", body = CategoryNodeDto),
        (status = 404, description = "Category not found", body = crate::api::dtos::ErrorResponse),
        (status = 500, description = "Category store failure", body = crate::api::dtos::ErrorResponse),
    ),
    tag = "categories"
)]
pub async fn get_category(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    // An id that is not a UUID cannot exist in the store.
    let id = Uuid::parse_str(&path.into_inner()).map_err(|_| AppError::category_not_found())?;
    let outcome = state.category_service.get_node_with_descendants(id).await?;
    ensure_renderable(max_depth(outcome.value()))?;
    let mut response = tree_response(&state, &outcome);
    Ok(response.json(CategoryNodeDto::from(outcome.into_value())))
}
