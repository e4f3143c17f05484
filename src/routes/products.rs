use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    dto::products::ProductPayload,
    error::{AppError, AppResult},
    extract::JsonBody,
    models::{Product, ProductId},
    response::{ApiResponse, EmptyData, ErrorResponse},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(create_product))
        .route("/", axum::routing::get(list_products))
        .route("/{id}", axum::routing::get(get_product))
        .route("/{id}", axum::routing::put(update_product))
        .route("/{id}", axum::routing::delete(delete_product))
}

// A malformed id cannot name any record.
fn parse_id(raw: &str) -> AppResult<ProductId> {
    ProductId::parse(raw).ok_or(AppError::NotFound)
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products, newest first", body = ApiResponse<Vec<Product>>),
        (status = 500, description = "Storage unavailable", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Product>>>> {
    let items = state.products.list_all().await?;
    Ok(Json(ApiResponse::list(items)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn get_product(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let product = state.products.get_by_id(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::success(product)))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Create product", body = ApiResponse<Product>),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ProductPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let product = state.products.create(payload.into_changes()).await?;
    tracing::info!(product_id = %product.id, "product created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("product created", product)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<ProductPayload>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let id = parse_id(&id)?;
    // The store looks the record up before validating, so a missing id wins over bad fields.
    let product = state.products.update(id, payload.into_changes()).await?;
    tracing::info!(product_id = %product.id, "product updated");

    Ok(Json(ApiResponse::with_message("product updated", product)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Deleted product", body = ApiResponse<EmptyData>),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<EmptyData>>> {
    let id = parse_id(&id)?;
    state.products.delete(id).await?;
    tracing::info!(product_id = %id, "product deleted");

    Ok(Json(ApiResponse::with_message(
        "product deleted",
        EmptyData::default(),
    )))
}
