use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::products::ProductPayload,
    models::{Product, ProductId},
    response::{ApiResponse, EmptyData, ErrorResponse},
    routes::{health, products},
    validation::ValidationErrors,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::service_info,
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product
    ),
    components(
        schemas(
            Product,
            ProductId,
            ProductPayload,
            ValidationErrors,
            ErrorResponse,
            EmptyData,
            health::HealthData,
            health::ServiceInfo,
            health::ServiceEndpoints,
            ApiResponse<Product>,
            ApiResponse<Vec<Product>>
        )
    ),
    tags(
        (name = "Health", description = "Service descriptor and health check"),
        (name = "Products", description = "Product catalog endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
