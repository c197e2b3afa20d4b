//! Handlers for the product catalog endpoints.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use catalogd_core::{Filter, Product};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{map_store_error, respond, ApiError, AppState};

const DEFAULT_LIMIT: i64 = 10;
const DEFAULT_OFFSET: i64 = 0;

/// Query parameters for the catalog listing.
///
/// Numeric fields arrive as raw strings so absent, empty, and malformed
/// values can be told apart: absent and empty fall back to the default,
/// malformed rejects the request before any storage call.
#[derive(Debug, Deserialize)]
pub(super) struct ListParams {
    limit: Option<String>,
    offset: Option<String>,
    category: Option<String>,
    price: Option<String>,
}

#[derive(Debug, Serialize)]
struct CategoryDto {
    name: String,
    code: String,
}

#[derive(Debug, Serialize)]
struct VariantDto {
    name: String,
    sku: String,
    price: f64,
}

#[derive(Debug, Serialize)]
struct ProductDto {
    code: String,
    category: CategoryDto,
    price: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    variants: Vec<VariantDto>,
}

#[derive(Debug, Serialize)]
struct ProductsResponse {
    products: Vec<ProductDto>,
    /// Count of the returned page, not the full matching set.
    total: usize,
    offset: i64,
}

#[derive(Debug, Serialize)]
struct ProductResponse {
    product: ProductDto,
}

fn parse_int_param(raw: Option<&str>, name: &str, default: i64) -> Result<i64, ApiError> {
    match raw {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse::<i64>()
            .map_err(|_| ApiError::invalid_input(format!("invalid {name} parameter: {value}"))),
    }
}

fn build_filters(params: &ListParams) -> Vec<Filter> {
    let mut filters = Vec::new();
    if let Some(category) = params.category.as_deref().filter(|v| !v.is_empty()) {
        filters.push(Filter::equal("category", category));
    }
    if let Some(price) = params.price.as_deref().filter(|v| !v.is_empty()) {
        filters.push(Filter::less_than("price", price));
    }
    filters
}

fn display_price(price: Decimal) -> f64 {
    price.to_f64().unwrap_or_default()
}

fn category_dto(category: catalogd_core::Category) -> CategoryDto {
    CategoryDto {
        name: category.name,
        code: category.code,
    }
}

/// List rows are summary-level: variants stay out of the payload.
fn summary_dto(product: Product) -> ProductDto {
    ProductDto {
        code: product.code,
        category: category_dto(product.category),
        price: display_price(product.price),
        variants: Vec::new(),
    }
}

/// Detail payloads carry every variant with its effective price.
fn detail_dto(product: Product) -> ProductDto {
    let product_price = product.price;
    ProductDto {
        code: product.code,
        category: category_dto(product.category),
        price: display_price(product_price),
        variants: product
            .variants
            .into_iter()
            .map(|variant| {
                let effective = variant.effective_price(product_price);
                VariantDto {
                    name: variant.name,
                    sku: variant.sku,
                    price: display_price(effective),
                }
            })
            .collect(),
    }
}

/// `GET /catalog` with optional `limit`, `offset`, `category`, `price`.
pub(super) async fn list_products(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) =
        params.map_err(|e| ApiError::invalid_input(format!("invalid query string: {e}")))?;
    let limit = parse_int_param(params.limit.as_deref(), "limit", DEFAULT_LIMIT)?;
    let offset = parse_int_param(params.offset.as_deref(), "offset", DEFAULT_OFFSET)?;
    let filters = build_filters(&params);

    let products = state
        .store
        .products(limit, offset, &filters)
        .await
        .map_err(|e| map_store_error(&e))?;

    let products: Vec<ProductDto> = products.into_iter().map(summary_dto).collect();
    Ok(respond::ok(&ProductsResponse {
        total: products.len(),
        offset,
        products,
    }))
}

/// `GET /catalog/{code}`.
pub(super) async fn get_product(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response, ApiError> {
    if code.is_empty() {
        return Err(ApiError::invalid_input("product code can't be empty"));
    }

    let product = state
        .store
        .product_by_code(&code)
        .await
        .map_err(|e| map_store_error(&e))?;

    Ok(respond::ok(&ProductResponse {
        product: detail_dto(product),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogd_core::{Category, Variant};

    fn sample_product() -> Product {
        Product {
            id: 1,
            code: "PROD001".to_string(),
            price: Decimal::new(450, 2),
            category: Category {
                id: 1,
                code: "drinks".to_string(),
                name: "Drinks".to_string(),
            },
            variants: vec![
                Variant {
                    id: 1,
                    product_id: 1,
                    name: "330ml can".to_string(),
                    sku: "PROD001-330".to_string(),
                    price: Some(Decimal::ZERO),
                },
                Variant {
                    id: 2,
                    product_id: 1,
                    name: "500ml bottle".to_string(),
                    sku: "PROD001-500".to_string(),
                    price: Some(Decimal::new(525, 2)),
                },
            ],
        }
    }

    #[test]
    fn parse_int_param_defaults_when_absent_or_empty() {
        assert_eq!(parse_int_param(None, "limit", 10).expect("absent"), 10);
        assert_eq!(parse_int_param(Some(""), "limit", 10).expect("empty"), 10);
    }

    #[test]
    fn parse_int_param_accepts_numeric_values() {
        assert_eq!(parse_int_param(Some("25"), "limit", 10).expect("parse"), 25);
        assert_eq!(
            parse_int_param(Some("-3"), "offset", 0).expect("parse"),
            -3
        );
    }

    #[test]
    fn parse_int_param_rejects_non_numeric_values() {
        let err = parse_int_param(Some("abc"), "limit", 10).expect_err("should fail");
        let response = axum::response::IntoResponse::into_response(err);
        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn build_filters_skips_absent_and_empty_params() {
        let params = ListParams {
            limit: None,
            offset: None,
            category: Some(String::new()),
            price: None,
        };
        assert!(build_filters(&params).is_empty());
    }

    #[test]
    fn build_filters_orders_category_before_price() {
        let params = ListParams {
            limit: None,
            offset: None,
            category: Some("drinks".to_string()),
            price: Some("5".to_string()),
        };

        let filters = build_filters(&params);

        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0].key, "category");
        assert_eq!(filters[1].key, "price");
    }

    #[test]
    fn summary_dto_omits_variants() {
        let dto = summary_dto(sample_product());

        assert_eq!(dto.code, "PROD001");
        assert_eq!(dto.category.code, "drinks");
        assert!(dto.variants.is_empty());

        let json = serde_json::to_value(&dto).expect("serialize");
        assert!(json.get("variants").is_none(), "variants key must be absent");
    }

    #[test]
    fn detail_dto_applies_variant_price_fallback() {
        let dto = detail_dto(sample_product());

        assert_eq!(dto.variants.len(), 2);
        // zero-priced variant inherits the product price
        assert!((dto.variants[0].price - 4.5).abs() < f64::EPSILON);
        // nonzero variant keeps its own price
        assert!((dto.variants[1].price - 5.25).abs() < f64::EPSILON);
    }
}
