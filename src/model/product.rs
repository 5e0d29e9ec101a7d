//! Product types, products, and per-product metadata rows.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Product category seeded at startup. Read-only through the API.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductType {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Laptop")]
    pub name: String,
    pub description: String,
    /// Expected metadata attributes for products of this type. Not enforced.
    #[schema(value_type = Object)]
    pub metadata_schema: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[schema(example = 7)]
    pub id: i32,
    #[schema(example = 1)]
    pub product_type_id: i32,
    #[schema(example = "user-42")]
    pub user_id: String,
    #[schema(example = "ThinkPad X1")]
    pub name: String,
    pub image_base64: Option<String>,
    pub brand: Option<String>,
    pub score: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductMetadata {
    pub id: i32,
    pub product_id: i32,
    #[schema(example = "cpu")]
    pub attribute: String,
    #[schema(example = "i7-1365U")]
    pub value: String,
    pub score: Option<f64>,
}

/// A product together with the metadata rows it owns.
#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub metadata: Vec<ProductMetadata>,
}

#[derive(Clone, Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductMetadataCreate {
    pub attribute: String,
    pub value: String,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Clone, Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    #[serde(alias = "product_type_id")]
    pub product_type_id: i32,
    #[serde(alias = "user_id")]
    pub user_id: String,
    pub name: String,
    #[serde(default, alias = "image_base64")]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub metadata: Vec<ProductMetadataCreate>,
}

/// Product listing: offset pagination plus optional exact-match filters.
#[derive(Clone, Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductListParams {
    #[serde(default)]
    pub skip: u32,
    #[serde(default)]
    pub limit: Option<u32>,
    pub product_type_id: Option<i32>,
    pub user_id: Option<String>,
}

impl ProductListParams {
    pub fn page(&self) -> super::ListParams {
        super::ListParams {
            skip: self.skip,
            limit: self.limit.unwrap_or(super::DEFAULT_LIMIT),
        }
    }
}
