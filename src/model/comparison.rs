//! Comparison aggregate: the comparison row plus its product links.

use super::Product;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Comparison {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub user_id: String,
    pub date_created: String,
    pub product_type_id: i32,
}

/// One link row joined with the product it points at.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct LinkedProductRow {
    pub link_id: i32,
    pub comparison_id: i32,
    pub id: i32,
    pub product_type_id: i32,
    pub user_id: String,
    pub name: String,
    pub image_base64: Option<String>,
    pub brand: Option<String>,
    pub score: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonProductDto {
    /// Link row id.
    pub id: i32,
    pub comparison_id: i32,
    pub product: Product,
}

impl From<LinkedProductRow> for ComparisonProductDto {
    fn from(r: LinkedProductRow) -> Self {
        ComparisonProductDto {
            id: r.link_id,
            comparison_id: r.comparison_id,
            product: Product {
                id: r.id,
                product_type_id: r.product_type_id,
                user_id: r.user_id,
                name: r.name,
                image_base64: r.image_base64,
                brand: r.brand,
                score: r.score,
            },
        }
    }
}

/// Full comparison representation returned by every comparison endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonDto {
    #[schema(example = 12)]
    pub id: i32,
    #[schema(example = "Travel laptops")]
    pub title: String,
    pub description: String,
    #[schema(example = "user-42")]
    pub user_id: String,
    /// Caller-supplied, stored verbatim.
    #[schema(example = "2024-05-01")]
    pub date_created: String,
    #[schema(example = 1)]
    pub product_type_id: i32,
    pub products: Vec<ComparisonProductDto>,
}

impl ComparisonDto {
    pub fn new(c: Comparison, products: Vec<ComparisonProductDto>) -> Self {
        ComparisonDto {
            id: c.id,
            title: c.title,
            description: c.description,
            user_id: c.user_id,
            date_created: c.date_created,
            product_type_id: c.product_type_id,
            products,
        }
    }
}

/// Body for creating a comparison. `products` lists product ids to link.
#[derive(Clone, Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonCreate {
    pub title: String,
    pub description: String,
    #[serde(alias = "user_id")]
    pub user_id: String,
    #[serde(alias = "date_created")]
    pub date_created: String,
    #[serde(alias = "product_type_id")]
    pub product_type_id: i32,
    #[serde(default)]
    #[schema(example = json!([7, 8]))]
    pub products: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn linked(link_id: i32, product_id: i32) -> LinkedProductRow {
        LinkedProductRow {
            link_id,
            comparison_id: 1,
            id: product_id,
            product_type_id: 2,
            user_id: "u1".into(),
            name: format!("product {}", product_id),
            image_base64: None,
            brand: Some("Acme".into()),
            score: Some(4.0),
        }
    }

    #[test]
    fn comparison_serializes_to_nested_camel_case() {
        let dto = ComparisonDto::new(
            Comparison {
                id: 1,
                title: "Laptops".into(),
                description: "travel".into(),
                user_id: "u1".into(),
                date_created: "2024-05-01".into(),
                product_type_id: 2,
            },
            vec![linked(5, 9).into()],
        );
        let v = serde_json::to_value(&dto).unwrap();
        assert_eq!(v["userId"], "u1");
        assert_eq!(v["dateCreated"], "2024-05-01");
        assert_eq!(v["productTypeId"], 2);
        assert_eq!(v["products"][0]["id"], 5);
        assert_eq!(v["products"][0]["comparisonId"], 1);
        assert_eq!(v["products"][0]["product"]["id"], 9);
        assert_eq!(v["products"][0]["product"]["brand"], "Acme");
    }

    #[test]
    fn create_body_defaults_products_to_empty() {
        let body: ComparisonCreate = serde_json::from_value(json!({
            "title": "t",
            "description": "d",
            "userId": "u1",
            "dateCreated": "yesterday",
            "productTypeId": 3
        }))
        .unwrap();
        assert!(body.products.is_empty());
        assert_eq!(body.date_created, "yesterday");
    }

    #[test]
    fn create_body_accepts_snake_case_aliases() {
        let body: ComparisonCreate = serde_json::from_value(json!({
            "title": "t",
            "description": "d",
            "user_id": "u1",
            "date_created": "2024-01-01",
            "product_type_id": 3,
            "products": [1, 2, 2]
        }))
        .unwrap();
        assert_eq!(body.product_type_id, 3);
        assert_eq!(body.products, vec![1, 2, 2]);
    }

    #[test]
    fn create_body_rejects_non_integer_product_ids() {
        let res = serde_json::from_value::<ComparisonCreate>(json!({
            "title": "t",
            "description": "d",
            "userId": "u1",
            "dateCreated": "2024-01-01",
            "productTypeId": 3,
            "products": ["seven"]
        }));
        assert!(res.is_err());
    }
}
