//! Storage-backed behavior against a PostgreSQL container (needs Docker). Each
//! test gets its own database copied from a template that already has the tables.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use product_compare::model::{ComparisonCreate, ListParams, ProductCreate, ProductMetadataCreate};
use product_compare::{
    app_router, ensure_tables, seed, AppError, AppState, ComparisonService, ProductService, ProductTypeService,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

const SEED: &str = r#"
product_types:
  - id: 1
    name: Laptop
    description: "..."
    metadata_schema: '{"fields":["cpu"]}'
"#;

async fn setup(pool: &PgPool) {
    let types = seed::parse_product_types(SEED).expect("seed parses");
    seed::init_product_types(pool, &types).await.expect("seed");
}

async fn new_product(pool: &PgPool, name: &str) -> i32 {
    let body = ProductCreate {
        product_type_id: 1,
        user_id: "u1".into(),
        name: name.into(),
        image_base64: None,
        brand: Some("Acme".into()),
        score: Some(7.5),
        metadata: vec![ProductMetadataCreate {
            attribute: "cpu".into(),
            value: "i7".into(),
            score: Some(9.0),
        }],
    };
    ProductService::create(pool, &body).await.expect("product").product.id
}

fn comparison_body(title: &str, products: Vec<i32>) -> ComparisonCreate {
    ComparisonCreate {
        title: title.into(),
        description: "side by side".into(),
        user_id: "u1".into(),
        date_created: "2024-05-01".into(),
        product_type_id: 1,
        products,
    }
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("count");
    n
}

#[tokio::test]
async fn seeding_twice_inserts_once() {
    let pool = common::fresh_pool().await;
    ensure_tables(&pool).await.unwrap();
    let types = seed::parse_product_types(SEED).unwrap();

    let first = seed::init_product_types(&pool, &types).await.unwrap();
    assert_eq!(first.inserted, 1);
    let second = seed::init_product_types(&pool, &types).await.unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped, 1);

    let (schema,): (Value,) = sqlx::query_as("SELECT metadata_schema FROM product_types WHERE id = 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(schema, json!({"fields": ["cpu"]}));
    assert_eq!(count(&pool, "product_types").await, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_seeding_inserts_each_type_once() {
    let pool = common::fresh_pool().await;
    let types = seed::parse_product_types(seed::BUNDLED_PRODUCT_TYPES).unwrap();

    let (a, b) = tokio::join!(
        seed::init_product_types(&pool, &types),
        seed::init_product_types(&pool, &types)
    );
    let (a, b) = (a.unwrap(), b.unwrap());
    assert_eq!(a.inserted + b.inserted, types.len() as u64);
    assert_eq!(a.skipped + b.skipped, types.len() as u64);
    assert_eq!(count(&pool, "product_types").await, types.len() as i64);
}

#[tokio::test]
async fn product_types_read_back_parsed_schema() {
    let pool = common::fresh_pool().await;
    setup(&pool).await;

    let all = ProductTypeService::list(&pool).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Laptop");
    let one = ProductTypeService::get(&pool, 1).await.unwrap().unwrap();
    assert_eq!(one.metadata_schema, json!({"fields": ["cpu"]}));
    assert!(ProductTypeService::get(&pool, 99).await.unwrap().is_none());
}

#[tokio::test]
async fn created_comparison_links_every_product() {
    let pool = common::fresh_pool().await;
    setup(&pool).await;
    let a = new_product(&pool, "A").await;
    let b = new_product(&pool, "B").await;

    let created = ComparisonService::create(&pool, &comparison_body("laptops", vec![a, b]))
        .await
        .unwrap();
    assert_eq!(created.products.len(), 2);
    let linked: Vec<i32> = created.products.iter().map(|l| l.product.id).collect();
    assert_eq!(linked, vec![a, b]);
    assert!(created.products.iter().all(|l| l.comparison_id == created.id));

    let read = ComparisonService::get(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(read, created);
}

#[tokio::test]
async fn empty_product_list_creates_comparison_without_links() {
    let pool = common::fresh_pool().await;
    setup(&pool).await;
    let created = ComparisonService::create(&pool, &comparison_body("empty", vec![]))
        .await
        .unwrap();
    assert!(created.products.is_empty());
    assert_eq!(created.date_created, "2024-05-01");
    assert_eq!(count(&pool, "comparison_products").await, 0);
}

#[tokio::test]
async fn unknown_product_id_rolls_back_the_aggregate() {
    let pool = common::fresh_pool().await;
    setup(&pool).await;
    let a = new_product(&pool, "A").await;

    let err = ComparisonService::create(&pool, &comparison_body("dangling", vec![a, 999_999]))
        .await
        .unwrap_err();
    assert!(err.is_foreign_key_violation());
    assert_eq!(count(&pool, "comparisons").await, 0);
    assert_eq!(count(&pool, "comparison_products").await, 0);
}

#[tokio::test]
async fn unknown_product_type_is_rejected() {
    let pool = common::fresh_pool().await;
    setup(&pool).await;
    let mut body = comparison_body("bad type", vec![]);
    body.product_type_id = 42;
    let err = ComparisonService::create(&pool, &body).await.unwrap_err();
    assert!(matches!(err, AppError::Db(_)));
    assert_eq!(count(&pool, "comparisons").await, 0);
}

#[tokio::test]
async fn missing_comparison_is_none() {
    let pool = common::fresh_pool().await;
    setup(&pool).await;
    assert!(ComparisonService::get(&pool, 999_999).await.unwrap().is_none());
    assert!(!ComparisonService::delete(&pool, 999_999).await.unwrap());
}

#[tokio::test]
async fn delete_removes_comparison_and_links() {
    let pool = common::fresh_pool().await;
    setup(&pool).await;
    let a = new_product(&pool, "A").await;
    let created = ComparisonService::create(&pool, &comparison_body("gone", vec![a]))
        .await
        .unwrap();

    assert!(ComparisonService::delete(&pool, created.id).await.unwrap());
    assert!(ComparisonService::get(&pool, created.id).await.unwrap().is_none());
    assert_eq!(count(&pool, "comparison_products").await, 0);
    assert_eq!(count(&pool, "products").await, 1);

    assert!(!ComparisonService::delete(&pool, created.id).await.unwrap());
}

#[tokio::test]
async fn list_pages_by_offset() {
    let pool = common::fresh_pool().await;
    setup(&pool).await;
    for title in ["one", "two", "three"] {
        ComparisonService::create(&pool, &comparison_body(title, vec![]))
            .await
            .unwrap();
    }

    let all = ComparisonService::list(&pool, ListParams { skip: 0, limit: 10 })
        .await
        .unwrap();
    let titles: Vec<&str> = all.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["one", "two", "three"]);

    let past_end = ComparisonService::list(&pool, ListParams { skip: 5, limit: 10 })
        .await
        .unwrap();
    assert!(past_end.is_empty());

    let middle = ComparisonService::list(&pool, ListParams { skip: 1, limit: 1 })
        .await
        .unwrap();
    assert_eq!(middle.len(), 1);
    assert_eq!(middle[0].title, "two");
}

#[tokio::test]
async fn product_delete_cascades_metadata_unless_linked() {
    let pool = common::fresh_pool().await;
    setup(&pool).await;
    let linked = new_product(&pool, "linked").await;
    let loose = new_product(&pool, "loose").await;
    ComparisonService::create(&pool, &comparison_body("holds", vec![linked]))
        .await
        .unwrap();

    let detail = ProductService::get(&pool, loose).await.unwrap().unwrap();
    assert_eq!(detail.metadata.len(), 1);
    assert!(ProductService::delete(&pool, loose).await.unwrap());
    assert_eq!(count(&pool, "product_metadata").await, 1);

    let err = ProductService::delete(&pool, linked).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(ProductService::get(&pool, linked).await.unwrap().is_some());
}

#[tokio::test]
async fn http_round_trip_for_comparisons() {
    let pool = common::fresh_pool().await;
    setup(&pool).await;
    let a = new_product(&pool, "A").await;
    let app = app_router(AppState::new(pool.clone()), 1024 * 1024);

    let body = json!({
        "title": "laptops",
        "description": "travel",
        "userId": "u1",
        "dateCreated": "2024-05-01",
        "productTypeId": 1,
        "products": [a]
    })
    .to_string();
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/comparisons")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let created: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(created["products"][0]["product"]["id"], a);
    let id = created["id"].as_i64().unwrap();

    let delete = |uri: String| {
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    };
    let resp = app.clone().oneshot(delete(format!("/comparisons/{}", id))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let msg: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(msg["message"], "Comparison deleted successfully");

    let resp = app.clone().oneshot(delete(format!("/comparisons/{}", id))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .oneshot(
            Request::builder()
                .uri(format!("/comparisons/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
