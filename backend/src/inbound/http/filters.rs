//! Filter catalogue HTTP handlers.

use actix_web::web;
use water_contract::{FilterProductRecord, RecommendInput};

use crate::domain::filters::FilterProduct;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::Validated;

/// Every filter product with its lab performance rows.
#[utoipa::path(
    get,
    path = "/api/filters",
    operation_id = "filters.list",
    responses(
        (status = 200, description = "Filter catalogue", body = [FilterProductRecord]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["filters"],
    security([])
)]
pub async fn list_filters(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<FilterProduct>>> {
    let products = state.filters.list_filters().await?;
    Ok(web::Json(products))
}

/// Suggested filters for a household.
///
/// Currently the first three catalogue entries; household size and budget
/// are validated but not used for ranking.
#[utoipa::path(
    post,
    path = "/api/filters/recommend",
    operation_id = "filters.recommend",
    request_body = RecommendInput,
    responses(
        (status = 200, description = "Recommended filters", body = [FilterProductRecord]),
        (status = 400, description = "Invalid request body", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["filters"],
    security([])
)]
pub async fn recommend(
    state: web::Data<HttpState>,
    body: Validated<RecommendInput>,
) -> ApiResult<web::Json<Vec<FilterProduct>>> {
    let products = state.filters.recommend(&body).await?;
    Ok(web::Json(products))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;
    use serde_json::{Value, json};

    use crate::domain::filters::{FilterCategory, NewFilterPerformance, NewFilterProduct};
    use crate::domain::ports::FilterProductRepository;
    use crate::inbound::http::test_utils::{FixtureRepositories, test_app};

    #[fixture]
    fn repos() -> FixtureRepositories {
        FixtureRepositories::new()
    }

    fn product(name: &str) -> NewFilterProduct {
        NewFilterProduct {
            name: name.to_owned(),
            brand: "Brand".to_owned(),
            description: "Filter".to_owned(),
            price: Decimal::new(2499, 2),
            image_url: None,
            affiliate_link: None,
            category: FilterCategory::TableTop,
        }
    }

    async fn stock(repos: &FixtureRepositories, performance_per_product: &[usize]) {
        for (index, count) in performance_per_product.iter().enumerate() {
            let stored = repos
                .filters
                .insert_product(&product(&format!("Filter {index}")))
                .await
                .expect("insert product");
            for rate in 0..*count {
                repos
                    .filters
                    .insert_performance(&NewFilterPerformance {
                        filter_id: Some(stored.id),
                        contaminant: format!("Stoff {rate}"),
                        removal_rate: Decimal::new(995, 1),
                        certification: None,
                    })
                    .await
                    .expect("insert performance");
            }
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn listing_nests_performance_per_product(repos: FixtureRepositories) {
        stock(&repos, &[2, 0, 3]).await;
        let app = test::init_service(test_app(repos.state())).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/api/filters").to_request())
                .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Vec<Value> = test::read_body_json(res).await;
        let counts: Vec<usize> = body
            .iter()
            .map(|item| item["performance"].as_array().map_or(0, Vec::len))
            .collect();
        assert_eq!(counts, vec![2, 0, 3]);
        assert_eq!(body[0]["price"], "24.99");
        assert_eq!(body[0]["category"], "table-top");
    }

    #[rstest]
    #[actix_web::test]
    async fn recommend_returns_at_most_three(repos: FixtureRepositories) {
        stock(&repos, &[0, 0, 0, 0, 0]).await;
        let app = test::init_service(test_app(repos.state())).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/filters/recommend")
                .set_json(json!({"plz": "10115", "householdSize": 3, "budget": 200.0}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Vec<Value> = test::read_body_json(res).await;
        let ids: Vec<_> = body.iter().map(|item| item["id"].clone()).collect();
        assert_eq!(ids, vec![json!(1), json!(2), json!(3)]);
    }

    #[rstest]
    #[actix_web::test]
    async fn recommend_rejects_non_numeric_budget(repos: FixtureRepositories) {
        let app = test::init_service(test_app(repos.state())).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/filters/recommend")
                .set_json(json!({"plz": "10115", "budget": "cheap"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["fields"][0]["field"], "budget");
    }
}
