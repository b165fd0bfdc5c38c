/// Integration tests for the dashboard API
///
/// Requests go through the full router (`tower::Service::call`) against a
/// scratch PostgreSQL database; see `common::TestContext`.

mod common;

use axum::http::{header, StatusCode};
use common::{date, json_body, TestContext};
use deployboard_shared::models::deployment::DeploymentStatus;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_health_reports_connected_database() {
    let Some(ctx) = TestContext::new().await else { return };

    let response = ctx.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_cards_are_formatted_and_not_cached() {
    let Some(ctx) = TestContext::new().await else { return };

    let customer = ctx.insert_customer("Evil Rabbit", "evil@rabbit.com").await;
    ctx.insert_deployment(customer, 100, DeploymentStatus::Paid, date(2023, 1, 1)).await;
    ctx.insert_deployment(customer, 50, DeploymentStatus::Pending, date(2023, 1, 2)).await;
    ctx.insert_deployment(customer, 25, DeploymentStatus::Paid, date(2023, 1, 3)).await;

    let response = ctx.get("/v1/dashboard/cards").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");

    let body = json_body(response).await;
    assert_eq!(body["number_of_deployments"], 3);
    assert_eq!(body["number_of_customers"], 1);
    assert_eq!(body["total_paid_deployments"], "$1.25");
    assert_eq!(body["total_pending_deployments"], "$0.50");

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_revenue_is_cacheable() {
    let Some(ctx) = TestContext::new().await else { return };

    sqlx::query("INSERT INTO revenue (month, revenue) VALUES ('Jan', 2000), ('Feb', 1800)")
        .execute(&ctx.db)
        .await
        .unwrap();

    let response = ctx.get("/v1/dashboard/revenue").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "private, max-age=120"
    );

    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_list_deployments_paginates() {
    let Some(ctx) = TestContext::new().await else { return };

    let customer = ctx.insert_customer("Lee Robinson", "lee@robinson.com").await;
    for day in 1..=7 {
        ctx.insert_deployment(customer, 15795, DeploymentStatus::Pending, date(2022, 12, day))
            .await;
    }

    let response = ctx.get("/v1/deployments?query=lee&page=1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["total_pages"], 2);

    let first = &body["deployments"].as_array().unwrap();
    assert_eq!(first.len(), 6);
    assert_eq!(first[0]["date"], "2022-12-07");
    assert_eq!(first[0]["date_display"], "Dec 7, 2022");
    assert_eq!(first[0]["amount"], 15795);
    assert_eq!(first[0]["amount_display"], "$157.95");
    assert_eq!(first[0]["status"], "pending");

    let body = json_body(ctx.get("/v1/deployments?query=lee&page=2").await).await;
    let second = body["deployments"].as_array().unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0]["date"], "2022-12-01");

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_unparseable_page_means_first_page() {
    let Some(ctx) = TestContext::new().await else { return };

    let customer = ctx.insert_customer("Amy Burns", "amy@burns.com").await;
    ctx.insert_deployment(customer, 500, DeploymentStatus::Paid, date(2023, 3, 1)).await;

    for uri in ["/v1/deployments?page=abc", "/v1/deployments?page=0", "/v1/deployments"] {
        let response = ctx.get(uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);

        let body = json_body(response).await;
        assert_eq!(body["page"], 1, "{}", uri);
        assert_eq!(body["deployments"].as_array().unwrap().len(), 1, "{}", uri);
    }

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_deployment_pages() {
    let Some(ctx) = TestContext::new().await else { return };

    let body = json_body(ctx.get("/v1/deployments/pages?query=nobody").await).await;
    assert_eq!(body["total_pages"], 0);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_missing_deployment_is_not_found() {
    let Some(ctx) = TestContext::new().await else { return };

    let response = ctx.get(&format!("/v1/deployments/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "not_found");

    let response = ctx.get("/v1/deployments/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ctx.get(&format!("/v1/deployments/{}/edit", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_edit_form_lists_customers() {
    let Some(ctx) = TestContext::new().await else { return };

    let lee = ctx.insert_customer("Lee Robinson", "lee@robinson.com").await;
    ctx.insert_customer("Amy Burns", "amy@burns.com").await;
    let id = ctx.insert_deployment(lee, 12345, DeploymentStatus::Paid, date(2023, 6, 5)).await;

    let response = ctx.get(&format!("/v1/deployments/{}/edit", id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["deployment"]["amount"], 123.45);
    assert_eq!(body["deployment"]["customer_id"], lee.to_string());
    assert_eq!(body["customers"][0]["name"], "Amy Burns");
    assert_eq!(body["customers"][1]["name"], "Lee Robinson");

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_create_rejects_non_positive_amount() {
    let Some(ctx) = TestContext::new().await else { return };

    let customer = ctx.insert_customer("Michael Novotny", "michael@novotny.com").await;
    let response = ctx
        .send_json(
            "POST",
            "/v1/deployments",
            json!({ "customer_id": customer, "amount": 0.0, "status": "pending" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "amount");

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_create_rejects_amount_too_large_for_storage() {
    let Some(ctx) = TestContext::new().await else { return };

    let customer = ctx.insert_customer("Hector Simpson", "hector@simpson.com").await;
    let response = ctx
        .send_json(
            "POST",
            "/v1/deployments",
            json!({ "customer_id": customer, "amount": 30_000_000.0, "status": "paid" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["details"][0]["field"], "amount");
    assert_eq!(
        body["details"][0]["message"],
        "Please enter an amount up to $21,474,836.47."
    );

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM deployments")
        .fetch_one(&ctx.db)
        .await
        .unwrap();
    assert_eq!(count, 0);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_create_update_delete() {
    let Some(ctx) = TestContext::new().await else { return };

    let customer = ctx.insert_customer("Steph Dietz", "steph@dietz.com").await;

    let response = ctx
        .send_json(
            "POST",
            "/v1/deployments",
            json!({ "customer_id": customer, "amount": 157.95, "status": "pending" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(created["amount"], 157.95);
    let id = created["id"].as_str().unwrap().to_string();

    let response = ctx
        .send_json(
            "PUT",
            &format!("/v1/deployments/{}", id),
            json!({ "customer_id": customer, "amount": 20.0, "status": "paid" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["status"], "paid");
    assert_eq!(updated["amount"], 20.0);

    for expected in [StatusCode::NO_CONTENT, StatusCode::NOT_FOUND] {
        let request = axum::http::Request::builder()
            .method("DELETE")
            .uri(format!("/v1/deployments/{}", id))
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(ctx.send(request).await.status(), expected);
    }

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_update_missing_deployment_is_not_found() {
    let Some(ctx) = TestContext::new().await else { return };

    let customer = ctx.insert_customer("Balazs Orban", "balazs@orban.com").await;
    let response = ctx
        .send_json(
            "PUT",
            &format!("/v1/deployments/{}", Uuid::new_v4()),
            json!({ "customer_id": customer, "amount": 5.0, "status": "paid" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_customer_summaries_filter_and_totals() {
    let Some(ctx) = TestContext::new().await else { return };

    let delba = ctx.insert_customer("Delba de Oliveira", "delba@oliveira.com").await;
    ctx.insert_customer("Jared Palmer", "jared@palmer.com").await;
    ctx.insert_deployment(delba, 20348, DeploymentStatus::Pending, date(2023, 6, 27)).await;
    ctx.insert_deployment(delba, 3540, DeploymentStatus::Paid, date(2023, 2, 1)).await;

    let body = json_body(ctx.get("/v1/customers/summaries?query=OLIVEIRA").await).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["total_deployments"], 2);
    assert_eq!(rows[0]["total_pending"], "$203.48");
    assert_eq!(rows[0]["total_paid"], "$35.40");

    let body = json_body(ctx.get("/v1/customers").await).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    ctx.cleanup().await;
}
