//! HTTP boundary checks for the valuation form endpoints.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use lopdf::Document;
use property_valuation::valuation::{
    valuation_router, BarChartRenderer, ChartStyle, MarketCatalog, ReportComposer,
    ValuationPipeline, ESTIMATED_VALUE_HEADER, PRICE_RANGE_HEADER,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn router() -> Router {
    let pipeline = ValuationPipeline::new(
        Arc::new(MarketCatalog::standard()),
        BarChartRenderer::unlabelled(ChartStyle::standard()),
        ReportComposer::default(),
    );
    valuation_router(Arc::new(pipeline))
}

fn form_body(city: &str, area: &str, size_sq_ft: f64) -> Body {
    Body::from(
        json!({
            "name": "Dev Joshi",
            "contact": "+91 99090 11223",
            "city": city,
            "area": area,
            "furnishing": "unfurnished",
            "amenities": ["Garden", "gym"],
            "property_type": "3 BHK",
            "size_sq_ft": size_sq_ft,
        })
        .to_string(),
    )
}

fn post(uri: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .expect("request builds")
}

#[tokio::test]
async fn catalog_lists_form_options() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/valuation/catalog")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body readable");
    let payload: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(payload["cities"][0]["name"], "Gandhinagar");
    assert_eq!(payload["cities"][2]["areas"][1], "Hinjewadi");
    assert_eq!(payload["min_size_sq_ft"], 100.0);
    assert_eq!(payload["size_step_sq_ft"], 50.0);
}

#[tokio::test]
async fn summary_returns_rounded_values() {
    let response = router()
        .oneshot(post("/api/v1/valuation", form_body("Gandhinagar", "Sector 3", 1000.0)))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body readable");
    let payload: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(payload["estimated_value"], "Rs.5,954,000");
    assert_eq!(payload["price_range"], "Rs.1,500,000 - Rs.10,150,000");
    assert_eq!(payload["amenities"], "Garden, Gym");
    assert_eq!(payload["property_type"], "3 BHK");
}

#[tokio::test]
async fn chart_is_served_as_png() {
    let response = router()
        .oneshot(post("/api/v1/valuation/chart", form_body("Pune", "Baner", 500.0)))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");

    let body = to_bytes(response.into_body(), 4 * 1024 * 1024)
        .await
        .expect("body readable");
    assert!(body.starts_with(b"\x89PNG"));
}

#[tokio::test]
async fn report_is_a_pdf_attachment_with_summary_headers() {
    let response = router()
        .oneshot(post("/api/v1/valuation/report", form_body("Pune", "Baner", 500.0)))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    assert!(headers[header::CONTENT_DISPOSITION]
        .to_str()
        .expect("ascii header")
        .starts_with("attachment; filename=\"valuation-report-"));
    assert_eq!(headers[ESTIMATED_VALUE_HEADER], "Rs.4,000,000");
    assert_eq!(headers[PRICE_RANGE_HEADER], "Rs.2,800,000 - Rs.5,200,000");

    let body = to_bytes(response.into_body(), 8 * 1024 * 1024)
        .await
        .expect("body readable");
    assert!(body.starts_with(b"%PDF"));
}

#[tokio::test]
async fn invalid_size_is_rejected_with_a_reason() {
    let response = router()
        .oneshot(post("/api/v1/valuation/report", form_body("Pune", "Baner", 0.0)))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = to_bytes(response.into_body(), 1024)
        .await
        .expect("body readable");
    let payload: Value = serde_json::from_slice(&body).expect("json body");
    assert!(payload["error"]
        .as_str()
        .expect("error text")
        .contains("greater than zero"));
}

#[tokio::test]
async fn unlisted_city_is_rejected_at_intake() {
    let response = router()
        .oneshot(post("/api/v1/valuation", form_body("Mumbai", "Bandra", 900.0)))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = to_bytes(response.into_body(), 1024)
        .await
        .expect("body readable");
    let payload: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(payload["error"], "unknown city 'Mumbai'");
}

#[tokio::test]
async fn assessment_returns_summary_chart_and_report_from_one_result() {
    let response = router()
        .oneshot(post(
            "/api/v1/valuation/assessment",
            form_body("Ahmedabad", "Maninagar", 1000.0),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), 16 * 1024 * 1024)
        .await
        .expect("body readable");
    let payload: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(payload["summary"]["estimated_value"], "Rs.6,136,000");
    assert_eq!(payload["chart"]["media_type"], "image/png");
    assert_eq!(payload["report"]["media_type"], "application/pdf");
    assert_eq!(payload["report"]["pages"], 1);

    let chart = BASE64
        .decode(payload["chart"]["data"].as_str().expect("chart data"))
        .expect("chart is base64");
    assert!(chart.starts_with(b"\x89PNG"));

    let pdf = BASE64
        .decode(payload["report"]["data"].as_str().expect("report data"))
        .expect("report is base64");
    let text = Document::load_mem(&pdf)
        .expect("report parses")
        .extract_text(&[1])
        .expect("first page text");
    assert!(text.contains("Estimated Value: Rs.6,136,000"));
    assert!(text.contains("Price Range: Rs.4,200,000 - Rs.8,904,000"));
    assert_eq!(
        payload["summary"]["price_range"],
        "Rs.4,200,000 - Rs.8,904,000"
    );
}

#[tokio::test]
async fn assessment_rejections_keep_the_input_reason() {
    let response = router()
        .oneshot(post(
            "/api/v1/valuation/assessment",
            form_body("Ahmedabad", "Baner", 1000.0),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = to_bytes(response.into_body(), 1024)
        .await
        .expect("body readable");
    let payload: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(payload["error"], "area 'Baner' is not listed for Ahmedabad");
}
