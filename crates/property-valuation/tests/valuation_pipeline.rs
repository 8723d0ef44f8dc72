//! End-to-end valuation scenarios through the public pipeline facade.

use std::io::Write;
use std::sync::Arc;

use chrono::NaiveDate;
use lopdf::Document;
use property_valuation::valuation::{
    BarChartRenderer, ChartStyle, FormSubmission, InputError, MarketCatalog, ReportComposer,
    ValuationError, ValuationPipeline,
};

fn pipeline_for(catalog: MarketCatalog) -> ValuationPipeline<BarChartRenderer> {
    ValuationPipeline::new(
        Arc::new(catalog),
        BarChartRenderer::unlabelled(ChartStyle::standard()),
        ReportComposer::default(),
    )
}

fn pipeline() -> ValuationPipeline<BarChartRenderer> {
    pipeline_for(MarketCatalog::standard())
}

fn report_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 20).expect("valid report date")
}

fn form(city: &str, area: &str, size_sq_ft: f64) -> FormSubmission {
    FormSubmission {
        name: "Anjali Mehta".to_string(),
        contact: "anjali@example.com".to_string(),
        city: city.to_string(),
        area: area.to_string(),
        furnishing: "Fully Furnished".to_string(),
        amenities: vec!["Covered Parking".to_string(), "secured".to_string()],
        property_type: "2 BHK".to_string(),
        size_sq_ft,
    }
}

fn pdf_text(bytes: &[u8]) -> String {
    let document = Document::load_mem(bytes).expect("report parses as PDF");
    document.extract_text(&[1]).expect("first page has text")
}

#[test]
fn range_city_report_carries_inputs_and_values() {
    let pipeline = pipeline();
    let request = pipeline
        .intake(form("Gandhinagar", "Randesan", 1000.0))
        .expect("form accepted");
    let (assessment, document) = pipeline.run(request, report_date()).expect("report built");

    assert_eq!(assessment.result.low, 1_500_000.0);
    assert_eq!(assessment.result.average, 5_954_000.0);
    assert_eq!(assessment.result.high, 10_150_000.0);
    assert_eq!(document.pages, 1);
    assert_eq!(document.file_name, "valuation-report-2025-08-20.pdf");
    assert!(document.bytes.starts_with(b"%PDF"));

    let text = pdf_text(&document.bytes);
    for expected in [
        "ClearDeals Property Valuation Report",
        "Report Date: 20 Aug 2025",
        "Gandhinagar",
        "Randesan",
        "Size (sq.ft.): 1000",
        "Amenities: Covered Parking, Secured",
        "Estimated Value: Rs.5,954,000",
        "Price Range: Rs.1,500,000 - Rs.10,150,000",
    ] {
        assert!(text.contains(expected), "missing {expected:?} in {text:?}");
    }
}

#[test]
fn percent_band_city_is_priced_around_its_base() {
    let pipeline = pipeline();
    let request = pipeline
        .intake(form("Pune", "Baner", 500.0))
        .expect("form accepted");
    let assessment = pipeline.assess(request).expect("assessment");

    assert!((assessment.result.low - 2_800_000.0).abs() < 1e-6);
    assert_eq!(assessment.result.average, 4_000_000.0);
    assert!((assessment.result.high - 5_200_000.0).abs() < 1e-6);
    assert!(assessment.result.low <= assessment.result.average);

    let summary = assessment.summary();
    assert_eq!(summary.price_range, "Rs.2,800,000 - Rs.5,200,000");
}

#[test]
fn screen_and_report_share_one_result() {
    let pipeline = pipeline();
    let request = pipeline
        .intake(form("Ahmedabad", "Satellite", 1250.0))
        .expect("form accepted");
    let (assessment, document) = pipeline.run(request, report_date()).expect("report built");

    let summary = assessment.summary();
    let text = pdf_text(&document.bytes);
    assert!(text.contains(&summary.estimated_value));
    assert!(text.contains(&summary.price_range));
}

#[test]
fn repeated_requests_produce_identical_content() {
    let pipeline = pipeline();
    let mut texts = Vec::new();
    let mut charts = Vec::new();
    for _ in 0..2 {
        let request = pipeline
            .intake(form("Pune", "Kharadi", 900.0))
            .expect("form accepted");
        let (assessment, document) = pipeline.run(request, report_date()).expect("report built");
        charts.push(assessment.chart.bytes);
        texts.push(pdf_text(&document.bytes));
    }
    assert_eq!(charts[0], charts[1]);
    assert_eq!(texts[0], texts[1]);
}

#[test]
fn zero_size_never_reaches_the_report() {
    let pipeline = pipeline();
    let request = property_valuation::valuation::ValuationRequest {
        size_sq_ft: 0.0,
        ..pipeline
            .intake(form("Pune", "Baner", 500.0))
            .expect("form accepted")
    };
    let err = pipeline
        .run(request, report_date())
        .expect_err("zero size rejected");
    assert!(matches!(
        err,
        ValuationError::InvalidInput(InputError::NonPositiveSize(_))
    ));
    assert!(err.public_message().contains("greater than zero"));
}

#[test]
fn fractional_sizes_are_accepted_and_rounded_for_display() {
    let pipeline = pipeline();
    let request = pipeline
        .intake(form("Gandhinagar", "Sector 3", 1000.5))
        .expect("form accepted");
    let (assessment, _) = pipeline.run(request, report_date()).expect("report built");
    assert_eq!(assessment.summary().estimated_value, "Rs.5,956,977");
}

#[test]
fn cities_missing_from_a_loaded_table_are_configuration_errors() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{"cities": [{{"name": "Surat", "areas": ["Adajan"],
            "pricing": {{"range": {{"min": 3000, "avg": 4500, "max": 7000}}}}}}]}}"#
    )
    .expect("market table written");

    let catalog = MarketCatalog::from_path(file.path()).expect("table loads");
    let pipeline = pipeline_for(catalog);

    let request = pipeline
        .intake(form("Surat", "Adajan", 800.0))
        .expect("form accepted");
    let assessment = pipeline.assess(request.clone()).expect("assessment");
    assert_eq!(assessment.result.average, 3_600_000.0);

    let err = pipeline
        .assess(property_valuation::valuation::ValuationRequest {
            city: "Pune".to_string(),
            ..request
        })
        .expect_err("Pune is not configured");
    assert!(matches!(err, ValuationError::Configuration(_)));
    assert_eq!(err.public_message(), "report generation failed");
}

#[test]
fn names_outside_the_report_font_fail_cleanly() {
    let pipeline = pipeline();
    let request = pipeline
        .intake(FormSubmission {
            name: "\u{0905}\u{0928}\u{093f}\u{0932}".to_string(),
            ..form("Pune", "Hinjewadi", 700.0)
        })
        .expect("form accepted");
    let err = pipeline
        .run(request, report_date())
        .expect_err("Devanagari is not WinAnsi");
    assert!(matches!(err, ValuationError::Compose(_)));
    assert_eq!(err.public_message(), "report generation failed");
}
