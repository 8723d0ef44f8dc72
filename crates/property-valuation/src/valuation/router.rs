use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Local;
use serde::Serialize;
use serde_json::json;
use tracing::error;

use super::chart::ChartRenderer;
use super::domain::FormSubmission;
use super::error::{ValuationError, REPORT_FAILED_MESSAGE};
use super::pipeline::{ValuationAssessment, ValuationPipeline};
use super::report::{ReportDocument, PDF_MEDIA_TYPE};
use super::views::{CatalogView, ValuationSummaryView};

pub const ESTIMATED_VALUE_HEADER: &str = "x-estimated-value";
pub const PRICE_RANGE_HEADER: &str = "x-price-range";

/// Base64 payload with its media type.
#[derive(Debug, Clone, Serialize)]
pub struct EncodedArtifact {
    pub media_type: &'static str,
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EncodedReport {
    pub file_name: String,
    pub pages: usize,
    #[serde(flatten)]
    pub artifact: EncodedArtifact,
}

/// Summary, chart, and PDF produced from one evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResponse {
    pub summary: ValuationSummaryView,
    pub chart: EncodedArtifact,
    pub report: EncodedReport,
}

impl AssessmentResponse {
    fn new(assessment: &ValuationAssessment, document: &ReportDocument) -> Self {
        Self {
            summary: assessment.summary(),
            chart: EncodedArtifact {
                media_type: assessment.chart.media_type(),
                data: BASE64.encode(&assessment.chart.bytes),
            },
            report: EncodedReport {
                file_name: document.file_name.clone(),
                pages: document.pages,
                artifact: EncodedArtifact {
                    media_type: PDF_MEDIA_TYPE,
                    data: BASE64.encode(&document.bytes),
                },
            },
        }
    }
}

/// Router builder exposing the valuation form endpoints.
///
/// `/assessment` answers with the summary, chart, and PDF of a single evaluation. The
/// standalone summary/chart/report routes each evaluate on their own; the engine is pure
/// over an immutable catalog, so the same form always yields the same figures.
pub fn valuation_router<C>(pipeline: Arc<ValuationPipeline<C>>) -> Router
where
    C: ChartRenderer + 'static,
{
    Router::new()
        .route("/api/v1/valuation/catalog", get(catalog_handler::<C>))
        .route("/api/v1/valuation", post(summary_handler::<C>))
        .route("/api/v1/valuation/assessment", post(assessment_handler::<C>))
        .route("/api/v1/valuation/chart", post(chart_handler::<C>))
        .route("/api/v1/valuation/report", post(report_handler::<C>))
        .with_state(pipeline)
}

pub(crate) async fn catalog_handler<C>(State(pipeline): State<Arc<ValuationPipeline<C>>>) -> Response
where
    C: ChartRenderer + 'static,
{
    let view = CatalogView::new(pipeline.catalog());
    (StatusCode::OK, axum::Json(view)).into_response()
}

pub(crate) async fn summary_handler<C>(
    State(pipeline): State<Arc<ValuationPipeline<C>>>,
    axum::Json(form): axum::Json<FormSubmission>,
) -> Response
where
    C: ChartRenderer + 'static,
{
    match offload(move || assess(&pipeline, form)).await {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment.summary())).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn assessment_handler<C>(
    State(pipeline): State<Arc<ValuationPipeline<C>>>,
    axum::Json(form): axum::Json<FormSubmission>,
) -> Response
where
    C: ChartRenderer + 'static,
{
    match offload(move || assess_and_compose(&pipeline, form)).await {
        Ok((assessment, document)) => {
            let body = AssessmentResponse::new(&assessment, &document);
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(response) => response,
    }
}

pub(crate) async fn chart_handler<C>(
    State(pipeline): State<Arc<ValuationPipeline<C>>>,
    axum::Json(form): axum::Json<FormSubmission>,
) -> Response
where
    C: ChartRenderer + 'static,
{
    match offload(move || assess(&pipeline, form)).await {
        Ok(assessment) => {
            let media_type = assessment.chart.media_type();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, media_type)],
                assessment.chart.bytes,
            )
                .into_response()
        }
        Err(response) => response,
    }
}

pub(crate) async fn report_handler<C>(
    State(pipeline): State<Arc<ValuationPipeline<C>>>,
    axum::Json(form): axum::Json<FormSubmission>,
) -> Response
where
    C: ChartRenderer + 'static,
{
    let (assessment, document) = match offload(move || assess_and_compose(&pipeline, form)).await
    {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    let summary = assessment.summary();
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(PDF_MEDIA_TYPE));
    let fields = [
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", document.file_name),
        ),
        (
            HeaderName::from_static(ESTIMATED_VALUE_HEADER),
            summary.estimated_value,
        ),
        (
            HeaderName::from_static(PRICE_RANGE_HEADER),
            summary.price_range,
        ),
    ];
    for (name, value) in fields {
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.insert(name, value);
        }
    }

    (StatusCode::OK, headers, document.bytes).into_response()
}

/// Runs chart and PDF work off the async workers.
async fn offload<T, F>(work: F) -> Result<T, Response>
where
    F: FnOnce() -> Result<T, ValuationError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(error_response(&err)),
        Err(join) => {
            error!(error = %join, "valuation task aborted");
            let payload = json!({ "error": REPORT_FAILED_MESSAGE });
            Err((StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response())
        }
    }
}

fn assess<C>(
    pipeline: &ValuationPipeline<C>,
    form: FormSubmission,
) -> Result<ValuationAssessment, ValuationError>
where
    C: ChartRenderer,
{
    let request = pipeline.intake(form)?;
    pipeline.assess(request)
}

fn assess_and_compose<C>(
    pipeline: &ValuationPipeline<C>,
    form: FormSubmission,
) -> Result<(ValuationAssessment, ReportDocument), ValuationError>
where
    C: ChartRenderer,
{
    let request = pipeline.intake(form)?;
    pipeline.run(request, Local::now().date_naive())
}

fn error_response(err: &ValuationError) -> Response {
    let payload = json!({
        "error": err.public_message(),
    });
    (err.status_code(), axum::Json(payload)).into_response()
}
