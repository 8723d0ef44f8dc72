use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use property_valuation::config::AppConfig;
use property_valuation::error::AppError;
use property_valuation::valuation::{
    BarChartRenderer, ChartStyle, MarketCatalog, ReportComposer, ValuationPipeline,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

pub(crate) type Pipeline = ValuationPipeline<BarChartRenderer>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the market table and chart fonts named by the configuration.
pub(crate) fn build_pipeline(config: &AppConfig) -> Result<Arc<Pipeline>, AppError> {
    let catalog = match &config.valuation.market_data {
        Some(path) => {
            let catalog = MarketCatalog::from_path(path)?;
            info!(
                path = %path.display(),
                cities = catalog.cities().len(),
                "market table loaded"
            );
            catalog
        }
        None => MarketCatalog::standard(),
    };

    let chart = BarChartRenderer::with_fonts(ChartStyle::standard(), &config.valuation.chart_fonts);
    Ok(Arc::new(ValuationPipeline::new(
        Arc::new(catalog),
        chart,
        ReportComposer::default(),
    )))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
