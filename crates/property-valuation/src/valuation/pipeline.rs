use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, info_span};

use super::chart::{ChartArtifact, ChartRenderer};
use super::domain::{FormSubmission, ValuationRequest};
use super::engine::{ValuationEngine, ValuationResult};
use super::error::ValuationError;
use super::market::MarketCatalog;
use super::report::{ReportComposer, ReportDocument};
use super::views::ValuationSummaryView;

/// One evaluated request and its chart. Both the summary and the PDF read from it.
#[derive(Debug, Clone)]
pub struct ValuationAssessment {
    pub request: ValuationRequest,
    pub result: ValuationResult,
    pub chart: ChartArtifact,
}

impl ValuationAssessment {
    pub fn summary(&self) -> ValuationSummaryView {
        ValuationSummaryView::new(&self.request, &self.result)
    }
}

/// Request to result to chart to report, one synchronous pass per call.
pub struct ValuationPipeline<C> {
    engine: ValuationEngine,
    chart: C,
    composer: ReportComposer,
}

impl<C> ValuationPipeline<C>
where
    C: ChartRenderer,
{
    pub fn new(catalog: Arc<MarketCatalog>, chart: C, composer: ReportComposer) -> Self {
        Self {
            engine: ValuationEngine::new(catalog),
            chart,
            composer,
        }
    }

    pub fn catalog(&self) -> &MarketCatalog {
        self.engine.catalog()
    }

    pub fn engine(&self) -> &ValuationEngine {
        &self.engine
    }

    pub fn intake(&self, form: FormSubmission) -> Result<ValuationRequest, ValuationError> {
        self.catalog().intake(form).map_err(|err| {
            let err = ValuationError::from(err);
            err.log();
            err
        })
    }

    /// Evaluates, then renders. A failed evaluation never reaches the renderer.
    pub fn assess(&self, request: ValuationRequest) -> Result<ValuationAssessment, ValuationError> {
        let span = info_span!("valuation", city = %request.city, size_sq_ft = request.size_sq_ft);
        let _entered = span.enter();

        self.try_assess(request).map_err(|err| {
            err.log();
            err
        })
    }

    pub fn compose(
        &self,
        assessment: &ValuationAssessment,
        report_date: NaiveDate,
    ) -> Result<ReportDocument, ValuationError> {
        let span = info_span!("valuation_report", city = %assessment.request.city);
        let _entered = span.enter();

        self.composer
            .compose_on(
                &assessment.request,
                &assessment.result,
                &assessment.chart,
                report_date,
            )
            .map_err(|err| {
                let err = ValuationError::from(err);
                err.log();
                err
            })
    }

    /// Full flow for a single report request.
    pub fn run(
        &self,
        request: ValuationRequest,
        report_date: NaiveDate,
    ) -> Result<(ValuationAssessment, ReportDocument), ValuationError> {
        let assessment = self.assess(request)?;
        let document = self.compose(&assessment, report_date)?;
        info!(
            city = %assessment.request.city,
            pages = document.pages,
            bytes = document.bytes.len(),
            "valuation report generated"
        );
        Ok((assessment, document))
    }

    fn try_assess(&self, request: ValuationRequest) -> Result<ValuationAssessment, ValuationError> {
        let result = self.engine.evaluate(&request.city, request.size_sq_ft)?;
        let chart = self.chart.render(&result)?;
        Ok(ValuationAssessment {
            request,
            result,
            chart,
        })
    }
}
