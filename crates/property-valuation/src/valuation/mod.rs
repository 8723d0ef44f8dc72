mod chart;
pub mod domain;
mod engine;
mod error;
mod intake;
pub mod market;
pub mod money;
mod pipeline;
pub mod report;
mod router;
mod views;

pub use chart::{
    register_chart_font, BarChartRenderer, ChartArtifact, ChartBar, ChartError, ChartRenderer,
    ChartStyle, CHART_MEDIA_TYPE,
};
pub use domain::{Amenity, FormSubmission, Furnishing, PropertyType, ValuationRequest};
pub use engine::{ValuationEngine, ValuationResult};
pub use error::{InputError, ValuationError, REPORT_FAILED_MESSAGE};
pub use market::{CityMarket, MarketCatalog, MarketDataError, PricingRule, RateBand};
pub use pipeline::{ValuationAssessment, ValuationPipeline};
pub use report::{ComposeError, ReportComposer, ReportDocument, ReportTemplate, PDF_MEDIA_TYPE};
pub use router::{
    valuation_router, AssessmentResponse, EncodedArtifact, EncodedReport, ESTIMATED_VALUE_HEADER,
    PRICE_RANGE_HEADER,
};
pub use views::{CatalogView, CityOptionView, OptionView, ValuationSummaryView};
