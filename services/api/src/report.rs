use crate::infra::build_pipeline;
use chrono::{Local, NaiveDate};
use clap::Args;
use property_valuation::config::AppConfig;
use property_valuation::error::AppError;
use property_valuation::telemetry::{self, LogSink};
use property_valuation::valuation::{
    CatalogView, FormSubmission, ValuationSummaryView, PDF_MEDIA_TYPE,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Name of the person requesting the valuation
    #[arg(long)]
    pub(crate) name: String,
    /// Phone number or email
    #[arg(long)]
    pub(crate) contact: String,
    #[arg(long)]
    pub(crate) city: String,
    #[arg(long)]
    pub(crate) area: String,
    /// Fully Furnished, Semi Furnished, or Unfurnished
    #[arg(long)]
    pub(crate) furnishing: String,
    /// 1 BHK, 2 BHK, 3 BHK, Villa, or Commercial
    #[arg(long)]
    pub(crate) property_type: String,
    /// Property size in square feet
    #[arg(long)]
    pub(crate) size: f64,
    /// Amenity label; repeat for several
    #[arg(long)]
    pub(crate) amenity: Vec<String>,
    /// Report date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Where to write the PDF
    #[arg(long)]
    pub(crate) output: PathBuf,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, LogSink::Stderr)?;
    let pipeline = build_pipeline(&config)?;

    let ReportArgs {
        name,
        contact,
        city,
        area,
        furnishing,
        property_type,
        size,
        amenity,
        date,
        output,
    } = args;

    let request = pipeline.intake(FormSubmission {
        name,
        contact,
        city,
        area,
        furnishing,
        amenities: amenity,
        property_type,
        size_sq_ft: size,
    })?;
    let report_date = date.unwrap_or_else(|| Local::now().date_naive());
    let (assessment, document) = pipeline.run(request, report_date)?;

    std::fs::write(&output, &document.bytes)?;
    info!(path = %output.display(), media_type = PDF_MEDIA_TYPE, "report written");

    render_summary(&assessment.summary());
    println!("Report: {} ({} page(s))", output.display(), document.pages);
    Ok(())
}

pub(crate) fn run_catalog() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, LogSink::Stderr)?;
    let pipeline = build_pipeline(&config)?;
    let view = CatalogView::new(pipeline.catalog());

    println!("Cities");
    for city in &view.cities {
        println!(
            "- {} [{}] Rs.{:.0} / Rs.{:.0} / Rs.{:.0} per sq.ft.",
            city.name, city.rule, city.rates.low, city.rates.average, city.rates.high
        );
        println!("    areas: {}", city.areas.join(", "));
    }

    let labels = |options: &[property_valuation::valuation::OptionView]| {
        options
            .iter()
            .map(|option| option.label)
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("Furnishing: {}", labels(&view.furnishing));
    println!("Amenities: {}", labels(&view.amenities));
    println!("BHK/Type: {}", labels(&view.property_types));
    println!(
        "Size: at least {:.0} sq.ft., step {:.0}",
        view.min_size_sq_ft, view.size_step_sq_ft
    );
    Ok(())
}

fn render_summary(summary: &ValuationSummaryView) {
    println!("Valuation for {} / {}", summary.city, summary.area);
    println!(
        "  {} | {} | {} sq.ft.",
        summary.property_type, summary.furnishing, summary.size_sq_ft
    );
    println!("  Amenities: {}", summary.amenities);
    println!("  Estimated Value: {}", summary.estimated_value);
    println!("  Price Range: {}", summary.price_range);
}
