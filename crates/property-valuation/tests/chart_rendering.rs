//! Labelled chart output with a real TrueType face.

use std::path::PathBuf;

use std::sync::Arc;

use image::{DynamicImage, GenericImageView};
use property_valuation::config::DEFAULT_CHART_FONTS;
use property_valuation::valuation::{
    BarChartRenderer, ChartRenderer, ChartStyle, MarketCatalog, ValuationEngine,
};

fn font_candidates() -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = std::env::var("VALUATION_CHART_FONT")
        .ok()
        .filter(|raw| !raw.trim().is_empty())
        .map(PathBuf::from)
        .into_iter()
        .collect();
    candidates.extend(DEFAULT_CHART_FONTS.iter().map(PathBuf::from));
    candidates
}

/// Non-white pixels in the caption band, right of the plain renderer's y axis.
fn caption_ink(image: &DynamicImage) -> usize {
    let rgb = image.to_rgb8();
    rgb.enumerate_pixels()
        .filter(|(x, y, pixel)| *x > 70 && *y < 45 && pixel.0 != [255, 255, 255])
        .count()
}

#[test]
fn labelled_chart_draws_title_and_axes_text() {
    let candidates = font_candidates();
    if !candidates.iter().any(|path| path.is_file()) {
        eprintln!("no TrueType font on this host; set VALUATION_CHART_FONT to exercise labels");
        return;
    }

    let engine = ValuationEngine::new(Arc::new(MarketCatalog::standard()));
    let result = engine.evaluate("Gandhinagar", 1000.0).expect("valuation");

    let labelled = BarChartRenderer::with_fonts(ChartStyle::standard(), &candidates);
    assert!(labelled.is_labelled(), "an existing font file must register");
    let plain = BarChartRenderer::unlabelled(ChartStyle::standard());

    let with_text = labelled.render(&result).expect("labelled chart renders");
    let without_text = plain.render(&result).expect("plain chart renders");
    assert_ne!(with_text.bytes, without_text.bytes);

    let decoded = image::load_from_memory(&with_text.bytes).expect("valid PNG");
    assert_eq!(decoded.dimensions(), (640, 480));

    let plain_decoded = image::load_from_memory(&without_text.bytes).expect("valid PNG");
    assert_eq!(caption_ink(&plain_decoded), 0);
    assert!(
        caption_ink(&decoded) > 0,
        "caption should be drawn at the top of the chart"
    );
}
