use serde::Serialize;

use super::domain::{
    Amenity, Furnishing, PropertyType, ValuationRequest, MIN_SIZE_SQ_FT, SIZE_STEP_SQ_FT,
};
use super::engine::ValuationResult;
use super::market::{MarketCatalog, RateBand};
use super::money::{format_rupee_range, format_rupees};

/// On-screen numbers shown next to the chart before the PDF is downloaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationSummaryView {
    pub city: String,
    pub area: String,
    pub property_type: &'static str,
    pub furnishing: &'static str,
    pub amenities: String,
    pub size_sq_ft: f64,
    pub rates: RateBand,
    pub low: f64,
    pub average: f64,
    pub high: f64,
    pub estimated_value: String,
    pub price_range: String,
}

impl ValuationSummaryView {
    pub fn new(request: &ValuationRequest, result: &ValuationResult) -> Self {
        Self {
            city: request.city.clone(),
            area: request.area.clone(),
            property_type: request.property_type.label(),
            furnishing: request.furnishing.label(),
            amenities: request.amenities_text(),
            size_sq_ft: request.size_sq_ft,
            rates: result.rates,
            low: result.low,
            average: result.average,
            high: result.high,
            estimated_value: format_rupees(result.average),
            price_range: format_rupee_range(result.low, result.high),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub key: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CityOptionView {
    pub name: String,
    pub areas: Vec<String>,
    pub rule: &'static str,
    pub rates: RateBand,
}

/// Everything a form needs to populate its selectors.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub cities: Vec<CityOptionView>,
    pub furnishing: Vec<OptionView>,
    pub amenities: Vec<OptionView>,
    pub property_types: Vec<OptionView>,
    pub min_size_sq_ft: f64,
    pub size_step_sq_ft: f64,
}

impl CatalogView {
    pub fn new(catalog: &MarketCatalog) -> Self {
        let cities = catalog
            .cities()
            .iter()
            .map(|city| CityOptionView {
                name: city.name.clone(),
                areas: city.areas.clone(),
                rule: city.pricing.kind_label(),
                rates: city.pricing.rates(),
            })
            .collect();

        Self {
            cities,
            furnishing: Furnishing::ordered()
                .into_iter()
                .map(|option| OptionView {
                    key: option.key(),
                    label: option.label(),
                })
                .collect(),
            amenities: Amenity::ordered()
                .into_iter()
                .map(|option| OptionView {
                    key: option.key(),
                    label: option.label(),
                })
                .collect(),
            property_types: PropertyType::ordered()
                .into_iter()
                .map(|option| OptionView {
                    key: option.key(),
                    label: option.label(),
                })
                .collect(),
            min_size_sq_ft: MIN_SIZE_SQ_FT,
            size_step_sq_ft: SIZE_STEP_SQ_FT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_view_lists_selector_options() {
        let view = CatalogView::new(&MarketCatalog::standard());
        assert_eq!(view.cities.len(), 3);
        assert_eq!(view.cities[2].rule, "Percent Band");
        assert_eq!(view.furnishing.len(), 3);
        assert_eq!(view.amenities.len(), 6);
        assert_eq!(view.property_types[0].label, "1 BHK");
        assert_eq!(view.size_step_sq_ft, 50.0);
    }
}
