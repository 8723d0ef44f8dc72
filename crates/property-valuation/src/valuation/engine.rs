use std::sync::Arc;

use serde::Serialize;

use super::error::{InputError, ValuationError};
use super::market::{MarketCatalog, RateBand};

/// Total valuation for one property: size multiplied by each rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValuationResult {
    pub low: f64,
    pub average: f64,
    pub high: f64,
    /// Per-square-foot rates the totals were scaled from.
    pub rates: RateBand,
    pub size_sq_ft: f64,
}

impl ValuationResult {
    /// Chart order: lower, average, higher.
    pub fn values(&self) -> [f64; 3] {
        [self.low, self.average, self.high]
    }

    pub fn is_ordered(&self) -> bool {
        self.values().iter().all(|value| value.is_finite())
            && self.low <= self.average
            && self.average <= self.high
    }
}

/// Pure valuation over the shared market table.
#[derive(Debug, Clone)]
pub struct ValuationEngine {
    catalog: Arc<MarketCatalog>,
}

impl ValuationEngine {
    pub fn new(catalog: Arc<MarketCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &MarketCatalog {
        &self.catalog
    }

    pub fn evaluate(&self, city: &str, size_sq_ft: f64) -> Result<ValuationResult, ValuationError> {
        if !size_sq_ft.is_finite() || size_sq_ft <= 0.0 {
            return Err(InputError::NonPositiveSize(size_sq_ft).into());
        }

        let rates = self.catalog.rule(city)?.rates();
        Ok(ValuationResult {
            low: size_sq_ft * rates.low,
            average: size_sq_ft * rates.average,
            high: size_sq_ft * rates.high,
            rates,
            size_sq_ft,
        })
    }
}
