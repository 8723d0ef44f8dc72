use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Per-square-foot pricing for one city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingRule {
    /// Independently quoted minimum, average, and maximum rates.
    Range { min: f64, avg: f64, max: f64 },
    /// Symmetric deviation around a base average rate.
    PercentBand { base_avg: f64, percent_spread: f64 },
}

impl PricingRule {
    /// Resolves the rule into concrete low/average/high rates.
    pub fn rates(&self) -> RateBand {
        match *self {
            PricingRule::Range { min, avg, max } => RateBand {
                low: min,
                average: avg,
                high: max,
            },
            PricingRule::PercentBand {
                base_avg,
                percent_spread,
            } => {
                let spread = percent_spread / 100.0;
                RateBand {
                    low: base_avg * (1.0 - spread),
                    average: base_avg,
                    high: base_avg * (1.0 + spread),
                }
            }
        }
    }

    pub const fn kind_label(&self) -> &'static str {
        match self {
            PricingRule::Range { .. } => "Range",
            PricingRule::PercentBand { .. } => "Percent Band",
        }
    }

    fn validate(&self, city: &str) -> Result<(), MarketDataError> {
        let invalid = |reason: &str| MarketDataError::InvalidRule {
            city: city.to_string(),
            reason: reason.to_string(),
        };

        match *self {
            PricingRule::Range { min, avg, max } => {
                if ![min, avg, max].iter().all(|rate| rate.is_finite() && *rate >= 0.0) {
                    return Err(invalid("rates must be finite and non-negative"));
                }
                if !(min <= avg && avg <= max) {
                    return Err(invalid("rates must satisfy min <= avg <= max"));
                }
            }
            PricingRule::PercentBand {
                base_avg,
                percent_spread,
            } => {
                if !base_avg.is_finite() || base_avg < 0.0 {
                    return Err(invalid("base average must be finite and non-negative"));
                }
                if !(0.0..=100.0).contains(&percent_spread) {
                    return Err(invalid("percent spread must lie within 0..=100"));
                }
            }
        }
        Ok(())
    }
}

/// Low/average/high rate per square foot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateBand {
    pub low: f64,
    pub average: f64,
    pub high: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityMarket {
    pub name: String,
    pub areas: Vec<String>,
    pub pricing: PricingRule,
}

#[derive(Debug, Deserialize)]
struct MarketFile {
    cities: Vec<CityMarket>,
}

/// Immutable city, area, and pricing table shared by every valuation.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketCatalog {
    cities: Vec<CityMarket>,
}

impl MarketCatalog {
    pub fn standard() -> Self {
        Self {
            cities: standard_city_markets(),
        }
    }

    pub fn new(cities: Vec<CityMarket>) -> Result<Self, MarketDataError> {
        if cities.is_empty() {
            return Err(MarketDataError::Empty);
        }

        let mut seen = HashSet::new();
        for city in &cities {
            if !seen.insert(city.name.as_str()) {
                return Err(MarketDataError::DuplicateCity(city.name.clone()));
            }
            if city.areas.is_empty() {
                return Err(MarketDataError::NoAreas(city.name.clone()));
            }
            city.pricing.validate(&city.name)?;
        }

        Ok(Self { cities })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, MarketDataError> {
        let file: MarketFile = serde_json::from_reader(reader)?;
        Self::new(file.cities)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, MarketDataError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn cities(&self) -> &[CityMarket] {
        &self.cities
    }

    pub fn city(&self, city: &str) -> Result<&CityMarket, MarketDataError> {
        self.cities
            .iter()
            .find(|market| market.name == city)
            .ok_or_else(|| MarketDataError::UnknownCity(city.to_string()))
    }

    pub fn rule(&self, city: &str) -> Result<PricingRule, MarketDataError> {
        self.city(city).map(|market| market.pricing)
    }

    pub fn areas(&self, city: &str) -> Result<&[String], MarketDataError> {
        self.city(city).map(|market| market.areas.as_slice())
    }
}

fn standard_city_markets() -> Vec<CityMarket> {
    let areas = |names: [&str; 3]| names.iter().map(|name| name.to_string()).collect();

    vec![
        CityMarket {
            name: "Gandhinagar".to_string(),
            areas: areas(["Sector 3", "Sector 16", "Randesan"]),
            pricing: PricingRule::Range {
                min: 1500.0,
                avg: 5954.0,
                max: 10150.0,
            },
        },
        CityMarket {
            name: "Ahmedabad".to_string(),
            areas: areas(["Satellite", "SG Highway", "Maninagar"]),
            pricing: PricingRule::Range {
                min: 4200.0,
                avg: 6136.0,
                max: 8904.0,
            },
        },
        CityMarket {
            name: "Pune".to_string(),
            areas: areas(["Baner", "Hinjewadi", "Kharadi"]),
            pricing: PricingRule::PercentBand {
                base_avg: 8000.0,
                percent_spread: 30.0,
            },
        },
    ]
}

#[derive(Debug, thiserror::Error)]
pub enum MarketDataError {
    #[error("no pricing rule configured for city '{0}'")]
    UnknownCity(String),
    #[error("market table lists no cities")]
    Empty,
    #[error("city '{0}' appears more than once in the market table")]
    DuplicateCity(String),
    #[error("city '{0}' has no areas")]
    NoAreas(String),
    #[error("invalid pricing rule for '{city}': {reason}")]
    InvalidRule { city: String, reason: String },
    #[error("failed to read market table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid market table JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
