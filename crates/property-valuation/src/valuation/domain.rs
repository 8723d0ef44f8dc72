use serde::{Deserialize, Serialize};

/// Smallest property size the valuation form accepts.
pub const MIN_SIZE_SQ_FT: f64 = 100.0;
/// Increment used by the size widget.
pub const SIZE_STEP_SQ_FT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Furnishing {
    FullyFurnished,
    SemiFurnished,
    Unfurnished,
}

impl Furnishing {
    pub const fn ordered() -> [Self; 3] {
        [Self::FullyFurnished, Self::SemiFurnished, Self::Unfurnished]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FullyFurnished => "Fully Furnished",
            Self::SemiFurnished => "Semi Furnished",
            Self::Unfurnished => "Unfurnished",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::FullyFurnished => "fully_furnished",
            Self::SemiFurnished => "semi_furnished",
            Self::Unfurnished => "unfurnished",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|option| matches_option(raw, option.label(), option.key()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    SwimmingPool,
    Garden,
    Gym,
    Secured,
    CoveredParking,
    ClubHouse,
}

impl Amenity {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::SwimmingPool,
            Self::Garden,
            Self::Gym,
            Self::Secured,
            Self::CoveredParking,
            Self::ClubHouse,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SwimmingPool => "Swimming Pool",
            Self::Garden => "Garden",
            Self::Gym => "Gym",
            Self::Secured => "Secured",
            Self::CoveredParking => "Covered Parking",
            Self::ClubHouse => "Club House",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::SwimmingPool => "swimming_pool",
            Self::Garden => "garden",
            Self::Gym => "gym",
            Self::Secured => "secured",
            Self::CoveredParking => "covered_parking",
            Self::ClubHouse => "club_house",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|option| matches_option(raw, option.label(), option.key()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    OneBhk,
    TwoBhk,
    ThreeBhk,
    Villa,
    Commercial,
}

impl PropertyType {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::OneBhk,
            Self::TwoBhk,
            Self::ThreeBhk,
            Self::Villa,
            Self::Commercial,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::OneBhk => "1 BHK",
            Self::TwoBhk => "2 BHK",
            Self::ThreeBhk => "3 BHK",
            Self::Villa => "Villa",
            Self::Commercial => "Commercial",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::OneBhk => "one_bhk",
            Self::TwoBhk => "two_bhk",
            Self::ThreeBhk => "three_bhk",
            Self::Villa => "villa",
            Self::Commercial => "commercial",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|option| matches_option(raw, option.label(), option.key()))
    }
}

fn matches_option(raw: &str, label: &str, key: &str) -> bool {
    let raw = raw.trim();
    raw.eq_ignore_ascii_case(label) || raw.eq_ignore_ascii_case(key)
}

/// Raw form fields exactly as the valuation form posts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSubmission {
    pub name: String,
    pub contact: String,
    pub city: String,
    pub area: String,
    pub furnishing: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub property_type: String,
    pub size_sq_ft: f64,
}

/// Validated valuation input. Built by [`super::MarketCatalog::intake`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationRequest {
    pub name: String,
    pub contact: String,
    pub city: String,
    pub area: String,
    pub furnishing: Furnishing,
    pub amenities: Vec<Amenity>,
    pub property_type: PropertyType,
    pub size_sq_ft: f64,
}

impl ValuationRequest {
    /// Comma-joined amenity labels, or "None" when nothing was selected.
    pub fn amenities_text(&self) -> String {
        if self.amenities.is_empty() {
            return "None".to_string();
        }
        self.amenities
            .iter()
            .map(|amenity| amenity.label())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Size as entered, without grouping; whole numbers drop the fraction.
    pub fn size_text(&self) -> String {
        if self.size_sq_ft.fract() == 0.0 {
            format!("{:.0}", self.size_sq_ft)
        } else {
            format!("{}", self.size_sq_ft)
        }
    }
}
