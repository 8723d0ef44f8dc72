use super::domain::{
    Amenity, FormSubmission, Furnishing, PropertyType, ValuationRequest, MIN_SIZE_SQ_FT,
};
use super::error::InputError;
use super::market::MarketCatalog;

impl MarketCatalog {
    /// Checks a submitted form against the catalog and the form's own constraints.
    pub fn intake(&self, form: FormSubmission) -> Result<ValuationRequest, InputError> {
        let FormSubmission {
            name,
            contact,
            city,
            area,
            furnishing,
            amenities,
            property_type,
            size_sq_ft,
        } = form;

        let name = required("name", name)?;
        let contact = required("contact", contact)?;
        let city = city.trim().to_string();
        let area = area.trim().to_string();

        let areas = self
            .areas(&city)
            .map_err(|_| InputError::UnknownCity(city.clone()))?;
        if !areas.iter().any(|listed| *listed == area) {
            return Err(InputError::AreaNotInCity { city, area });
        }

        let furnishing =
            Furnishing::parse(&furnishing).ok_or_else(|| InputError::UnknownOption {
                field: "furnishing",
                value: furnishing.clone(),
            })?;
        let property_type =
            PropertyType::parse(&property_type).ok_or_else(|| InputError::UnknownOption {
                field: "property type",
                value: property_type.clone(),
            })?;

        let mut selected: Vec<Amenity> = Vec::with_capacity(amenities.len());
        for raw in &amenities {
            let amenity = Amenity::parse(raw).ok_or_else(|| InputError::UnknownOption {
                field: "amenity",
                value: raw.clone(),
            })?;
            if !selected.contains(&amenity) {
                selected.push(amenity);
            }
        }

        if !size_sq_ft.is_finite() || size_sq_ft <= 0.0 {
            return Err(InputError::NonPositiveSize(size_sq_ft));
        }
        if size_sq_ft < MIN_SIZE_SQ_FT {
            return Err(InputError::BelowMinimumSize {
                size: size_sq_ft,
                min: MIN_SIZE_SQ_FT,
            });
        }

        Ok(ValuationRequest {
            name,
            contact,
            city,
            area,
            furnishing,
            amenities: selected,
            property_type,
            size_sq_ft,
        })
    }
}

fn required(field: &'static str, value: String) -> Result<String, InputError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(InputError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}
