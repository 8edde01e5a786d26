// Listing intake: validates the "list your watch" form before it reaches the catalog

use crate::identity::User;
use crate::models::{Availability, NewRentalItem, RentalPeriod, Specifications};
use crate::store::CatalogStore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("Please upload at least one image")]
    MissingImages,

    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid availability: {to} is before {from}")]
    InvalidAvailability {
        from: chrono::NaiveDate,
        to: chrono::NaiveDate,
    },

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),
}

// Raw form state; the price is still the text the owner typed
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ListingDraft {
    pub brand: String,
    pub model: String,
    pub price: String,
    pub rental_period: RentalPeriod,
    pub description: String,
    pub images: Vec<String>,
    pub specifications: Specifications,
    pub availability: Availability,
}

impl ListingDraft {
    pub fn from_json(json: &str) -> Result<Self, ListingError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(self, owner: &User) -> Result<NewRentalItem, ListingError> {
        if self.images.is_empty() {
            return Err(ListingError::MissingImages);
        }

        let brand = required(self.brand, "brand")?;
        let model = required(self.model, "model")?;
        let price_text = required(self.price, "price")?;

        let price: f64 = price_text
            .parse()
            .map_err(|_| ListingError::InvalidPrice(price_text.clone()))?;
        if !price.is_finite() || price <= 0.0 {
            return Err(ListingError::InvalidPrice(price_text));
        }

        if self.availability.to < self.availability.from {
            return Err(ListingError::InvalidAvailability {
                from: self.availability.from,
                to: self.availability.to,
            });
        }

        Ok(NewRentalItem {
            brand,
            model,
            price,
            rental_period: self.rental_period,
            images: self.images,
            description: self.description,
            specifications: self.specifications,
            owner_id: owner.id.clone(),
            owner_name: owner.name.clone(),
            owner_profile_image: owner.profile_image.clone(),
            availability: self.availability,
            reviews: Vec::new(),
            featured: false,
        })
    }
}

fn required(value: String, field: &'static str) -> Result<String, ListingError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ListingError::MissingRequiredField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

// Validate the draft and add it to the catalog, returning the new item's id
pub fn submit_listing(
    store: &CatalogStore,
    draft: ListingDraft,
    owner: &User,
) -> Result<String, ListingError> {
    let new_item = draft.validate(owner).map_err(|e| {
        warn!("Rejected listing from {}: {}", owner.id, e);
        e
    })?;

    let id = store.add(new_item);
    info!("Owner {} listed watch {}", owner.id, id);
    Ok(id)
}
