use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Billing granularity a rental price is denominated in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalPeriod {
    #[default]
    Day,
    Week,
    Month,
}

impl RentalPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalPeriod::Day => "day",
            RentalPeriod::Week => "week",
            RentalPeriod::Month => "month",
        }
    }

    // Single-letter suffix used on catalog cards ("$150/d")
    pub fn short(&self) -> char {
        match self {
            RentalPeriod::Day => 'd',
            RentalPeriod::Week => 'w',
            RentalPeriod::Month => 'm',
        }
    }
}

impl std::fmt::Display for RentalPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// A single catalog entry available for rental
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalItem {
    pub id: String,
    #[serde(flatten)]
    pub details: NewRentalItem,
}

impl RentalItem {
    pub fn from_new(id: String, details: NewRentalItem) -> Self {
        Self { id, details }
    }

    // Mean review rating, None when the watch has never been reviewed
    pub fn average_rating(&self) -> Option<f64> {
        if self.details.reviews.is_empty() {
            None
        } else {
            Some(average_rating(&self.details.reviews))
        }
    }
}

// Everything a listing carries except its id
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRentalItem {
    pub brand: String,
    pub model: String,
    pub price: f64,
    pub rental_period: RentalPeriod,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub specifications: Specifications,
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_profile_image: Option<String>,
    pub availability: Availability,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Specifications {
    pub diameter: String,
    pub movement: String,
    pub case_material: String,
    pub strap_material: String,
    pub year_of_manufacture: String,
    pub condition: String,
}

// Window in which the owner makes the watch available, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Availability {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl Default for Availability {
    fn default() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            from: today,
            to: today
                .checked_add_months(chrono::Months::new(6))
                .unwrap_or(today),
        }
    }
}

impl Availability {
    pub fn covers(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.from <= from && to <= self.to
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub rating: u8,
    pub comment: String,
    pub reviewer_id: String,
    pub reviewer_name: String,
}

// Mean rating across reviews, 0 for an empty slice (profile page convention)
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|r| r.rating as u32).sum();
    sum as f64 / reviews.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: u8) -> Review {
        Review {
            rating,
            comment: "Great".to_string(),
            reviewer_id: "789".to_string(),
            reviewer_name: "Emma Thompson".to_string(),
        }
    }

    #[test]
    fn test_rental_period_wire_format() {
        let period: RentalPeriod = serde_json::from_str("\"week\"").unwrap();
        assert_eq!(period, RentalPeriod::Week);
        assert_eq!(serde_json::to_string(&RentalPeriod::Month).unwrap(), "\"month\"");
        assert!(serde_json::from_str::<RentalPeriod>("\"year\"").is_err());
    }

    #[test]
    fn test_item_deserializes_with_optional_payload_missing() {
        let json = r#"{
            "id": "42",
            "brand": "Tudor",
            "model": "Black Bay",
            "price": 80,
            "rentalPeriod": "week",
            "availability": { "from": "2023-01-01", "to": "2023-12-31" }
        }"#;

        let item: RentalItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "42");
        assert_eq!(item.details.brand, "Tudor");
        assert_eq!(item.details.price, 80.0);
        assert_eq!(item.details.rental_period, RentalPeriod::Week);
        assert!(!item.details.featured);
        assert!(item.details.reviews.is_empty());
        assert_eq!(item.average_rating(), None);
    }

    #[test]
    fn test_average_rating() {
        assert_eq!(average_rating(&[]), 0.0);
        assert_eq!(average_rating(&[review(5), review(4)]), 4.5);
    }

    #[test]
    fn test_availability_covers_inclusive_bounds() {
        let availability = Availability {
            from: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        };

        assert!(availability.covers(availability.from, availability.to));
        assert!(!availability.covers(
            NaiveDate::from_ymd_opt(2022, 12, 31).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 5).unwrap()
        ));
        assert!(!availability.covers(
            NaiveDate::from_ymd_opt(2023, 12, 30).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        ));
    }
}
