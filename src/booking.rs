// Booking price calculator: turns a rental price and a selected date range into a quote

use crate::models::{RentalItem, RentalPeriod};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Invalid date range: {to} is before {from}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    #[error("Item {item_id} is not available from {from} to {to}")]
    Unavailable {
        item_id: String,
        from: NaiveDate,
        to: NaiveDate,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PricingConfig {
    pub days_per_week: u32,
    // Fixed month length; not calendar-accurate
    pub days_per_month: u32,
    pub currency_symbol: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            days_per_week: 7,
            days_per_month: 30,
            currency_symbol: "$".to_string(),
        }
    }
}

// A complete booking range, both calendar dates inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, BookingError> {
        if to < from {
            return Err(BookingError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    // Inclusive day count, never less than one
    pub fn days(&self) -> i64 {
        ((self.to - self.from).num_days() + 1).max(1)
    }
}

// What the booking widget holds while the user is still picking dates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DateSelection {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateSelection {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    // None until both ends are picked
    pub fn range(&self) -> Option<Result<DateRange, BookingError>> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some(DateRange::new(from, to)),
            _ => None,
        }
    }
}

impl From<DateRange> for DateSelection {
    fn from(range: DateRange) -> Self {
        Self {
            from: Some(range.from),
            to: Some(range.to),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteBreakdown {
    pub days: i64,
    // Billed units of the rental period, rounded up
    pub units: i64,
    pub unit_price: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PriceCalculator {
    config: PricingConfig,
}

impl PriceCalculator {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn units(&self, days: i64, period: RentalPeriod) -> i64 {
        let per_unit = match period {
            RentalPeriod::Day => return days,
            RentalPeriod::Week => self.config.days_per_week,
            RentalPeriod::Month => self.config.days_per_month,
        };
        let per_unit = i64::from(per_unit.max(1));
        (days + per_unit - 1) / per_unit
    }

    pub fn quote_breakdown(
        &self,
        price: f64,
        period: RentalPeriod,
        selection: &DateSelection,
    ) -> Result<Option<QuoteBreakdown>, BookingError> {
        let range = match selection.range() {
            Some(range) => range?,
            None => return Ok(None),
        };

        let days = range.days();
        let units = self.units(days, period);
        Ok(Some(QuoteBreakdown {
            days,
            units,
            unit_price: price,
            total: units as f64 * price,
        }))
    }

    // Total for the selection; 0 while either end is still unset
    pub fn quote(
        &self,
        price: f64,
        period: RentalPeriod,
        selection: &DateSelection,
    ) -> Result<f64, BookingError> {
        Ok(self
            .quote_breakdown(price, period, selection)?
            .map_or(0.0, |breakdown| breakdown.total))
    }

    pub fn quote_item(
        &self,
        item: &RentalItem,
        selection: &DateSelection,
    ) -> Result<f64, BookingError> {
        self.quote(item.details.price, item.details.rental_period, selection)
    }

    // "$150 per day"
    pub fn format_price(&self, price: f64, period: RentalPeriod) -> String {
        format!("{}{} per {}", self.config.currency_symbol, price, period)
    }

    // "$150/d"
    pub fn format_price_short(&self, price: f64, period: RentalPeriod) -> String {
        format!("{}{}/{}", self.config.currency_symbol, price, period.short())
    }
}

pub fn quote(
    price: f64,
    period: RentalPeriod,
    selection: &DateSelection,
) -> Result<f64, BookingError> {
    PriceCalculator::default().quote(price, period, selection)
}

pub fn quote_breakdown(
    price: f64,
    period: RentalPeriod,
    selection: &DateSelection,
) -> Result<Option<QuoteBreakdown>, BookingError> {
    PriceCalculator::default().quote_breakdown(price, period, selection)
}

pub fn format_price(price: f64, period: RentalPeriod) -> String {
    PriceCalculator::default().format_price(price, period)
}

pub fn format_price_short(price: f64, period: RentalPeriod) -> String {
    PriceCalculator::default().format_price_short(price, period)
}

// Reject ranges outside the owner's availability window
pub fn check_availability(item: &RentalItem, range: &DateRange) -> Result<(), BookingError> {
    if item.details.availability.covers(range.from, range.to) {
        Ok(())
    } else {
        Err(BookingError::Unavailable {
            item_id: item.id.clone(),
            from: range.from,
            to: range.to,
        })
    }
}
