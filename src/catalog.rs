// Catalog filter engine: narrowing, featured selection and lookup over rental items
use crate::models::{NewRentalItem, RentalItem, RentalPeriod};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

// Error types for catalog loading
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Duplicate item id: {0}")]
    DuplicateId(String),
}

// Optional constraints narrowing the catalog, combined with AND.
// Unknown keys are rejected when the spec arrives as JSON.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FilterSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rental_period: Option<RentalPeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
}

impl FilterSpec {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    // An empty string narrows nothing, so it counts as unset
    fn brand(&self) -> Option<String> {
        non_empty(&self.brand).map(str::to_lowercase)
    }

    fn search_term(&self) -> Option<String> {
        non_empty(&self.search_term).map(str::to_lowercase)
    }

    pub fn is_empty(&self) -> bool {
        self.brand().is_none()
            && self.price_min.is_none()
            && self.price_max.is_none()
            && self.rental_period.is_none()
            && self.search_term().is_none()
    }

    pub fn matches(&self, item: &RentalItem) -> bool {
        Matcher::new(self).matches(item)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// FilterSpec with the text constraints lower-cased once per query
struct Matcher<'a> {
    spec: &'a FilterSpec,
    brand: Option<String>,
    search_term: Option<String>,
}

impl<'a> Matcher<'a> {
    fn new(spec: &'a FilterSpec) -> Self {
        Self {
            spec,
            brand: spec.brand(),
            search_term: spec.search_term(),
        }
    }

    fn matches(&self, item: &RentalItem) -> bool {
        if !self
            .brand
            .as_ref()
            .map_or(true, |brand| item.details.brand.to_lowercase().contains(brand))
        {
            return false;
        }

        if !self.spec.price_min.map_or(true, |min| item.details.price >= min) {
            return false;
        }

        if !self.spec.price_max.map_or(true, |max| item.details.price <= max) {
            return false;
        }

        if !self
            .spec
            .rental_period
            .map_or(true, |period| item.details.rental_period == period)
        {
            return false;
        }

        self.search_term.as_ref().map_or(true, |term| {
            item.details.brand.to_lowercase().contains(term)
                || item.details.model.to_lowercase().contains(term)
                || item.details.description.to_lowercase().contains(term)
        })
    }
}

// Items satisfying every constraint of `spec`, in their original order
pub fn filter(items: &[RentalItem], spec: &FilterSpec) -> Vec<RentalItem> {
    let matcher = Matcher::new(spec);
    items
        .iter()
        .filter(|item| matcher.matches(item))
        .cloned()
        .collect()
}

pub fn featured(items: &[RentalItem]) -> Vec<RentalItem> {
    items.iter().filter(|item| item.details.featured).cloned().collect()
}

// The list a catalog page shows. An empty filter lands on the featured
// watches when there are any, and only falls back to everything otherwise.
pub fn display(items: &[RentalItem], spec: &FilterSpec) -> Vec<RentalItem> {
    if !spec.is_empty() {
        return filter(items, spec);
    }

    let featured = featured(items);
    if !featured.is_empty() {
        featured
    } else {
        items.to_vec()
    }
}

pub fn find_by_id<'a>(items: &'a [RentalItem], id: &str) -> Option<&'a RentalItem> {
    items.iter().find(|item| item.id == id)
}

// Append a new item under a freshly generated id. The input slice is left
// untouched so earlier snapshots keep their contents.
pub fn add(items: &[RentalItem], new_item: NewRentalItem) -> (Vec<RentalItem>, String) {
    let id = generate_id(items);
    let mut next = Vec::with_capacity(items.len() + 1);
    next.extend_from_slice(items);
    next.push(RentalItem::from_new(id.clone(), new_item));
    (next, id)
}

// Clock-derived id with a random suffix, retried until it is unused
fn generate_id(items: &[RentalItem]) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    loop {
        let id = format!("{}{:04}", millis, rand::random::<u16>() % 10_000);
        if find_by_id(items, &id).is_none() {
            return id;
        }
    }
}

// Watches listed by one owner (dashboard and profile pages)
pub fn owned_by(items: &[RentalItem], owner_id: &str) -> Vec<RentalItem> {
    items
        .iter()
        .filter(|item| item.details.owner_id == owner_id)
        .cloned()
        .collect()
}

// Distinct brands sorted alphabetically, for filter facet options
pub fn brands(items: &[RentalItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.details.brand.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn parse_catalog(json: &str) -> Result<Vec<RentalItem>, CatalogError> {
    let items: Vec<RentalItem> = serde_json::from_str(json)?;

    let mut ids = HashSet::new();
    for item in &items {
        if !ids.insert(item.id.as_str()) {
            return Err(CatalogError::DuplicateId(item.id.clone()));
        }
    }

    Ok(items)
}

pub fn load_catalog(path: impl AsRef<std::path::Path>) -> Result<Vec<RentalItem>, CatalogError> {
    let content = std::fs::read_to_string(path)?;
    parse_catalog(&content)
}

pub fn load_sample_catalog() -> Result<Vec<RentalItem>, CatalogError> {
    load_catalog(SAMPLE_CATALOG_PATH)
}

// Seed catalog shipped in the samples directory
pub const SAMPLE_CATALOG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/samples/watches.json");
