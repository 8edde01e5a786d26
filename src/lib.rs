// Core of the watch rental marketplace: catalog filtering and booking quotes

pub mod booking;
pub mod catalog;
pub mod identity;
pub mod listing;
pub mod models;
pub mod store;

// Re-export key types for convenience
pub use booking::{
    check_availability, quote, BookingError, DateRange, DateSelection, PriceCalculator,
    PricingConfig, QuoteBreakdown,
};
pub use catalog::{display, featured, filter, find_by_id, CatalogError, FilterSpec};
pub use identity::{
    AuthError, IdentityConfig, IdentityProvider, MockIdentityProvider, Session, SessionStore,
    User,
};
pub use listing::{submit_listing, ListingDraft, ListingError};
pub use models::{Availability, NewRentalItem, RentalItem, RentalPeriod, Review, Specifications};
pub use store::{CatalogStore, StoreStatsReport};
