//! Contract layer - transport-agnostic models and errors
//!
//! NO serde derives on models - these are pure domain types.

pub mod error;
pub mod model;

pub use error::{BookingError, ValidationErrors};
pub use model::{
    EntityKind, Listing, ListingDetail, ListingFields, ListingKind, ListingRef, LocationGroup,
    NewShow, RecentListings, SearchHit, Show, ShowSchedule, ShowSummary,
};
