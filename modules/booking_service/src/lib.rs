//! Booking Service Module
//!
//! A directory of music venues and artists and the shows booked between
//! them, served as HTML pages.

// Public exports
pub mod contract;
pub use contract::{
    BookingError, EntityKind, Listing, ListingFields, ListingKind, Show, ShowSummary,
    ValidationErrors,
};

pub mod config;
pub use config::Config;

pub mod module;
pub use module::BookingModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
