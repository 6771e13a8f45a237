//! Domain layer - business logic and services

pub mod repository;
pub mod schedule;
pub mod service;
pub mod validation;

pub use repository::{ListingRepository, RepoResult, RepositoryError, ShowRepository};
pub use service::Service;
pub use validation::{ListingForm, ShowForm};
