//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{
    EntityKind, Listing, ListingFields, ListingKind, LocationGroup, NewShow, SearchHit, Show,
    ShowSummary,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage failures, categorized so callers can branch on them
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Row to update or delete does not exist
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: i32 },

    /// Foreign key target does not exist
    #[error("{kind} {id} does not exist")]
    MissingReference { kind: EntityKind, id: i32 },

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Stored row could not be mapped onto the contract model
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Repository for venues and artists
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Find a listing by id; `Ok(None)` when absent
    async fn find_by_id(&self, kind: ListingKind, id: i32) -> RepoResult<Option<Listing>>;

    /// All listings ordered by id
    async fn list_all(&self, kind: ListingKind) -> RepoResult<Vec<Listing>>;

    /// All listings grouped by (city, state), groups in city-then-state order
    async fn list_grouped_by_location(&self, kind: ListingKind) -> RepoResult<Vec<LocationGroup>>;

    /// The `limit` most recently created listings, newest first
    async fn recent(&self, kind: ListingKind, limit: u64) -> RepoResult<Vec<Listing>>;

    /// Case-insensitive substring search on name, with upcoming show counts
    async fn search_by_name(
        &self,
        kind: ListingKind,
        term: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<SearchHit>>;

    /// Insert a new listing in its own transaction
    async fn create(&self, kind: ListingKind, fields: &ListingFields) -> RepoResult<Listing>;

    /// Replace all mutable fields of an existing listing
    async fn update(&self, kind: ListingKind, id: i32, fields: &ListingFields)
        -> RepoResult<Listing>;

    /// Delete a listing together with its shows
    async fn delete(&self, kind: ListingKind, id: i32) -> RepoResult<()>;
}

/// Repository for show bookings
#[async_trait]
pub trait ShowRepository: Send + Sync {
    /// Insert a show; both parties must exist
    async fn create(&self, show: &NewShow) -> RepoResult<Show>;

    /// All shows with both party names, ordered by start time
    async fn list_all(&self) -> RepoResult<Vec<ShowSummary>>;

    /// Shows of one venue or artist, ordered by start time
    async fn shows_for(&self, kind: ListingKind, id: i32) -> RepoResult<Vec<ShowSummary>>;

    /// Total number of stored shows
    async fn count(&self) -> RepoResult<u64>;
}
