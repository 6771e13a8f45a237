//! Domain service - business logic orchestration

use super::repository::{ListingRepository, RepositoryError, ShowRepository};
use super::schedule::split_schedule;
use super::validation::{validate_listing, validate_show, ListingForm, ShowForm};
use crate::contract::{
    BookingError, Listing, ListingDetail, ListingKind, LocationGroup, RecentListings,
    SearchHit, Show, ShowSummary,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Default number of listings on the landing page
pub const DEFAULT_RECENT_LIMIT: u64 = 6;

/// Domain service for venues, artists and shows
pub struct Service {
    listings: Arc<dyn ListingRepository>,
    shows: Arc<dyn ShowRepository>,
    recent_limit: u64,
}

impl Service {
    /// Create a new service instance
    pub fn new(listings: Arc<dyn ListingRepository>, shows: Arc<dyn ShowRepository>) -> Self {
        Self {
            listings,
            shows,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    /// Override how many venues and artists the landing page shows
    pub fn with_recent_limit(mut self, limit: u64) -> Self {
        self.recent_limit = limit;
        self
    }

    // ===== Read Operations =====

    /// Most recently created venues and artists, newest first
    pub async fn recent_listings(&self) -> Result<RecentListings, BookingError> {
        let venues = self
            .listings
            .recent(ListingKind::Venue, self.recent_limit)
            .await
            .map_err(map_repo_error)?;
        let artists = self
            .listings
            .recent(ListingKind::Artist, self.recent_limit)
            .await
            .map_err(map_repo_error)?;
        Ok(RecentListings { venues, artists })
    }

    pub async fn list_listings(&self, kind: ListingKind) -> Result<Vec<Listing>, BookingError> {
        self.listings.list_all(kind).await.map_err(map_repo_error)
    }

    pub async fn list_by_location(
        &self,
        kind: ListingKind,
    ) -> Result<Vec<LocationGroup>, BookingError> {
        self.listings
            .list_grouped_by_location(kind)
            .await
            .map_err(map_repo_error)
    }

    /// Case-insensitive name search. A blank term matches nothing.
    pub async fn search(
        &self,
        kind: ListingKind,
        term: &str,
    ) -> Result<Vec<SearchHit>, BookingError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        tracing::debug!(kind = %kind, term, "searching listings by name");
        self.listings
            .search_by_name(kind, term, Utc::now())
            .await
            .map_err(map_repo_error)
    }

    /// Get a listing or `NotFound`
    pub async fn get_listing(&self, kind: ListingKind, id: i32) -> Result<Listing, BookingError> {
        self.listings
            .find_by_id(kind, id)
            .await
            .map_err(map_repo_error)?
            .ok_or(BookingError::NotFound {
                kind: kind.into(),
                id,
            })
    }

    /// Listing with its shows split at the current time
    pub async fn listing_detail(
        &self,
        kind: ListingKind,
        id: i32,
    ) -> Result<ListingDetail, BookingError> {
        self.listing_detail_at(kind, id, Utc::now()).await
    }

    /// Listing with its shows split at `now`
    pub async fn listing_detail_at(
        &self,
        kind: ListingKind,
        id: i32,
        now: DateTime<Utc>,
    ) -> Result<ListingDetail, BookingError> {
        let listing = self.get_listing(kind, id).await?;
        let shows = self
            .shows
            .shows_for(kind, id)
            .await
            .map_err(map_repo_error)?;
        Ok(ListingDetail {
            listing,
            schedule: split_schedule(shows, now),
        })
    }

    pub async fn list_shows(&self) -> Result<Vec<ShowSummary>, BookingError> {
        self.shows.list_all().await.map_err(map_repo_error)
    }

    // ===== Mutations =====

    /// Validate and insert a venue or artist
    pub async fn create_listing(
        &self,
        kind: ListingKind,
        form: &ListingForm,
    ) -> Result<Listing, BookingError> {
        let fields = validate_listing(kind, form).map_err(BookingError::Validation)?;
        let listing = self
            .listings
            .create(kind, &fields)
            .await
            .map_err(map_repo_error)?;
        tracing::info!(kind = %kind, id = listing.id, "listing created");
        Ok(listing)
    }

    /// Validate and replace all mutable fields of a venue or artist
    pub async fn update_listing(
        &self,
        kind: ListingKind,
        id: i32,
        form: &ListingForm,
    ) -> Result<Listing, BookingError> {
        let fields = validate_listing(kind, form).map_err(BookingError::Validation)?;
        let listing = self
            .listings
            .update(kind, id, &fields)
            .await
            .map_err(map_repo_error)?;
        tracing::info!(kind = %kind, id, "listing updated");
        Ok(listing)
    }

    /// Delete a venue or artist along with its shows
    pub async fn delete_listing(&self, kind: ListingKind, id: i32) -> Result<(), BookingError> {
        self.listings
            .delete(kind, id)
            .await
            .map_err(map_repo_error)?;
        tracing::info!(kind = %kind, id, "listing deleted");
        Ok(())
    }

    /// Validate and book a show
    pub async fn create_show(&self, form: &ShowForm) -> Result<Show, BookingError> {
        let new_show = validate_show(form).map_err(BookingError::Validation)?;
        let show = self
            .shows
            .create(&new_show)
            .await
            .map_err(map_repo_error)?;
        tracing::info!(
            id = show.id,
            artist_id = show.artist_id,
            venue_id = show.venue_id,
            "show created"
        );
        Ok(show)
    }
}

fn map_repo_error(error: RepositoryError) -> BookingError {
    match error {
        RepositoryError::NotFound { kind, id } => BookingError::NotFound { kind, id },
        RepositoryError::MissingReference { kind, id } => {
            tracing::warn!(%kind, id, "show references a missing row");
            BookingError::MissingReference { kind, id }
        }
        RepositoryError::Database(err) => {
            tracing::error!(error = %err, "database operation failed");
            BookingError::Persistence
        }
        RepositoryError::Corrupt(detail) => {
            tracing::error!(detail = %detail, "stored row could not be read");
            BookingError::Internal
        }
    }
}
