//! Contract models for the booking service
//!
//! These models are transport-agnostic and shared by the domain, storage and
//! REST layers. NO serde derives - the REST layer maps them onto DTOs.

use chrono::{DateTime, Utc};
use std::fmt;

/// Every persisted entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Venue,
    Artist,
    Show,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Venue => "Venue",
            Self::Artist => "Artist",
            Self::Show => "Show",
        })
    }
}

/// The two profile-shaped entities that can be browsed, searched and edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingKind {
    Venue,
    Artist,
}

impl ListingKind {
    /// Human readable label used in notices ("Venue", "Artist")
    pub fn label(self) -> &'static str {
        match self {
            Self::Venue => "Venue",
            Self::Artist => "Artist",
        }
    }

    /// URL collection segment ("venues", "artists")
    pub fn collection(self) -> &'static str {
        match self {
            Self::Venue => "venues",
            Self::Artist => "artists",
        }
    }

    /// Only venues carry a street address
    pub fn has_address(self) -> bool {
        matches!(self, Self::Venue)
    }
}

impl From<ListingKind> for EntityKind {
    fn from(kind: ListingKind) -> Self {
        match kind {
            ListingKind::Venue => EntityKind::Venue,
            ListingKind::Artist => EntityKind::Artist,
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mutable profile fields shared by venues and artists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFields {
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    /// Always `None` for artists
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    /// Free-form genre tags, in submission order
    pub genres: Vec<String>,
    pub seeking_description: Option<String>,
}

/// A stored venue or artist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub id: i32,
    pub kind: ListingKind,
    pub fields: ListingFields,
}

impl Listing {
    /// "Seeking talent" for venues, "seeking venue" for artists
    pub fn is_seeking(&self) -> bool {
        self.fields
            .seeking_description
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }
}

/// Id and name of a listing, as shown in lists and location groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRef {
    pub id: i32,
    pub name: String,
}

/// Listings sharing one (city, state) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationGroup {
    pub city: Option<String>,
    pub state: Option<String>,
    pub listings: Vec<ListingRef>,
}

/// Name search match with its number of upcoming shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: u64,
}

/// A stored show booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Show {
    pub id: i32,
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTime<Utc>,
}

/// Validated input for booking a show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShow {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTime<Utc>,
}

/// A show joined with the names of both parties
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowSummary {
    pub show_id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Shows of one listing split at request time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowSchedule {
    /// `start_time <= now`
    pub past: Vec<ShowSummary>,
    /// `start_time > now`
    pub upcoming: Vec<ShowSummary>,
}

/// Everything the detail page of a venue or artist needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDetail {
    pub listing: Listing,
    pub schedule: ShowSchedule,
}

/// Landing page content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentListings {
    pub venues: Vec<Listing>,
    pub artists: Vec<Listing>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(seeking: Option<&str>) -> Listing {
        Listing {
            id: 1,
            kind: ListingKind::Venue,
            fields: ListingFields {
                name: "The Musical Hop".to_string(),
                seeking_description: seeking.map(str::to_string),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_seeking_flag_follows_description() {
        assert!(listing(Some("Looking for local jazz acts")).is_seeking());
        assert!(!listing(None).is_seeking());
        assert!(!listing(Some("   ")).is_seeking());
    }

    #[test]
    fn test_listing_kind_labels() {
        assert_eq!(ListingKind::Venue.collection(), "venues");
        assert_eq!(ListingKind::Artist.label(), "Artist");
        assert!(!ListingKind::Artist.has_address());
        assert_eq!(EntityKind::from(ListingKind::Artist), EntityKind::Artist);
    }
}
