//! REST DTOs with serde derives - form bodies in, view contexts out

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ===== Form DTOs =====

/// Venue/artist form body. `genres` arrives as repeated fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingFormDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

/// Show form body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowFormDto {
    #[serde(default)]
    pub artist_id: Option<String>,
    #[serde(default)]
    pub venue_id: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
}

/// Search form body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchFormDto {
    #[serde(default)]
    pub search_term: Option<String>,
}

// ===== View Context DTOs =====

/// Card on the landing page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingCardDto {
    pub id: i32,
    pub name: String,
    pub image_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeDto {
    pub recent_venues: Vec<ListingCardDto>,
    pub recent_artists: Vec<ListingCardDto>,
}

/// Id and name of a venue or artist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingRefDto {
    pub id: i32,
    pub name: String,
}

/// One (city, state) area on the venues page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaDto {
    pub city: Option<String>,
    pub state: Option<String>,
    pub venues: Vec<ListingRefDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreasDto {
    pub areas: Vec<AreaDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsDto {
    pub artists: Vec<ListingRefDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHitDto {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResultsDto {
    pub count: usize,
    pub data: Vec<SearchHitDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPageDto {
    pub results: SearchResultsDto,
    pub search_term: String,
}

/// A show as listed on detail pages and the shows page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowDto {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    /// RFC 3339, UTC
    pub start_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowsDto {
    pub shows: Vec<ShowDto>,
}

/// Venue or artist detail page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingDetailDto {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    /// Venues only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seeking_talent: Option<bool>,
    /// Artists only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seeking_venue: Option<bool>,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ShowDto>,
    pub upcoming_shows: Vec<ShowDto>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Create/edit form page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingFormPageDto {
    /// Present on edit forms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing: Option<ListingRefDto>,
    pub form: ListingFormDto,
    pub errors: BTreeMap<String, String>,
}

/// Show booking form page, with the choices for both parties
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowFormPageDto {
    pub form: ShowFormDto,
    pub errors: BTreeMap<String, String>,
    pub artists: Vec<ListingRefDto>,
    pub venues: Vec<ListingRefDto>,
}

/// Body of `DELETE /venues/{id}` and `DELETE /artists/{id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResultDto {
    pub success: bool,
}

/// Error pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPageDto {
    pub status: u16,
}
