//! Mapper implementations for converting between DTOs and contract models

use super::dto::*;
use crate::contract::{
    Listing, ListingDetail, ListingKind, LocationGroup, SearchHit, ShowSummary,
    ValidationErrors,
};
use crate::domain::{ListingForm, ShowForm};
use chrono::SecondsFormat;
use std::collections::BTreeMap;

// ===== Form conversions =====

impl From<ListingFormDto> for ListingForm {
    fn from(dto: ListingFormDto) -> Self {
        Self {
            name: dto.name,
            city: dto.city,
            state: dto.state,
            address: dto.address,
            phone: dto.phone,
            image_link: dto.image_link,
            facebook_link: dto.facebook_link,
            website: dto.website,
            genres: dto.genres,
            seeking_description: dto.seeking_description,
        }
    }
}

impl From<&Listing> for ListingFormDto {
    fn from(listing: &Listing) -> Self {
        let fields = &listing.fields;
        Self {
            name: Some(fields.name.clone()),
            city: fields.city.clone(),
            state: fields.state.clone(),
            address: fields.address.clone(),
            phone: fields.phone.clone(),
            image_link: fields.image_link.clone(),
            facebook_link: fields.facebook_link.clone(),
            website: fields.website.clone(),
            genres: fields.genres.clone(),
            seeking_description: fields.seeking_description.clone(),
        }
    }
}

impl From<ShowFormDto> for ShowForm {
    fn from(dto: ShowFormDto) -> Self {
        Self {
            artist_id: dto.artist_id,
            venue_id: dto.venue_id,
            start_time: dto.start_time,
        }
    }
}

pub fn error_map(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .iter()
        .map(|(field, reason)| (field.to_string(), reason.to_string()))
        .collect()
}

// ===== Listing conversions =====

impl From<&Listing> for ListingCardDto {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id,
            name: listing.fields.name.clone(),
            image_link: listing.fields.image_link.clone(),
        }
    }
}

impl From<&Listing> for ListingRefDto {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id,
            name: listing.fields.name.clone(),
        }
    }
}

impl From<LocationGroup> for AreaDto {
    fn from(group: LocationGroup) -> Self {
        Self {
            city: group.city,
            state: group.state,
            venues: group
                .listings
                .into_iter()
                .map(|l| ListingRefDto {
                    id: l.id,
                    name: l.name,
                })
                .collect(),
        }
    }
}

impl From<Vec<SearchHit>> for SearchResultsDto {
    fn from(hits: Vec<SearchHit>) -> Self {
        let data: Vec<SearchHitDto> = hits
            .into_iter()
            .map(|hit| SearchHitDto {
                id: hit.id,
                name: hit.name,
                num_upcoming_shows: hit.num_upcoming_shows,
            })
            .collect();
        Self {
            count: data.len(),
            data,
        }
    }
}

impl From<ListingDetail> for ListingDetailDto {
    fn from(detail: ListingDetail) -> Self {
        let ListingDetail { listing, schedule } = detail;
        let seeking = listing.is_seeking();
        let kind = listing.kind;
        let fields = listing.fields;

        let past_shows: Vec<ShowDto> = schedule.past.into_iter().map(Into::into).collect();
        let upcoming_shows: Vec<ShowDto> = schedule.upcoming.into_iter().map(Into::into).collect();

        Self {
            id: listing.id,
            name: fields.name,
            genres: fields.genres,
            address: fields.address,
            city: fields.city,
            state: fields.state,
            phone: fields.phone,
            website: fields.website,
            facebook_link: fields.facebook_link,
            seeking_talent: (kind == ListingKind::Venue).then_some(seeking),
            seeking_venue: (kind == ListingKind::Artist).then_some(seeking),
            seeking_description: fields.seeking_description,
            image_link: fields.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

// ===== Show conversions =====

impl From<ShowSummary> for ShowDto {
    fn from(show: ShowSummary) -> Self {
        Self {
            venue_id: show.venue_id,
            venue_name: show.venue_name,
            venue_image_link: show.venue_image_link,
            artist_id: show.artist_id,
            artist_name: show.artist_name,
            artist_image_link: show.artist_image_link,
            start_time: show.start_time.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}
