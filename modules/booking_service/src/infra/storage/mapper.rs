//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity::{artist, show, venue};
use crate::contract::{Listing, ListingFields, ListingKind, Show};
use crate::domain::RepositoryError;
use sea_orm::ActiveValue::{NotSet, Set};

// ===== Listing Conversions =====

impl TryFrom<venue::Model> for Listing {
    type Error = RepositoryError;

    fn try_from(entity: venue::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            kind: ListingKind::Venue,
            fields: ListingFields {
                name: entity.name,
                city: entity.city,
                state: entity.state,
                address: entity.address,
                phone: entity.phone,
                image_link: entity.image_link,
                facebook_link: entity.facebook_link,
                website: entity.website,
                genres: decode_genres(entity.genres)?,
                seeking_description: entity.seeking_description,
            },
        })
    }
}

impl TryFrom<artist::Model> for Listing {
    type Error = RepositoryError;

    fn try_from(entity: artist::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            kind: ListingKind::Artist,
            fields: ListingFields {
                name: entity.name,
                city: entity.city,
                state: entity.state,
                address: None,
                phone: entity.phone,
                image_link: entity.image_link,
                facebook_link: entity.facebook_link,
                website: entity.website,
                genres: decode_genres(entity.genres)?,
                seeking_description: entity.seeking_description,
            },
        })
    }
}

/// Active model carrying every mutable venue column; `id` set only for updates
pub fn venue_active_model(id: Option<i32>, fields: &ListingFields) -> venue::ActiveModel {
    venue::ActiveModel {
        id: id.map_or(NotSet, Set),
        name: Set(fields.name.clone()),
        city: Set(fields.city.clone()),
        state: Set(fields.state.clone()),
        address: Set(fields.address.clone()),
        phone: Set(fields.phone.clone()),
        image_link: Set(fields.image_link.clone()),
        facebook_link: Set(fields.facebook_link.clone()),
        website: Set(fields.website.clone()),
        genres: Set(serde_json::Value::from(fields.genres.clone())),
        seeking_description: Set(fields.seeking_description.clone()),
    }
}

/// Active model carrying every mutable artist column; `id` set only for updates
pub fn artist_active_model(id: Option<i32>, fields: &ListingFields) -> artist::ActiveModel {
    artist::ActiveModel {
        id: id.map_or(NotSet, Set),
        name: Set(fields.name.clone()),
        city: Set(fields.city.clone()),
        state: Set(fields.state.clone()),
        phone: Set(fields.phone.clone()),
        image_link: Set(fields.image_link.clone()),
        facebook_link: Set(fields.facebook_link.clone()),
        website: Set(fields.website.clone()),
        genres: Set(serde_json::Value::from(fields.genres.clone())),
        seeking_description: Set(fields.seeking_description.clone()),
    }
}

// ===== Show Conversions =====

impl From<show::Model> for Show {
    fn from(entity: show::Model) -> Self {
        Self {
            id: entity.id,
            artist_id: entity.artist_id,
            venue_id: entity.venue_id,
            start_time: entity.start_time,
        }
    }
}

/// Genres are stored as a JSON array; NULL reads as no genres
fn decode_genres(json: serde_json::Value) -> Result<Vec<String>, RepositoryError> {
    if json.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(json).map_err(|e| RepositoryError::Corrupt(format!("genres: {e}")))
}
