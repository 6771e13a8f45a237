//! SeaORM repository implementations

use crate::contract::{
    EntityKind, Listing, ListingFields, ListingKind, LocationGroup, NewShow, SearchHit, Show,
    ShowSummary,
};
use crate::domain::repository::{
    ListingRepository, RepoResult, RepositoryError, ShowRepository,
};
use crate::domain::schedule::group_by_location;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, IntoColumnRef, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;

use super::entity::{artist, show, venue};
use super::mapper::{artist_active_model, venue_active_model};

/// Escape character used in LIKE patterns
const LIKE_ESCAPE: char = '\\';

// ===== Listing Repository =====

pub struct SeaOrmListingRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmListingRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ListingRepository for SeaOrmListingRepository {
    async fn find_by_id(&self, kind: ListingKind, id: i32) -> RepoResult<Option<Listing>> {
        let db = &*self.db;
        match kind {
            ListingKind::Venue => venue::Entity::find_by_id(id)
                .one(db)
                .await?
                .map(Listing::try_from)
                .transpose(),
            ListingKind::Artist => artist::Entity::find_by_id(id)
                .one(db)
                .await?
                .map(Listing::try_from)
                .transpose(),
        }
    }

    async fn list_all(&self, kind: ListingKind) -> RepoResult<Vec<Listing>> {
        let db = &*self.db;
        match kind {
            ListingKind::Venue => to_listings(
                venue::Entity::find()
                    .order_by_asc(venue::Column::Id)
                    .all(db)
                    .await?,
            ),
            ListingKind::Artist => to_listings(
                artist::Entity::find()
                    .order_by_asc(artist::Column::Id)
                    .all(db)
                    .await?,
            ),
        }
    }

    async fn list_grouped_by_location(&self, kind: ListingKind) -> RepoResult<Vec<LocationGroup>> {
        let listings = self.list_all(kind).await?;
        Ok(group_by_location(listings))
    }

    async fn recent(&self, kind: ListingKind, limit: u64) -> RepoResult<Vec<Listing>> {
        let db = &*self.db;
        match kind {
            ListingKind::Venue => to_listings(
                venue::Entity::find()
                    .order_by_desc(venue::Column::Id)
                    .limit(limit)
                    .all(db)
                    .await?,
            ),
            ListingKind::Artist => to_listings(
                artist::Entity::find()
                    .order_by_desc(artist::Column::Id)
                    .limit(limit)
                    .all(db)
                    .await?,
            ),
        }
    }

    async fn search_by_name(
        &self,
        kind: ListingKind,
        term: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<SearchHit>> {
        let db = &*self.db;

        let matches: Vec<(i32, String)> = match kind {
            ListingKind::Venue => venue::Entity::find()
                .filter(name_contains(venue::Column::Name, term))
                .order_by_asc(venue::Column::Id)
                .all(db)
                .await?
                .into_iter()
                .map(|m| (m.id, m.name))
                .collect(),
            ListingKind::Artist => artist::Entity::find()
                .filter(name_contains(artist::Column::Name, term))
                .order_by_asc(artist::Column::Id)
                .all(db)
                .await?
                .into_iter()
                .map(|m| (m.id, m.name))
                .collect(),
        };
        if matches.is_empty() {
            return Ok(Vec::new());
        }

        let owner = owner_column(kind);
        let upcoming: HashMap<i32, i64> = show::Entity::find()
            .select_only()
            .column(owner)
            .column_as(Expr::col(show::Column::Id).count(), "upcoming")
            .filter(owner.is_in(matches.iter().map(|(id, _)| *id)))
            .filter(show::Column::StartTime.gt(now))
            .group_by(owner)
            .into_tuple::<(i32, i64)>()
            .all(db)
            .await?
            .into_iter()
            .collect();

        let hits = matches
            .into_iter()
            .map(|(id, name)| SearchHit {
                num_upcoming_shows: upcoming
                    .get(&id)
                    .map_or(0, |n| u64::try_from(*n).unwrap_or(0)),
                id,
                name,
            })
            .collect();
        Ok(hits)
    }

    async fn create(&self, kind: ListingKind, fields: &ListingFields) -> RepoResult<Listing> {
        let txn = self.db.begin().await?;
        let listing = match kind {
            ListingKind::Venue => {
                Listing::try_from(venue_active_model(None, fields).insert(&txn).await?)?
            }
            ListingKind::Artist => {
                Listing::try_from(artist_active_model(None, fields).insert(&txn).await?)?
            }
        };
        txn.commit().await?;
        Ok(listing)
    }

    async fn update(
        &self,
        kind: ListingKind,
        id: i32,
        fields: &ListingFields,
    ) -> RepoResult<Listing> {
        let txn = self.db.begin().await?;
        let not_found = RepositoryError::NotFound {
            kind: kind.into(),
            id,
        };
        let listing = match kind {
            ListingKind::Venue => {
                if venue::Entity::find_by_id(id).one(&txn).await?.is_none() {
                    return Err(not_found);
                }
                Listing::try_from(venue_active_model(Some(id), fields).update(&txn).await?)?
            }
            ListingKind::Artist => {
                if artist::Entity::find_by_id(id).one(&txn).await?.is_none() {
                    return Err(not_found);
                }
                Listing::try_from(artist_active_model(Some(id), fields).update(&txn).await?)?
            }
        };
        txn.commit().await?;
        Ok(listing)
    }

    async fn delete(&self, kind: ListingKind, id: i32) -> RepoResult<()> {
        let txn = self.db.begin().await?;

        // Shows go first so the cascade does not depend on backend FK enforcement
        show::Entity::delete_many()
            .filter(owner_column(kind).eq(id))
            .exec(&txn)
            .await?;

        let result = match kind {
            ListingKind::Venue => venue::Entity::delete_by_id(id).exec(&txn).await?,
            ListingKind::Artist => artist::Entity::delete_by_id(id).exec(&txn).await?,
        };
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound {
                kind: kind.into(),
                id,
            });
        }

        txn.commit().await?;
        Ok(())
    }
}

// ===== Show Repository =====

pub struct SeaOrmShowRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmShowRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Flat row of a show joined with both parties
#[derive(Debug, FromQueryResult)]
struct ShowSummaryRow {
    show_id: i32,
    venue_id: i32,
    venue_name: String,
    venue_image_link: Option<String>,
    artist_id: i32,
    artist_name: String,
    artist_image_link: Option<String>,
    start_time: DateTime<Utc>,
}

impl From<ShowSummaryRow> for ShowSummary {
    fn from(row: ShowSummaryRow) -> Self {
        Self {
            show_id: row.show_id,
            venue_id: row.venue_id,
            venue_name: row.venue_name,
            venue_image_link: row.venue_image_link,
            artist_id: row.artist_id,
            artist_name: row.artist_name,
            artist_image_link: row.artist_image_link,
            start_time: row.start_time,
        }
    }
}

fn summary_select() -> Select<show::Entity> {
    show::Entity::find()
        .select_only()
        .column_as(show::Column::Id, "show_id")
        .column(show::Column::VenueId)
        .column(show::Column::ArtistId)
        .column(show::Column::StartTime)
        .column_as(venue::Column::Name, "venue_name")
        .column_as(venue::Column::ImageLink, "venue_image_link")
        .column_as(artist::Column::Name, "artist_name")
        .column_as(artist::Column::ImageLink, "artist_image_link")
        .join(JoinType::InnerJoin, show::Relation::Venue.def())
        .join(JoinType::InnerJoin, show::Relation::Artist.def())
        .order_by_asc(show::Column::StartTime)
        .order_by_asc(show::Column::Id)
}

#[async_trait]
impl ShowRepository for SeaOrmShowRepository {
    async fn create(&self, new_show: &NewShow) -> RepoResult<Show> {
        use sea_orm::ActiveValue::{NotSet, Set};

        let txn = self.db.begin().await?;

        if artist::Entity::find_by_id(new_show.artist_id)
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(RepositoryError::MissingReference {
                kind: EntityKind::Artist,
                id: new_show.artist_id,
            });
        }
        if venue::Entity::find_by_id(new_show.venue_id)
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(RepositoryError::MissingReference {
                kind: EntityKind::Venue,
                id: new_show.venue_id,
            });
        }

        let active = show::ActiveModel {
            id: NotSet,
            artist_id: Set(new_show.artist_id),
            venue_id: Set(new_show.venue_id),
            start_time: Set(new_show.start_time),
        };
        let model = active.insert(&txn).await?;
        txn.commit().await?;

        Ok(model.into())
    }

    async fn list_all(&self) -> RepoResult<Vec<ShowSummary>> {
        let rows = summary_select()
            .into_model::<ShowSummaryRow>()
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn shows_for(&self, kind: ListingKind, id: i32) -> RepoResult<Vec<ShowSummary>> {
        let rows = summary_select()
            .filter(owner_column(kind).eq(id))
            .into_model::<ShowSummaryRow>()
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> RepoResult<u64> {
        Ok(show::Entity::find().count(&*self.db).await?)
    }
}

// ===== Helpers =====

fn to_listings<M>(models: Vec<M>) -> RepoResult<Vec<Listing>>
where
    Listing: TryFrom<M, Error = RepositoryError>,
{
    models.into_iter().map(Listing::try_from).collect()
}

/// Show column pointing at a listing of `kind`
fn owner_column(kind: ListingKind) -> show::Column {
    match kind {
        ListingKind::Venue => show::Column::VenueId,
        ListingKind::Artist => show::Column::ArtistId,
    }
}

/// Case-insensitive substring match on a name column.
/// Both sides are folded by the database so they always agree.
fn name_contains(column: impl IntoColumnRef, term: &str) -> SimpleExpr {
    Expr::cust_with_exprs(
        format!("LOWER($1) LIKE LOWER($2) ESCAPE '{LIKE_ESCAPE}'"),
        [
            SimpleExpr::from(Expr::col(column)),
            SimpleExpr::from(Expr::val(contains_pattern(term))),
        ],
    )
}

/// `%term%` with LIKE wildcards in the term escaped
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
