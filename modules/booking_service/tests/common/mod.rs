//! Common test utilities: in-memory database and a small seeded directory

#![allow(dead_code)]

use booking_service::contract::ListingKind;
use booking_service::domain::{ListingForm, Service, ShowForm};
use booking_service::infra::storage::{
    migrations::Migrator,
    repositories::{SeaOrmListingRepository, SeaOrmShowRepository},
};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

/// Fresh in-memory SQLite database with all migrations applied.
/// A single pooled connection keeps the in-memory database alive.
pub async fn test_db() -> Arc<DatabaseConnection> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    Arc::new(db)
}

pub fn build_service(db: Arc<DatabaseConnection>) -> Arc<Service> {
    let listings = Arc::new(SeaOrmListingRepository::new(db.clone()));
    let shows = Arc::new(SeaOrmShowRepository::new(db));
    Arc::new(Service::new(listings, shows))
}

pub fn venue_form(name: &str, city: &str, state: &str) -> ListingForm {
    ListingForm {
        name: Some(name.to_string()),
        city: Some(city.to_string()),
        state: Some(state.to_string()),
        address: Some("1015 Folsom Street".to_string()),
        phone: Some("123-123-1234".to_string()),
        image_link: Some("https://images.example.com/venue.jpg".to_string()),
        facebook_link: None,
        website: Some("https://www.example.com".to_string()),
        genres: vec!["Jazz".to_string(), "Folk".to_string()],
        seeking_description: None,
    }
}

pub fn artist_form(name: &str) -> ListingForm {
    ListingForm {
        name: Some(name.to_string()),
        city: Some("San Francisco".to_string()),
        state: Some("CA".to_string()),
        phone: Some("326-123-5000".to_string()),
        genres: vec!["Rock n Roll".to_string()],
        seeking_description: Some("Looking for shows in the Bay Area".to_string()),
        ..Default::default()
    }
}

pub fn show_form(artist_id: i32, venue_id: i32, start_time: DateTime<Utc>) -> ShowForm {
    ShowForm {
        artist_id: Some(artist_id.to_string()),
        venue_id: Some(venue_id.to_string()),
        start_time: Some(start_time.format("%Y-%m-%d %H:%M:%S").to_string()),
    }
}

/// Ids of the seeded rows
#[derive(Debug, Clone, Copy)]
pub struct Seeded {
    pub musical_hop: i32,
    pub park_square: i32,
    pub dueling_pianos: i32,
    pub guns_n_petals: i32,
    pub matt_quevedo: i32,
    pub wild_sax_band: i32,
}

/// Three venues, three artists, and shows at The Musical Hop: one in the
/// past, two upcoming
pub async fn seed(service: &Service) -> Seeded {
    let venue = ListingKind::Venue;
    let musical_hop = create(service, venue, venue_form("The Musical Hop", "San Francisco", "CA")).await;
    let dueling_pianos = create(service, venue, venue_form("The Dueling Pianos Bar", "New York", "NY")).await;
    let park_square = create(
        service,
        venue,
        venue_form("Park Square Live Music & Coffee", "San Francisco", "CA"),
    )
    .await;

    let artist = ListingKind::Artist;
    let guns_n_petals = create(service, artist, artist_form("Guns N Petals")).await;
    let matt_quevedo = create(service, artist, artist_form("Matt Quevedo")).await;
    let wild_sax_band = create(service, artist, artist_form("The Wild Sax Band")).await;

    let now = Utc::now();
    for (artist, venue, start) in [
        (guns_n_petals, musical_hop, now - Duration::days(400)),
        (matt_quevedo, musical_hop, now + Duration::days(30)),
        (wild_sax_band, musical_hop, now + Duration::days(60)),
        (wild_sax_band, park_square, now + Duration::days(90)),
    ] {
        service.create_show(&show_form(artist, venue, start)).await.unwrap();
    }

    Seeded {
        musical_hop,
        park_square,
        dueling_pianos,
        guns_n_petals,
        matt_quevedo,
        wild_sax_band,
    }
}

async fn create(service: &Service, kind: ListingKind, form: ListingForm) -> i32 {
    service.create_listing(kind, &form).await.unwrap().id
}
