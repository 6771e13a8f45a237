//! Route registration

use super::{
    dto::*,
    error::not_found_fallback,
    handlers,
    views::{render_views, ViewRenderer},
};
use crate::contract::ListingKind;
use crate::domain::Service;
use axum::{
    extract::Path,
    middleware,
    response::Response,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::{CookieJar, Form};
use std::sync::Arc;

/// Register all page routes. Views returned by handlers are rendered with
/// `renderer`; unknown paths get the 404 page.
pub fn register_routes(
    router: Router,
    service: Arc<Service>,
    renderer: Arc<dyn ViewRenderer>,
) -> anyhow::Result<Router> {
    let router = router
        .route("/", get(index_handler))
        // Venues
        .route("/venues", get(list_venues_handler))
        .route("/venues/search", post(search_venues_handler))
        .route(
            "/venues/create",
            get(create_venue_form_handler).post(create_venue_handler),
        )
        .route(
            "/venues/{venue_id}",
            get(show_venue_handler).delete(delete_venue_handler),
        )
        .route(
            "/venues/{venue_id}/edit",
            get(edit_venue_form_handler).post(edit_venue_handler),
        )
        // Artists
        .route("/artists", get(list_artists_handler))
        .route("/artists/search", post(search_artists_handler))
        .route(
            "/artists/create",
            get(create_artist_form_handler).post(create_artist_handler),
        )
        .route(
            "/artists/{artist_id}",
            get(show_artist_handler).delete(delete_artist_handler),
        )
        .route(
            "/artists/{artist_id}/edit",
            get(edit_artist_form_handler).post(edit_artist_handler),
        )
        // Shows
        .route("/shows", get(list_shows_handler))
        .route(
            "/shows/create",
            get(create_show_form_handler).post(create_show_handler),
        )
        .fallback(not_found_fallback)
        .layer(middleware::map_response_with_state(renderer, render_views))
        .layer(Extension(service));

    Ok(router)
}

// ===== Handler wrappers that extract service from Extension =====

async fn index_handler(Extension(service): Extension<Arc<Service>>, jar: CookieJar) -> Response {
    handlers::index(service, jar).await
}

async fn list_venues_handler(
    Extension(service): Extension<Arc<Service>>,
    jar: CookieJar,
) -> Response {
    handlers::list_listings(service, ListingKind::Venue, jar).await
}

async fn search_venues_handler(
    Extension(service): Extension<Arc<Service>>,
    jar: CookieJar,
    form: Form<SearchFormDto>,
) -> Response {
    handlers::search(service, ListingKind::Venue, jar, form).await
}

async fn show_venue_handler(
    Extension(service): Extension<Arc<Service>>,
    jar: CookieJar,
    path: Path<String>,
) -> Response {
    handlers::show_listing(service, ListingKind::Venue, jar, path).await
}

async fn create_venue_form_handler(jar: CookieJar) -> Response {
    handlers::create_listing_form(ListingKind::Venue, jar).await
}

async fn create_venue_handler(
    Extension(service): Extension<Arc<Service>>,
    jar: CookieJar,
    form: Form<ListingFormDto>,
) -> Response {
    handlers::create_listing_submission(service, ListingKind::Venue, jar, form).await
}

async fn edit_venue_form_handler(
    Extension(service): Extension<Arc<Service>>,
    jar: CookieJar,
    path: Path<String>,
) -> Response {
    handlers::edit_listing_form(service, ListingKind::Venue, jar, path).await
}

async fn edit_venue_handler(
    Extension(service): Extension<Arc<Service>>,
    jar: CookieJar,
    path: Path<String>,
    form: Form<ListingFormDto>,
) -> Response {
    handlers::edit_listing_submission(service, ListingKind::Venue, jar, path, form).await
}

async fn delete_venue_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<String>,
) -> Json<DeleteResultDto> {
    handlers::delete_listing(service, ListingKind::Venue, path).await
}

async fn list_artists_handler(
    Extension(service): Extension<Arc<Service>>,
    jar: CookieJar,
) -> Response {
    handlers::list_listings(service, ListingKind::Artist, jar).await
}

async fn search_artists_handler(
    Extension(service): Extension<Arc<Service>>,
    jar: CookieJar,
    form: Form<SearchFormDto>,
) -> Response {
    handlers::search(service, ListingKind::Artist, jar, form).await
}

async fn show_artist_handler(
    Extension(service): Extension<Arc<Service>>,
    jar: CookieJar,
    path: Path<String>,
) -> Response {
    handlers::show_listing(service, ListingKind::Artist, jar, path).await
}

async fn create_artist_form_handler(jar: CookieJar) -> Response {
    handlers::create_listing_form(ListingKind::Artist, jar).await
}

async fn create_artist_handler(
    Extension(service): Extension<Arc<Service>>,
    jar: CookieJar,
    form: Form<ListingFormDto>,
) -> Response {
    handlers::create_listing_submission(service, ListingKind::Artist, jar, form).await
}

async fn edit_artist_form_handler(
    Extension(service): Extension<Arc<Service>>,
    jar: CookieJar,
    path: Path<String>,
) -> Response {
    handlers::edit_listing_form(service, ListingKind::Artist, jar, path).await
}

async fn edit_artist_handler(
    Extension(service): Extension<Arc<Service>>,
    jar: CookieJar,
    path: Path<String>,
    form: Form<ListingFormDto>,
) -> Response {
    handlers::edit_listing_submission(service, ListingKind::Artist, jar, path, form).await
}

async fn delete_artist_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<String>,
) -> Json<DeleteResultDto> {
    handlers::delete_listing(service, ListingKind::Artist, path).await
}

async fn list_shows_handler(
    Extension(service): Extension<Arc<Service>>,
    jar: CookieJar,
) -> Response {
    handlers::list_shows(service, jar).await
}

async fn create_show_form_handler(
    Extension(service): Extension<Arc<Service>>,
    jar: CookieJar,
) -> Response {
    handlers::create_show_form(service, jar).await
}

async fn create_show_handler(
    Extension(service): Extension<Arc<Service>>,
    jar: CookieJar,
    form: Form<ShowFormDto>,
) -> Response {
    handlers::create_show_submission(service, jar, form).await
}
