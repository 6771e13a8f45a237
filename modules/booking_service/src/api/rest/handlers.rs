//! HTTP request handlers - thin layer that delegates to domain service
//!
//! Venue and artist pages share one set of handlers parameterized by
//! [`ListingKind`]; the route wrappers pick the kind.

use super::{
    dto::*,
    error::{map_domain_error, ErrorPage},
    flash,
    mapper::error_map,
    views::View,
};
use crate::contract::{BookingError, Listing, ListingKind, ValidationErrors};
use crate::domain::Service;
use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::{CookieJar, Form};
use std::collections::BTreeMap;
use std::sync::Arc;

const INVALID_FORM: &str = "Invalid form!";
const GENERIC_FAILURE: &str = "An error occurred!";

// ===== Landing page =====

/// Most recent venues and artists
pub async fn index(service: Arc<Service>, jar: CookieJar) -> Response {
    let (jar, notice) = flash::take(jar);
    let recent = match service.recent_listings().await {
        Ok(recent) => recent,
        Err(e) => return (jar, map_domain_error(e)).into_response(),
    };

    let context = HomeDto {
        recent_venues: recent.venues.iter().map(ListingCardDto::from).collect(),
        recent_artists: recent.artists.iter().map(ListingCardDto::from).collect(),
    };
    (jar, View::new("pages/home", context).with_flash(notice)).into_response()
}

// ===== Listing pages =====

/// Venues grouped by area, or all artists
pub async fn list_listings(service: Arc<Service>, kind: ListingKind, jar: CookieJar) -> Response {
    let (jar, notice) = flash::take(jar);
    let view = match kind {
        ListingKind::Venue => service.list_by_location(kind).await.map(|groups| {
            View::new(
                "pages/venues",
                AreasDto {
                    areas: groups.into_iter().map(AreaDto::from).collect(),
                },
            )
        }),
        ListingKind::Artist => service.list_listings(kind).await.map(|artists| {
            View::new(
                "pages/artists",
                ArtistsDto {
                    artists: artists.iter().map(ListingRefDto::from).collect(),
                },
            )
        }),
    };

    match view {
        Ok(view) => (jar, view.with_flash(notice)).into_response(),
        Err(e) => (jar, map_domain_error(e)).into_response(),
    }
}

/// Name search. A blank term sends the user back to the listing page.
pub async fn search(
    service: Arc<Service>,
    kind: ListingKind,
    jar: CookieJar,
    Form(form): Form<SearchFormDto>,
) -> Response {
    let term = form.search_term.unwrap_or_default();
    let term = term.trim();
    if term.is_empty() {
        // a pending notice stays in the jar for the listing page
        return (jar, Redirect::to(&listing_path(kind))).into_response();
    }

    let (jar, notice) = flash::take(jar);
    match service.search(kind, term).await {
        Ok(hits) => {
            let context = SearchPageDto {
                results: hits.into(),
                search_term: term.to_string(),
            };
            let view = View::new(format!("pages/search_{}", kind.collection()), context);
            (jar, view.with_flash(notice)).into_response()
        }
        Err(e) => (jar, map_domain_error(e)).into_response(),
    }
}

/// Full profile with past and upcoming shows
pub async fn show_listing(
    service: Arc<Service>,
    kind: ListingKind,
    jar: CookieJar,
    Path(raw_id): Path<String>,
) -> Response {
    let (jar, notice) = flash::take(jar);
    let Some(id) = parse_id(&raw_id) else {
        return (jar, ErrorPage::not_found()).into_response();
    };

    match service.listing_detail(kind, id).await {
        Ok(detail) => {
            let view = View::new(
                format!("pages/show_{}", singular(kind)),
                ListingDetailDto::from(detail),
            );
            (jar, view.with_flash(notice)).into_response()
        }
        Err(e) => (jar, map_domain_error(e)).into_response(),
    }
}

// ===== Listing forms =====

/// Empty creation form
pub async fn create_listing_form(kind: ListingKind, jar: CookieJar) -> Response {
    let (jar, notice) = flash::take(jar);
    let context = ListingFormPageDto {
        listing: None,
        form: ListingFormDto::default(),
        errors: BTreeMap::new(),
    };
    (jar, new_listing_view(kind, context).with_flash(notice)).into_response()
}

pub async fn create_listing_submission(
    service: Arc<Service>,
    kind: ListingKind,
    jar: CookieJar,
    Form(form): Form<ListingFormDto>,
) -> Response {
    let (jar, notice) = flash::take(jar);
    match service.create_listing(kind, &form.clone().into()).await {
        Ok(listing) => {
            let message = format!(
                "{} {} was successfully listed!",
                kind.label(),
                listing.fields.name
            );
            (flash::push(jar, message), Redirect::to("/")).into_response()
        }
        Err(BookingError::Validation(errors)) => {
            tracing::warn!(%kind, %errors, "rejected listing form");
            let context = ListingFormPageDto {
                listing: None,
                form,
                errors: error_map(&errors),
            };
            let view = new_listing_view(kind, context)
                .with_status(StatusCode::UNPROCESSABLE_ENTITY)
                .with_flash(notice)
                .with_flash(Some(INVALID_FORM.to_string()));
            (jar, view).into_response()
        }
        Err(e) => {
            tracing::error!(%kind, error = %e, "failed to create listing");
            (flash::push(jar, GENERIC_FAILURE), Redirect::to("/")).into_response()
        }
    }
}

/// Edit form prefilled from the stored row
pub async fn edit_listing_form(
    service: Arc<Service>,
    kind: ListingKind,
    jar: CookieJar,
    Path(raw_id): Path<String>,
) -> Response {
    let (jar, notice) = flash::take(jar);
    let Some(id) = parse_id(&raw_id) else {
        return (jar, ErrorPage::not_found()).into_response();
    };

    let listing = match service.get_listing(kind, id).await {
        Ok(listing) => listing,
        Err(e) => return (jar, map_domain_error(e)).into_response(),
    };

    let context = ListingFormPageDto {
        listing: Some(ListingRefDto::from(&listing)),
        form: ListingFormDto::from(&listing),
        errors: BTreeMap::new(),
    };
    (jar, edit_listing_view(kind, context).with_flash(notice)).into_response()
}

pub async fn edit_listing_submission(
    service: Arc<Service>,
    kind: ListingKind,
    jar: CookieJar,
    Path(raw_id): Path<String>,
    Form(form): Form<ListingFormDto>,
) -> Response {
    let (jar, notice) = flash::take(jar);
    let Some(id) = parse_id(&raw_id) else {
        return (jar, ErrorPage::not_found()).into_response();
    };

    let current = match service.get_listing(kind, id).await {
        Ok(listing) => listing,
        Err(e) => return (jar, map_domain_error(e)).into_response(),
    };

    match service.update_listing(kind, id, &form.clone().into()).await {
        Ok(_) => {
            let message = format!("{} is successfully edited", kind.label());
            let location = format!("{}/{}", listing_path(kind), id);
            (flash::push(jar, message), Redirect::to(&location)).into_response()
        }
        Err(BookingError::Validation(errors)) => {
            tracing::warn!(%kind, id, %errors, "rejected edit form");
            let view = edit_failure(kind, &current, form, &errors, notice, INVALID_FORM)
                .with_status(StatusCode::UNPROCESSABLE_ENTITY);
            (jar, view).into_response()
        }
        Err(e @ BookingError::NotFound { .. }) => (jar, map_domain_error(e)).into_response(),
        Err(e) => {
            tracing::error!(%kind, id, error = %e, "failed to update listing");
            let errors = ValidationErrors::new();
            let view = edit_failure(kind, &current, form, &errors, notice, GENERIC_FAILURE);
            (jar, view).into_response()
        }
    }
}

/// Delete a venue or artist with its shows. Always answers JSON.
pub async fn delete_listing(
    service: Arc<Service>,
    kind: ListingKind,
    Path(raw_id): Path<String>,
) -> Json<DeleteResultDto> {
    let Some(id) = parse_id(&raw_id) else {
        return Json(DeleteResultDto { success: false });
    };

    let success = match service.delete_listing(kind, id).await {
        Ok(()) => true,
        Err(BookingError::NotFound { .. }) => false,
        Err(e) => {
            tracing::error!(%kind, id, error = %e, "failed to delete listing");
            false
        }
    };
    Json(DeleteResultDto { success })
}

// ===== Shows =====

pub async fn list_shows(service: Arc<Service>, jar: CookieJar) -> Response {
    let (jar, notice) = flash::take(jar);
    match service.list_shows().await {
        Ok(shows) => {
            let context = ShowsDto {
                shows: shows.into_iter().map(ShowDto::from).collect(),
            };
            (jar, View::new("pages/shows", context).with_flash(notice)).into_response()
        }
        Err(e) => (jar, map_domain_error(e)).into_response(),
    }
}

/// Booking form with the artists and venues to choose from
pub async fn create_show_form(service: Arc<Service>, jar: CookieJar) -> Response {
    let (jar, notice) = flash::take(jar);
    match show_form_page(&service, ShowFormDto::default(), BTreeMap::new()).await {
        Ok(context) => (jar, View::new("forms/new_show", context).with_flash(notice)).into_response(),
        Err(page) => (jar, page).into_response(),
    }
}

pub async fn create_show_submission(
    service: Arc<Service>,
    jar: CookieJar,
    Form(form): Form<ShowFormDto>,
) -> Response {
    let (jar, notice) = flash::take(jar);
    match service.create_show(&form.clone().into()).await {
        Ok(_) => (flash::push(jar, "Show was successfully listed!"), Redirect::to("/")).into_response(),
        Err(BookingError::Validation(errors)) => {
            tracing::warn!(%errors, "rejected show form");
            match show_form_page(&service, form, error_map(&errors)).await {
                Ok(context) => {
                    let view = View::new("forms/new_show", context)
                        .with_status(StatusCode::UNPROCESSABLE_ENTITY)
                        .with_flash(notice)
                        .with_flash(Some(INVALID_FORM.to_string()));
                    (jar, view).into_response()
                }
                Err(page) => (jar, page).into_response(),
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to create show");
            (flash::push(jar, GENERIC_FAILURE), Redirect::to("/")).into_response()
        }
    }
}

// ===== Helpers =====

/// Path ids that are not positive integers never match a row
fn parse_id(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok().filter(|id| *id > 0)
}

fn singular(kind: ListingKind) -> &'static str {
    match kind {
        ListingKind::Venue => "venue",
        ListingKind::Artist => "artist",
    }
}

fn listing_path(kind: ListingKind) -> String {
    format!("/{}", kind.collection())
}

fn new_listing_view(kind: ListingKind, context: ListingFormPageDto) -> View {
    View::new(format!("forms/new_{}", singular(kind)), context)
}

fn edit_listing_view(kind: ListingKind, context: ListingFormPageDto) -> View {
    View::new(format!("forms/edit_{}", singular(kind)), context)
}

/// Edit form showing the submitted values again, after any pending notice
fn edit_failure(
    kind: ListingKind,
    current: &Listing,
    form: ListingFormDto,
    errors: &ValidationErrors,
    pending: Option<String>,
    notice: &str,
) -> View {
    let context = ListingFormPageDto {
        listing: Some(ListingRefDto::from(current)),
        form,
        errors: error_map(errors),
    };
    edit_listing_view(kind, context)
        .with_flash(pending)
        .with_flash(Some(notice.to_string()))
}

async fn show_form_page(
    service: &Service,
    form: ShowFormDto,
    errors: BTreeMap<String, String>,
) -> Result<ShowFormPageDto, ErrorPage> {
    let artists = service
        .list_listings(ListingKind::Artist)
        .await
        .map_err(map_domain_error)?;
    let venues = service
        .list_listings(ListingKind::Venue)
        .await
        .map_err(map_domain_error)?;

    Ok(ShowFormPageDto {
        form,
        errors,
        artists: artists.iter().map(ListingRefDto::from).collect(),
        venues: venues.iter().map(ListingRefDto::from).collect(),
    })
}
