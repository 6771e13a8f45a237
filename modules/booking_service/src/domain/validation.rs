//! Form validation and normalization for submitted field sets

use crate::contract::{ListingFields, ListingKind, NewShow, ValidationErrors};
use chrono::{DateTime, NaiveDateTime, Utc};

const REQUIRED: &str = "This field is required.";

/// Column widths of the text fields
const TEXT_MAX: usize = 120;
const IMAGE_LINK_MAX: usize = 500;

/// Minimum digits in a phone number
const PHONE_MIN_DIGITS: usize = 7;

/// Naive formats accepted for `start_time`, interpreted as UTC
const START_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Raw venue/artist form as submitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingForm {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
    pub seeking_description: Option<String>,
}

/// Raw show form as submitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowForm {
    pub artist_id: Option<String>,
    pub venue_id: Option<String>,
    pub start_time: Option<String>,
}

/// Validate a venue or artist form into normalized fields.
///
/// Text is trimmed and blank values become `None`. `address` is dropped for
/// artists.
pub fn validate_listing(
    kind: ListingKind,
    form: &ListingForm,
) -> Result<ListingFields, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = match normalize(&form.name) {
        Some(name) => name,
        None => {
            errors.add("name", REQUIRED);
            String::new()
        }
    };

    let city = bounded(&mut errors, "city", &form.city, TEXT_MAX);
    let state = bounded(&mut errors, "state", &form.state, TEXT_MAX);
    let address = if kind.has_address() {
        bounded(&mut errors, "address", &form.address, TEXT_MAX)
    } else {
        None
    };

    let phone = bounded(&mut errors, "phone", &form.phone, TEXT_MAX);
    if let Some(phone) = &phone {
        if !is_phone_number(phone) {
            errors.add("phone", "Invalid phone number.");
        }
    }

    let image_link = link(&mut errors, "image_link", &form.image_link, IMAGE_LINK_MAX);
    let facebook_link = link(&mut errors, "facebook_link", &form.facebook_link, TEXT_MAX);
    let website = link(&mut errors, "website", &form.website, TEXT_MAX);
    let seeking_description = bounded(
        &mut errors,
        "seeking_description",
        &form.seeking_description,
        TEXT_MAX,
    );

    let mut genres: Vec<String> = Vec::with_capacity(form.genres.len());
    for genre in &form.genres {
        let genre = genre.trim();
        if genre.is_empty() || genres.iter().any(|g| g == genre) {
            continue;
        }
        if genre.chars().count() > TEXT_MAX {
            errors.add("genres", format!("Each genre must be at most {TEXT_MAX} characters."));
            continue;
        }
        genres.push(genre.to_string());
    }

    errors.into_result(ListingFields {
        name,
        city,
        state,
        address,
        phone,
        image_link,
        facebook_link,
        website,
        genres,
        seeking_description,
    })
}

/// Validate a show form into a booking request
pub fn validate_show(form: &ShowForm) -> Result<NewShow, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let artist_id = positive_id(&mut errors, "artist_id", &form.artist_id);
    let venue_id = positive_id(&mut errors, "venue_id", &form.venue_id);
    let start_time = match normalize(&form.start_time) {
        Some(raw) => parse_start_time(&raw).or_else(|| {
            errors.add("start_time", "Not a valid datetime value.");
            None
        }),
        None => {
            errors.add("start_time", REQUIRED);
            None
        }
    };

    match (artist_id, venue_id, start_time) {
        (Some(artist_id), Some(venue_id), Some(start_time)) if errors.is_empty() => Ok(NewShow {
            artist_id,
            venue_id,
            start_time,
        }),
        _ => Err(errors),
    }
}

/// Parse a submitted start time. Naive values are taken as UTC.
pub fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    START_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn normalize(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn bounded(
    errors: &mut ValidationErrors,
    field: &str,
    value: &Option<String>,
    max: usize,
) -> Option<String> {
    let value = normalize(value)?;
    if value.chars().count() > max {
        errors.add(field, format!("Field cannot be longer than {max} characters."));
    }
    Some(value)
}

fn link(
    errors: &mut ValidationErrors,
    field: &str,
    value: &Option<String>,
    max: usize,
) -> Option<String> {
    let value = bounded(errors, field, value, max)?;
    let valid = url::Url::parse(&value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false);
    if !valid {
        errors.add(field, "Invalid URL.");
    }
    Some(value)
}

fn positive_id(errors: &mut ValidationErrors, field: &str, value: &Option<String>) -> Option<i32> {
    let Some(raw) = normalize(value) else {
        errors.add(field, REQUIRED);
        return None;
    };
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            errors.add(field, "Not a valid integer value.");
            None
        }
    }
}

fn is_phone_number(phone: &str) -> bool {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.'));
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    allowed && digits >= PHONE_MIN_DIGITS
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn venue_form() -> ListingForm {
        ListingForm {
            name: Some("  The Musical Hop ".to_string()),
            city: Some("San Francisco".to_string()),
            state: Some("CA".to_string()),
            address: Some("1015 Folsom Street".to_string()),
            phone: Some("123-123-1234".to_string()),
            image_link: Some("https://images.example.com/hop.jpg".to_string()),
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".to_string()),
            website: Some("".to_string()),
            genres: vec![
                "Jazz".to_string(),
                " Reggae".to_string(),
                "Jazz".to_string(),
                "".to_string(),
            ],
            seeking_description: Some("We are on the lookout for a local artist".to_string()),
        }
    }

    #[test]
    fn test_valid_listing_is_normalized() {
        let fields = validate_listing(ListingKind::Venue, &venue_form()).unwrap();

        assert_eq!(fields.name, "The Musical Hop");
        assert_eq!(fields.website, None);
        assert_eq!(fields.genres, vec!["Jazz".to_string(), "Reggae".to_string()]);
        assert_eq!(fields.address.as_deref(), Some("1015 Folsom Street"));
    }

    #[test]
    fn test_artist_drops_address() {
        let fields = validate_listing(ListingKind::Artist, &venue_form()).unwrap();
        assert_eq!(fields.address, None);
    }

    #[test]
    fn test_name_is_required() {
        let mut form = venue_form();
        form.name = Some("   ".to_string());

        let errors = validate_listing(ListingKind::Venue, &form).unwrap_err();
        assert_eq!(errors.get("name"), Some(REQUIRED));
    }

    #[test]
    fn test_bad_links_and_phone_are_reported_per_field() {
        let mut form = venue_form();
        form.phone = Some("call me".to_string());
        form.facebook_link = Some("facebook.com/hop".to_string());
        form.image_link = Some("ftp://images.example.com/hop.jpg".to_string());

        let errors = validate_listing(ListingKind::Venue, &form).unwrap_err();
        assert!(errors.get("phone").is_some());
        assert!(errors.get("facebook_link").is_some());
        assert!(errors.get("image_link").is_some());
        assert!(errors.get("name").is_none());
    }

    #[test]
    fn test_too_long_city() {
        let mut form = venue_form();
        form.city = Some("x".repeat(TEXT_MAX + 1));

        let errors = validate_listing(ListingKind::Venue, &form).unwrap_err();
        assert!(errors.get("city").is_some());
    }

    #[test]
    fn test_valid_show() {
        let form = ShowForm {
            artist_id: Some("4".to_string()),
            venue_id: Some(" 1 ".to_string()),
            start_time: Some("2035-04-01 20:00:00".to_string()),
        };

        let show = validate_show(&form).unwrap();
        assert_eq!(show.artist_id, 4);
        assert_eq!(show.venue_id, 1);
        assert_eq!(show.start_time, Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap());
    }

    #[test]
    fn test_show_requires_all_fields() {
        let errors = validate_show(&ShowForm::default()).unwrap_err();
        assert_eq!(errors.get("artist_id"), Some(REQUIRED));
        assert_eq!(errors.get("venue_id"), Some(REQUIRED));
        assert_eq!(errors.get("start_time"), Some(REQUIRED));
    }

    #[test]
    fn test_show_rejects_bad_values() {
        let form = ShowForm {
            artist_id: Some("abc".to_string()),
            venue_id: Some("0".to_string()),
            start_time: Some("next friday".to_string()),
        };

        let errors = validate_show(&form).unwrap_err();
        assert!(errors.get("artist_id").is_some());
        assert!(errors.get("venue_id").is_some());
        assert!(errors.get("start_time").is_some());
    }

    #[test]
    fn test_start_time_formats() {
        let expected = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();
        assert_eq!(parse_start_time("2035-04-01 20:00"), Some(expected));
        assert_eq!(parse_start_time("2035-04-01T20:00"), Some(expected));
        assert_eq!(parse_start_time("2035-04-01T22:00:00+02:00"), Some(expected));
        assert_eq!(parse_start_time("01/04/2035"), None);
    }
}
