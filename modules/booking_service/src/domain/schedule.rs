//! Request-time views derived from stored rows

use crate::contract::{Listing, ListingRef, LocationGroup, ShowSchedule, ShowSummary};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Split shows at `now`: strictly later is upcoming, everything else is past.
/// Input order is preserved inside each half.
pub fn split_schedule(shows: Vec<ShowSummary>, now: DateTime<Utc>) -> ShowSchedule {
    let (upcoming, past) = shows.into_iter().partition(|s| s.start_time > now);
    ShowSchedule { past, upcoming }
}

/// Group listings by (city, state). Groups come out in city-then-state order
/// with absent values first; listings keep their input order.
pub fn group_by_location(listings: Vec<Listing>) -> Vec<LocationGroup> {
    let mut groups: BTreeMap<(Option<String>, Option<String>), Vec<ListingRef>> = BTreeMap::new();

    for listing in listings {
        let key = (listing.fields.city.clone(), listing.fields.state.clone());
        groups.entry(key).or_default().push(ListingRef {
            id: listing.id,
            name: listing.fields.name,
        });
    }

    groups
        .into_iter()
        .map(|((city, state), listings)| LocationGroup {
            city,
            state,
            listings,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{ListingFields, ListingKind};
    use chrono::{Duration, TimeZone};

    fn show(id: i32, start_time: DateTime<Utc>) -> ShowSummary {
        ShowSummary {
            show_id: id,
            venue_id: 1,
            venue_name: "The Musical Hop".to_string(),
            venue_image_link: None,
            artist_id: 1,
            artist_name: "Guns N Petals".to_string(),
            artist_image_link: None,
            start_time,
        }
    }

    fn venue(id: i32, name: &str, city: &str, state: &str) -> Listing {
        Listing {
            id,
            kind: ListingKind::Venue,
            fields: ListingFields {
                name: name.to_string(),
                city: Some(city.to_string()),
                state: Some(state.to_string()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_split_is_a_partition_at_now() {
        let now = Utc.with_ymd_and_hms(2024, 5, 21, 21, 30, 0).unwrap();
        let shows = vec![
            show(1, now - Duration::days(30)),
            show(2, now),
            show(3, now + Duration::seconds(1)),
            show(4, now + Duration::days(90)),
        ];

        let schedule = split_schedule(shows, now);

        let past: Vec<i32> = schedule.past.iter().map(|s| s.show_id).collect();
        let upcoming: Vec<i32> = schedule.upcoming.iter().map(|s| s.show_id).collect();
        assert_eq!(past, vec![1, 2]);
        assert_eq!(upcoming, vec![3, 4]);
    }

    #[test]
    fn test_split_of_nothing_is_empty() {
        let schedule = split_schedule(Vec::new(), Utc::now());
        assert_eq!(schedule, ShowSchedule::default());
    }

    #[test]
    fn test_grouping_sorts_by_city_then_state() {
        let listings = vec![
            venue(1, "The Musical Hop", "San Francisco", "CA"),
            venue(2, "The Dueling Pianos Bar", "New York", "NY"),
            venue(3, "Park Square Live Music & Coffee", "San Francisco", "CA"),
            venue(4, "Portland Hall", "Portland", "ME"),
            venue(5, "Rose Room", "Portland", "OR"),
        ];

        let groups = group_by_location(listings);

        let keys: Vec<(String, String)> = groups
            .iter()
            .map(|g| (g.city.clone().unwrap_or_default(), g.state.clone().unwrap_or_default()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("New York".to_string(), "NY".to_string()),
                ("Portland".to_string(), "ME".to_string()),
                ("Portland".to_string(), "OR".to_string()),
                ("San Francisco".to_string(), "CA".to_string()),
            ]
        );

        let sf: Vec<i32> = groups[3].listings.iter().map(|l| l.id).collect();
        assert_eq!(sf, vec![1, 3]);
    }
}
