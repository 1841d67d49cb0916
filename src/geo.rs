//! Geo-extraction and route linking
//!
//! Walks a validated itinerary in day/activity order, extracting map
//! markers for every mappable point and deriving a per-day navigation
//! link from the deduplicated waypoint sequence. Everything here is
//! best-effort per point: a missing or unusable coordinate reduces the
//! output, it never fails the request.

use tracing::{debug, warn};

use crate::itinerary::{Activity, ActivityKind, Coord, DayPlan, ItineraryDocument, MapMarker};

/// Base URL the per-day waypoint sequence is anchored at
pub const NAVIGATION_BASE_URL: &str = "https://www.google.com/maps/dir/";

/// Coerce a coordinate field, logging when a present value is unusable.
///
/// An absent coordinate is normal ("not mappable") and stays silent.
fn coerce_coordinate(coord: Option<&Coord>, activity_id: &str, field: &str) -> Option<f64> {
    let coord = coord?;
    match coord.as_f64() {
        Some(value) => Some(value),
        None => {
            warn!(
                "Skipping map point for activity '{}': '{}' is not a usable coordinate: {:?}",
                activity_id, field, coord
            );
            None
        }
    }
}

/// Build the flat marker list across all days.
///
/// Visit activities yield one marker; Travel activities yield a start and
/// an end marker when both endpoints are fully mappable, and none
/// otherwise.
pub fn collect_markers(doc: &ItineraryDocument) -> Vec<MapMarker> {
    let mut markers = Vec::new();

    for (day_index, day) in doc.days.iter().enumerate() {
        for activity in &day.activities {
            match activity {
                Activity::Visit(v) => {
                    let lat = coerce_coordinate(v.latitude.as_ref(), &v.id, "latitude");
                    let lon = coerce_coordinate(v.longitude.as_ref(), &v.id, "longitude");
                    if let (Some(lat), Some(lon)) = (lat, lon) {
                        markers.push(MapMarker {
                            lat,
                            lon,
                            popup_text: v.location_name.clone().unwrap_or_default(),
                            activity_id: v.id.clone(),
                            kind: ActivityKind::Visit,
                            day_index,
                        });
                    }
                }
                Activity::Travel(t) => {
                    let start_lat =
                        coerce_coordinate(t.start_point_lat.as_ref(), &t.id, "start_point_lat");
                    let start_lon =
                        coerce_coordinate(t.start_point_lon.as_ref(), &t.id, "start_point_lon");
                    let end_lat =
                        coerce_coordinate(t.end_point_lat.as_ref(), &t.id, "end_point_lat");
                    let end_lon =
                        coerce_coordinate(t.end_point_lon.as_ref(), &t.id, "end_point_lon");

                    if let (Some(start_lat), Some(start_lon), Some(end_lat), Some(end_lon)) =
                        (start_lat, start_lon, end_lat, end_lon)
                    {
                        markers.push(MapMarker {
                            lat: start_lat,
                            lon: start_lon,
                            popup_text: format!(
                                "Start: {}",
                                t.start_point_location.as_deref().unwrap_or_default()
                            ),
                            activity_id: format!("{}-start", t.id),
                            kind: ActivityKind::Travel,
                            day_index,
                        });
                        markers.push(MapMarker {
                            lat: end_lat,
                            lon: end_lon,
                            popup_text: format!(
                                "End: {}",
                                t.end_point_location.as_deref().unwrap_or_default()
                            ),
                            activity_id: format!("{}-end", t.id),
                            kind: ActivityKind::Travel,
                            day_index,
                        });
                    }
                }
            }
        }
    }

    debug!("Finished building map markers. Total points: {}", markers.len());
    markers
}

/// The point an activity contributes to the day's route: a Visit's own
/// location, a Travel leg's end point.
fn representative_point(activity: &Activity) -> Option<(f64, f64)> {
    let (lat, lon) = match activity {
        Activity::Visit(v) => (v.latitude.as_ref(), v.longitude.as_ref()),
        Activity::Travel(t) => (t.end_point_lat.as_ref(), t.end_point_lon.as_ref()),
    };
    Some((lat?.as_f64()?, lon?.as_f64()?))
}

fn format_waypoint(lat: f64, lon: f64) -> String {
    format!("{},{}", lat, lon)
}

/// Derive the navigation link for one day, or `None` when fewer than two
/// distinct waypoints remain after dropping consecutive repeats.
fn route_link(day: &DayPlan) -> Option<String> {
    let mut waypoints: Vec<String> = Vec::new();
    for activity in &day.activities {
        if let Some((lat, lon)) = representative_point(activity) {
            let waypoint = format_waypoint(lat, lon);
            if waypoints.last() != Some(&waypoint) {
                waypoints.push(waypoint);
            }
        }
    }

    if waypoints.len() > 1 {
        Some(format!("{}{}", NAVIGATION_BASE_URL, waypoints.join("/")))
    } else {
        None
    }
}

/// Attach the derived navigation link to every day of the document
pub fn attach_navigation_links(doc: &mut ItineraryDocument) {
    for day in &mut doc.days {
        day.navigation_link = route_link(day);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::{TravelActivity, VisitActivity};
    use proptest::prelude::*;

    fn visit(id: &str, lat: Option<Coord>, lon: Option<Coord>) -> Activity {
        Activity::Visit(VisitActivity {
            id: id.to_string(),
            time_slot: "09:00".to_string(),
            description: "- Look around".to_string(),
            location_name: Some("Somewhere".to_string()),
            latitude: lat,
            longitude: lon,
            cost_estimate: None,
        })
    }

    fn travel(
        id: &str,
        start: Option<(Coord, Coord)>,
        end: Option<(Coord, Coord)>,
    ) -> Activity {
        let (start_point_lat, start_point_lon) = match start {
            Some((lat, lon)) => (Some(lat), Some(lon)),
            None => (None, None),
        };
        let (end_point_lat, end_point_lon) = match end {
            Some((lat, lon)) => (Some(lat), Some(lon)),
            None => (None, None),
        };
        Activity::Travel(TravelActivity {
            id: id.to_string(),
            time_slot: "11:00".to_string(),
            description: "- Ride the metro".to_string(),
            transport_mode_details: Some("Metro".to_string()),
            start_point_location: Some("Old Town".to_string()),
            end_point_location: Some("Harbor".to_string()),
            start_point_lat,
            start_point_lon,
            end_point_lat,
            end_point_lon,
            cost_estimate: None,
        })
    }

    fn day(activities: Vec<Activity>) -> DayPlan {
        DayPlan {
            day: "Day 1".to_string(),
            date: "2026-09-01".to_string(),
            activities,
            navigation_link: None,
        }
    }

    fn num(v: f64) -> Coord {
        Coord::Number(v)
    }

    #[test]
    fn visit_with_coordinates_yields_one_marker() {
        let doc = ItineraryDocument {
            days: vec![
                day(vec![]),
                day(vec![visit("a1", Some(num(48.85)), Some(num(2.35)))]),
            ],
        };
        let markers = collect_markers(&doc);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].lat, 48.85);
        assert_eq!(markers[0].lon, 2.35);
        assert_eq!(markers[0].activity_id, "a1");
        assert_eq!(markers[0].kind, ActivityKind::Visit);
        assert_eq!(markers[0].day_index, 1);
    }

    #[test]
    fn travel_with_both_endpoints_yields_start_and_end_markers() {
        let doc = ItineraryDocument {
            days: vec![day(vec![travel(
                "t1",
                Some((num(1.0), num(1.0))),
                Some((num(2.0), num(2.0))),
            )])],
        };
        let markers = collect_markers(&doc);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].activity_id, "t1-start");
        assert_eq!(markers[0].popup_text, "Start: Old Town");
        assert_eq!(markers[1].activity_id, "t1-end");
        assert_eq!(markers[1].popup_text, "End: Harbor");
        assert!(markers.iter().all(|m| m.kind == ActivityKind::Travel));
    }

    #[test]
    fn travel_missing_end_coordinates_yields_no_markers() {
        let doc = ItineraryDocument {
            days: vec![day(vec![travel("t1", Some((num(1.0), num(1.0))), None)])],
        };
        assert!(collect_markers(&doc).is_empty());
    }

    #[test]
    fn visit_missing_a_coordinate_is_silently_skipped() {
        let doc = ItineraryDocument {
            days: vec![day(vec![visit("a1", Some(num(48.85)), None)])],
        };
        assert!(collect_markers(&doc).is_empty());
    }

    #[test]
    fn numeric_string_coordinates_coerce() {
        let doc = ItineraryDocument {
            days: vec![day(vec![visit(
                "a1",
                Some(Coord::Text("48.85".to_string())),
                Some(Coord::Text("2.35".to_string())),
            )])],
        };
        let markers = collect_markers(&doc);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].lat, 48.85);
    }

    #[test]
    fn unusable_coordinate_skips_the_point_without_failing() {
        let doc = ItineraryDocument {
            days: vec![day(vec![
                visit(
                    "a1",
                    Some(Coord::Text("north of town".to_string())),
                    Some(num(2.35)),
                ),
                visit("a2", Some(num(48.85)), Some(num(2.35))),
            ])],
        };
        let markers = collect_markers(&doc);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].activity_id, "a2");
    }

    #[test]
    fn route_drops_only_consecutive_repeats() {
        let mut doc = ItineraryDocument {
            days: vec![day(vec![
                visit("a1", Some(num(1.0)), Some(num(1.0))),
                visit("a2", Some(num(1.0)), Some(num(1.0))),
                visit("a3", Some(num(2.0)), Some(num(2.0))),
            ])],
        };
        attach_navigation_links(&mut doc);
        assert_eq!(
            doc.days[0].navigation_link.as_deref(),
            Some("https://www.google.com/maps/dir/1,1/2,2")
        );
    }

    #[test]
    fn non_adjacent_repeats_are_kept() {
        let mut doc = ItineraryDocument {
            days: vec![day(vec![
                visit("a1", Some(num(1.0)), Some(num(1.0))),
                visit("a2", Some(num(2.0)), Some(num(2.0))),
                visit("a3", Some(num(1.0)), Some(num(1.0))),
            ])],
        };
        attach_navigation_links(&mut doc);
        assert_eq!(
            doc.days[0].navigation_link.as_deref(),
            Some("https://www.google.com/maps/dir/1,1/2,2/1,1")
        );
    }

    #[test]
    fn a_single_waypoint_yields_no_link() {
        let mut doc = ItineraryDocument {
            days: vec![day(vec![
                visit("a1", Some(num(1.0)), Some(num(1.0))),
                visit("a2", None, None),
            ])],
        };
        attach_navigation_links(&mut doc);
        assert_eq!(doc.days[0].navigation_link, None);
    }

    #[test]
    fn travel_contributes_its_end_point_to_the_route() {
        let mut doc = ItineraryDocument {
            days: vec![day(vec![
                visit("a1", Some(num(1.0)), Some(num(1.0))),
                travel("t1", None, Some((num(2.0), num(2.0)))),
            ])],
        };
        attach_navigation_links(&mut doc);
        // The travel leg produces no markers, yet still routes to its end.
        let markers = collect_markers(&doc);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].activity_id, "a1");
        assert_eq!(
            doc.days[0].navigation_link.as_deref(),
            Some("https://www.google.com/maps/dir/1,1/2,2")
        );
    }

    #[test]
    fn links_are_derived_per_day() {
        let mut doc = ItineraryDocument {
            days: vec![
                day(vec![
                    visit("a1", Some(num(1.0)), Some(num(1.0))),
                    visit("a2", Some(num(2.0)), Some(num(2.0))),
                ]),
                day(vec![visit("b1", Some(num(3.0)), Some(num(3.0)))]),
            ],
        };
        attach_navigation_links(&mut doc);
        assert!(doc.days[0].navigation_link.is_some());
        assert_eq!(doc.days[1].navigation_link, None);
    }

    proptest! {
        #[test]
        fn route_never_contains_adjacent_duplicate_waypoints(
            picks in prop::collection::vec(0..3usize, 0..12)
        ) {
            let coords = [(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)];
            let activities = picks
                .iter()
                .map(|&i| visit("a", Some(num(coords[i].0)), Some(num(coords[i].1))))
                .collect();
            match route_link(&day(activities)) {
                None => {}
                Some(link) => {
                    let path = link.strip_prefix(NAVIGATION_BASE_URL).unwrap();
                    let waypoints: Vec<&str> = path.split('/').collect();
                    prop_assert!(waypoints.len() > 1);
                    for pair in waypoints.windows(2) {
                        prop_assert_ne!(pair[0], pair[1]);
                    }
                }
            }
        }
    }
}
