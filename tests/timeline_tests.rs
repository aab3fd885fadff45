use serde_json::{Value, json};
use shiftline::{
    timeline::{self, Config, Domain, Error, Marker, Window},
    trip::{self, Trip},
};

fn trips(raw: Vec<Value>) -> Vec<Trip> {
    trip::normalize_all(&raw)
}

fn out_and_back() -> Vec<Trip> {
    trips(vec![
        json!({
            "trip_id": "T1",
            "stop_times": [
                { "stop_name": "North", "departure_time": "08:00:00" },
                { "stop_name": "Market", "departure_time": "08:10:00" },
                { "stop_name": "South", "arrival_time": "08:20:00" }
            ]
        }),
        json!({
            "trip_id": "T2",
            "stop_times": [
                { "stop_name": "South", "departure_time": "08:30:00" },
                { "stop_name": "Market", "departure_time": "08:40:00" },
                { "stop_name": "North", "arrival_time": "08:50:00" }
            ]
        }),
    ])
}

#[test]
fn no_trips_is_a_placeholder() {
    let window = Window::new("08:00", "09:00").with_labels("Depot", "Depot");
    assert_eq!(timeline::build(&[], &window), Err(Error::NoTrips));
    assert_eq!(
        Error::NoTrips.to_string(),
        "Add trips to visualize the shift timeline."
    );
}

#[test]
fn trips_without_stops_are_insufficient() {
    let trips = trips(vec![json!({ "trip_id": "T1", "departure_time": "08:00" })]);
    let window = Window::new("08:00", "09:00");
    assert_eq!(
        timeline::build(&trips, &window),
        Err(Error::InsufficientStops)
    );
}

#[test]
fn window_labels_alone_are_enough_stops() {
    let trips = trips(vec![json!({ "trip_id": "T1", "departure_time": "08:00" })]);
    let window = Window::new("08:00", "09:00").with_labels("Depot", "");
    let timeline = timeline::build(&trips, &window).unwrap();
    assert_eq!(timeline.stops.len(), 1);
    assert!(timeline.series[0].points.is_empty());
}

#[test]
fn domain_wraps_past_midnight() {
    let domain = Window::new("23:00", "01:00").domain(&Config::default());
    assert_eq!(domain.start, 1380);
    assert_eq!(domain.end, 1500);
    assert_eq!(domain.span(), 120);
}

#[test]
fn empty_span_is_widened() {
    let domain = Window::new("08:00", "08:00:45").domain(&Config::default());
    assert_eq!(domain.span(), 60);

    let config = Config {
        min_span_minutes: 90,
        ..Default::default()
    };
    assert_eq!(Window::new("08:00", "08:00").domain(&config).span(), 90);
}

#[test]
fn oversized_config_and_reversed_domain_saturate() {
    let config = Config {
        min_span_minutes: u32::MAX,
        ..Default::default()
    };
    let domain = Window::new("08:00", "08:00").domain(&config);
    assert_eq!(domain.end, u32::MAX);
    assert_eq!(domain.span(), u32::MAX - 480);

    let reversed = Domain { start: 600, end: 540 };
    assert_eq!(reversed.span(), 0);
}

#[test]
fn missing_window_times_cover_the_day() {
    let domain = Window::default().domain(&Config::default());
    assert_eq!((domain.start, domain.end), (0, 1440));
}

#[test]
fn two_point_fallback_synthesizes_arrival() {
    let trips = trips(vec![json!({
        "trip_id": "T1",
        "start_stop_name": "Depot",
        "end_stop_name": "Main St"
    })]);
    let timeline = timeline::build(&trips, &Window::new("00:00", "01:00")).unwrap();
    assert_eq!(timeline.stops.len(), 2);
    let points = &timeline.series[0].points;
    assert_eq!(points.len(), 2);
    assert_eq!((points[0].minutes, &*points[0].stop), (0, "Depot"));
    assert_eq!((points[1].minutes, &*points[1].stop), (10, "Main St"));
    assert_eq!(points[0].marker, Marker::Start);
    assert_eq!(points[1].marker, Marker::End);
}

#[test]
fn synthesized_arrival_is_capped_at_end_of_day() {
    let trips = trips(vec![json!({
        "trip_id": "T1",
        "start_stop_name": "Depot",
        "end_stop_name": "Main St",
        "departure_time": "23:55",
        "arrival_time": "late"
    })]);
    let timeline = timeline::build(&trips, &Window::new("23:00", "00:30")).unwrap();
    let points = &timeline.series[0].points;
    assert_eq!(points[0].minutes, 1435);
    assert_eq!(points[1].minutes, 1440);
}

#[test]
fn stop_axis_follows_first_appearance() {
    let window = Window::new("07:50", "09:00").with_labels("Depot", "Garage");
    let timeline = timeline::build(&out_and_back(), &window).unwrap();
    let stops: Vec<_> = timeline.stops.iter().map(|stop| stop.to_string()).collect();
    assert_eq!(stops, vec!["Depot", "North", "Market", "South", "Garage"]);

    let back = &timeline.series[1];
    assert_eq!(&*back.trip_id, "T2");
    let indexes: Vec<_> = back.points.iter().map(|point| point.stop_idx).collect();
    assert_eq!(indexes, vec![3, 2, 1]);
    let minutes: Vec<_> = back.points.iter().map(|point| point.minutes).collect();
    assert_eq!(minutes, vec![510, 520, 530]);
}

#[test]
fn markers_distinguish_ends() {
    let timeline = timeline::build(&out_and_back(), &Window::new("08:00", "09:00")).unwrap();
    let markers: Vec<_> = timeline.series[0]
        .points
        .iter()
        .map(|point| point.marker)
        .collect();
    assert_eq!(markers, vec![Marker::Start, Marker::Stop, Marker::End]);
}

#[test]
fn unnamed_positions_are_skipped() {
    let trips = trips(vec![json!({
        "trip_id": "T1",
        "stop_times": [
            { "stop_name": "North", "departure_time": "08:00:00" },
            { "departure_time": "08:05:00" },
            { "stop_name": "South", "arrival_time": "08:20:00" }
        ]
    })]);
    let timeline = timeline::build(&trips, &Window::new("08:00", "09:00")).unwrap();
    assert_eq!(timeline.stops.len(), 2);
    let points = &timeline.series[0].points;
    assert_eq!(points.len(), 2);
    assert_eq!(points[1].marker, Marker::End);
}

#[test]
fn building_twice_gives_the_same_chart() {
    let trips = out_and_back();
    let window = Window::new("08:00", "09:00").with_labels("Depot", "Depot");
    let first = timeline::build(&trips, &window).unwrap();
    let second = timeline::build(&trips, &window).unwrap();
    assert_eq!(first, second);
    assert_eq!(trips, out_and_back());
}

#[test]
fn window_falls_back_to_trip_bounds() {
    let trips = out_and_back();
    let bounds = timeline::time_bounds(&trips);
    assert_eq!(bounds.earliest.map(|time| time.as_minutes()), Some(480));
    assert_eq!(bounds.latest.map(|time| time.as_minutes()), Some(530));

    let window = Window::new("", "").or_bounds(&trips);
    assert_eq!(window.start_time.as_deref(), Some("08:00"));
    assert_eq!(window.end_time.as_deref(), Some("08:50"));

    let window = Window::new("07:30", "").or_bounds(&trips);
    assert_eq!(window.start_time.as_deref(), Some("07:30"));
}

#[test]
fn layout_projects_points() {
    let trips = trips(vec![json!({
        "trip_id": "T1",
        "stop_times": [
            { "stop_name": "North", "departure_time": "08:00:00" },
            { "stop_name": "Market", "departure_time": "08:30:00" },
            { "stop_name": "South", "arrival_time": "09:00:00" }
        ]
    })]);
    let timeline = timeline::build(&trips, &Window::new("08:00", "09:00")).unwrap();
    let layout = timeline.layout(400.0, &Config::default());

    assert_eq!(layout.width, 720.0);
    assert_eq!(layout.inner_width, 520.0);
    assert_eq!(layout.inner_height, 112.0);
    assert_eq!(layout.height, 192.0);

    let points = &timeline.series[0].points;
    let (x0, y0) = layout.project(&points[0]).unwrap();
    let (x1, y1) = layout.project(&points[1]).unwrap();
    let (x2, y2) = layout.project(&points[2]).unwrap();
    assert!((x0 - 0.0).abs() < 1e-9);
    assert!((x1 - 260.0).abs() < 1e-9);
    assert!((x2 - 520.0).abs() < 1e-9);
    assert!((y0 - 112.0 / 6.0).abs() < 1e-9);
    assert!((y1 - 56.0).abs() < 1e-9);
    assert!((y2 - 112.0 * 5.0 / 6.0).abs() < 1e-9);
    assert!(layout.y(3).is_none());

    let labels: Vec<_> = layout.ticks().into_iter().map(|tick| tick.label).collect();
    assert_eq!(
        labels,
        vec!["08:00", "08:10", "08:20", "08:30", "08:40", "08:50", "09:00"]
    );
}

#[test]
fn timeline_serializes_for_the_renderer() {
    let timeline = timeline::build(&out_and_back(), &Window::new("08:00", "09:00")).unwrap();
    let value = serde_json::to_value(&timeline).unwrap();
    assert_eq!(value["domain"], json!({ "start": 480, "end": 540 }));
    assert_eq!(value["series"][0]["points"][0]["marker"], json!("start"));
}
