use approx::assert_relative_eq;
use chrono::NaiveDate;
use fieldwork_board::core::{
    Location, PixelPoint, StyleOptions, ValueRange, Viewport, WindowIndex, compute_layout,
    date_sequence,
};

fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).expect("valid date")
}

fn three_beds_ten_days() -> ValueRange {
    ValueRange::new(
        date_sequence(day(4, 1), day(4, 10)),
        vec![
            Location::new("north", "North field"),
            Location::new("south", "South field"),
            Location::new("tunnel", "Tunnel"),
        ],
    )
}

#[test]
fn small_range_fills_the_columns_and_caps_rows_at_the_data() {
    let layout = compute_layout(
        Viewport::new(640.0, 300.0),
        &three_beds_ten_days(),
        WindowIndex::default(),
        &StyleOptions::default(),
    );

    assert_eq!(layout.grid.columns, 10);
    assert_eq!(layout.grid.rows, 3);
    assert_eq!(layout.window.columns, 0..10);
    assert_eq!(layout.window.rows, 0..3);
    assert_eq!(layout.grid.origin(), PixelPoint::new(240.0, 60.0));
    assert_eq!(layout.grid.terminus(), PixelPoint::new(640.0, 180.0));
    assert_eq!(layout.width, 640.0);
    assert_eq!(layout.height, 180.0);
    assert_eq!(layout.labels.x.values.first(), Some(&day(4, 1)));
    assert_eq!(layout.labels.y.values.len(), 3);
}

#[test]
fn label_bands_sit_beside_the_grid() {
    let layout = compute_layout(
        Viewport::new(640.0, 300.0),
        &three_beds_ten_days(),
        WindowIndex::default(),
        &StyleOptions::default(),
    );

    let x_band = layout.labels.x.bounds;
    assert_eq!(x_band.origin, PixelPoint::new(240.0, 0.0));
    assert_eq!((x_band.width, x_band.height), (400.0, 60.0));

    let y_band = layout.labels.y.bounds;
    assert_eq!(y_band.origin, PixelPoint::new(0.0, 60.0));
    assert_eq!((y_band.width, y_band.height), (240.0, 120.0));
}

#[test]
fn window_index_scrolls_and_reanchors_at_the_tail() {
    let range = ValueRange::new(
        date_sequence(day(3, 1), day(3, 30)),
        vec![Location::new("a", "A")],
    );
    let style = StyleOptions::default();
    let viewport = Viewport::new(640.0, 300.0);

    let scrolled = compute_layout(viewport, &range, WindowIndex::new(4, 0), &style);
    assert_eq!(scrolled.window.columns, 4..14);
    assert_eq!(scrolled.labels.x.values.first(), Some(&day(3, 5)));

    let past_end = compute_layout(viewport, &range, WindowIndex::new(27, 0), &style);
    assert_eq!(past_end.window.columns, 20..30);
    assert_eq!(past_end.labels.x.values.last(), Some(&day(3, 30)));
}

#[test]
fn custom_unit_changes_cell_count_and_marker_size() {
    let style = StyleOptions::default()
        .with_unit_px(32.0)
        .with_axis_bands_px(160.0, 48.0);
    let layout = compute_layout(
        Viewport::new(640.0, 300.0),
        &three_beds_ten_days(),
        WindowIndex::default(),
        &style,
    );

    assert_eq!(layout.grid.columns, 10);
    assert_eq!(layout.grid.origin(), PixelPoint::new(160.0, 48.0));
    assert_relative_eq!(layout.grid.marker.radius_px, 32.0 * 11.0 / 30.0);
    assert_relative_eq!(layout.grid.marker.gap_px, 6.4);
}

#[test]
fn empty_or_cramped_inputs_degrade_to_an_empty_grid() {
    let style = StyleOptions::default();
    let empty = compute_layout(
        Viewport::new(640.0, 300.0),
        &ValueRange::default(),
        WindowIndex::default(),
        &style,
    );
    assert_eq!((empty.grid.columns, empty.grid.rows), (0, 0));

    let cramped = compute_layout(
        Viewport::new(200.0, 50.0),
        &three_beds_ten_days(),
        WindowIndex::default(),
        &style,
    );
    assert_eq!((cramped.grid.columns, cramped.grid.rows), (0, 0));
    assert!(cramped.labels.x.values.is_empty());
}

#[test]
fn hit_testing_maps_pixels_to_values() {
    let layout = compute_layout(
        Viewport::new(640.0, 300.0),
        &three_beds_ten_days(),
        WindowIndex::default(),
        &StyleOptions::default(),
    );

    assert_eq!(layout.cell_index(250.0, 70.0), (0, 0));
    assert_eq!(layout.cell_index(10.0, 10.0), (-6, -2));
    assert_eq!(layout.cell_at(639.0, 179.0), Some((9, 2)));
    assert_eq!(layout.cell_at(641.0, 179.0), None);
    assert_eq!(layout.cell_at(f64::NAN, 100.0), None);

    let (date, location) = layout.value_at(325.0, 105.0).expect("cell under point");
    assert_eq!(date, day(4, 3));
    assert_eq!(location.id.as_str(), "south");
}

#[test]
fn layout_snapshot_serializes_to_json() {
    let layout = compute_layout(
        Viewport::new(640.0, 300.0),
        &three_beds_ten_days(),
        WindowIndex::default(),
        &StyleOptions::default(),
    );
    let json = layout.to_json_pretty().expect("layout json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value["grid"]["columns"], 10);
    assert_eq!(value["grid"]["rows"], 3);
    assert_eq!(value["labels"]["x"]["values"][0], "2024-04-01");
    assert_eq!(value["labels"]["y"]["values"][2]["id"], "tunnel");
}
