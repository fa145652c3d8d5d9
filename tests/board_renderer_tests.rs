use approx::assert_relative_eq;
use chrono::NaiveDate;
use fieldwork_board::api::draw_board;
use fieldwork_board::core::{
    Location, Operation, StyleOptions, TaskMatrix, TaskRecord, ValueRange, WindowIndex,
    date_sequence,
};
use fieldwork_board::render::{
    Color, MonthSpan, PaintCommand, Rect, RecordingSurface, ShadowStyle, TextHAlign, month_spans,
};

fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).expect("valid date")
}

fn range() -> ValueRange {
    ValueRange::new(
        date_sequence(day(4, 1), day(4, 10)),
        vec![
            Location::new("north", "North field"),
            Location::new("south", "South field"),
            Location::new("tunnel", "Tunnel"),
        ],
    )
}

fn task(location: &str, date: NaiveDate, operation: Operation) -> TaskRecord {
    TaskRecord {
        location: location.into(),
        date: date.and_hms_opt(10, 30, 0).expect("valid time"),
        operation,
    }
}

fn tomato() -> Color {
    "tomato".parse().expect("named color")
}

#[test]
fn month_spans_split_where_the_month_changes() {
    let dates = [day(3, 30), day(3, 31), day(4, 1), day(4, 2)];
    assert_eq!(
        month_spans(&dates),
        vec![
            MonthSpan {
                name: "March".to_owned(),
                start_column: 0,
                end_column: 2,
            },
            MonthSpan {
                name: "April".to_owned(),
                start_column: 2,
                end_column: 4,
            },
        ]
    );
    assert!(month_spans(&[]).is_empty());
}

#[test]
fn board_is_cleared_and_filled_before_anything_else() {
    let mut surface = RecordingSurface::new(640.0, 300.0);
    let layout = draw_board(
        &mut surface,
        &range(),
        &TaskMatrix::new(),
        WindowIndex::default(),
        &StyleOptions::default(),
    )
    .expect("draw board");

    let full = Rect::new(0.0, 0.0, 640.0, 300.0);
    let commands = surface.commands();
    assert_eq!(commands[0], PaintCommand::Clear(full));
    match &commands[1] {
        PaintCommand::Rect(rect) => {
            assert_eq!(rect.rect, full);
            assert_eq!(rect.fill_color, Some(layout.fill));
        }
        other => panic!("expected background fill, got {other:?}"),
    }
    assert_eq!(surface.save_depth(), 0);
}

#[test]
fn drawing_twice_gives_the_same_layout_and_commands() {
    let records =
        TaskMatrix::from_tasks([task("south", day(4, 3), Operation::new("sow", "Sowing"))]);
    let style = StyleOptions::default();
    let mut surface = RecordingSurface::new(640.0, 300.0);

    let first = draw_board(&mut surface, &range(), &records, WindowIndex::default(), &style)
        .expect("first draw");
    let first_commands = surface.take_commands();
    let second = draw_board(&mut surface, &range(), &records, WindowIndex::default(), &style)
        .expect("second draw");

    assert_eq!(first, second);
    assert_eq!(first_commands, surface.commands());
}

#[test]
fn single_marker_sits_on_the_cell_center() {
    let records = TaskMatrix::from_tasks([task(
        "south",
        day(4, 3),
        Operation::new("sow", "Sowing").with_color(tomato()),
    )]);
    let mut surface = RecordingSurface::new(640.0, 300.0);
    draw_board(
        &mut surface,
        &range(),
        &records,
        WindowIndex::default(),
        &StyleOptions::default(),
    )
    .expect("draw board");

    let circles: Vec<_> = surface.circles().copied().collect();
    assert_eq!(circles.len(), 1);
    // Column 2, row 1 of a 40px grid starting at (240, 60).
    assert_eq!(circles[0].center_x, 340.0);
    assert_eq!(circles[0].center_y, 120.0);
    assert_relative_eq!(circles[0].radius, 40.0 * 11.0 / 30.0);
    assert_eq!(circles[0].fill_color, tomato());
}

#[test]
fn markers_in_one_cell_are_centered_as_a_group() {
    let records = TaskMatrix::from_tasks([
        task("north", day(4, 1), Operation::new("sow", "Sowing")),
        task("north", day(4, 1), Operation::new("water", "Watering")),
        task("north", day(4, 1), Operation::new("weed", "Weeding")),
    ]);
    let mut surface = RecordingSurface::new(640.0, 300.0);
    draw_board(
        &mut surface,
        &range(),
        &records,
        WindowIndex::default(),
        &StyleOptions::default(),
    )
    .expect("draw board");

    let xs: Vec<f64> = surface.circles().map(|circle| circle.center_x).collect();
    let pitch = 2.0 * 40.0 * 11.0 / 30.0 + 8.0;
    assert_eq!(xs.len(), 3);
    assert_relative_eq!(xs[0], 260.0 - pitch);
    assert_relative_eq!(xs[1], 260.0);
    assert_relative_eq!(xs[2], 260.0 + pitch);
    // Operations without their own color use the default marker color.
    assert!(surface.circles().all(|circle| circle.fill_color == tomato()));
}

#[test]
fn marker_shadow_is_reset_after_plotting() {
    let records =
        TaskMatrix::from_tasks([task("tunnel", day(4, 9), Operation::new("cut", "Harvest"))]);
    let mut surface = RecordingSurface::new(640.0, 300.0);
    draw_board(
        &mut surface,
        &range(),
        &records,
        WindowIndex::default(),
        &StyleOptions::default(),
    )
    .expect("draw board");

    let shadows: Vec<ShadowStyle> = surface
        .commands()
        .iter()
        .filter_map(|command| match command {
            PaintCommand::Shadow(shadow) => Some(*shadow),
            _ => None,
        })
        .collect();
    let defaults = StyleOptions::default().resolve();
    assert_eq!(shadows, vec![defaults.marker_shadow, ShadowStyle::NONE]);
    assert_eq!(surface.shadow(), ShadowStyle::NONE);
}

#[test]
fn records_outside_the_window_or_range_draw_nothing() {
    let records = TaskMatrix::from_tasks([
        task("north", day(5, 20), Operation::new("sow", "Sowing")),
        task("orchard", day(4, 2), Operation::new("prune", "Pruning")),
    ]);
    let mut surface = RecordingSurface::new(640.0, 300.0);
    draw_board(
        &mut surface,
        &range(),
        &records,
        WindowIndex::default(),
        &StyleOptions::default(),
    )
    .expect("draw board");
    assert_eq!(surface.circles().count(), 0);
}

#[test]
fn axis_labels_show_days_months_and_locations() {
    let range = ValueRange::new(
        date_sequence(day(3, 29), day(4, 7)),
        vec![Location::new("north", "North field")],
    );
    let mut surface = RecordingSurface::new(640.0, 300.0);
    draw_board(
        &mut surface,
        &range,
        &TaskMatrix::new(),
        WindowIndex::default(),
        &StyleOptions::default(),
    )
    .expect("draw board");

    let texts: Vec<&str> = surface.texts().map(|text| text.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "29", "30", "31", "1", "2", "3", "4", "5", "6", "7", "March", "April", "North field",
        ]
    );

    let location = surface.texts().last().expect("location label");
    assert_eq!(location.h_align, TextHAlign::Right);
    assert_eq!(location.x, 234.0);
    assert_eq!(location.y, 80.0);
    assert_relative_eq!(location.font_size_px, 26.0);

    // March covers three columns, so its label is centered over them.
    let march = surface
        .texts()
        .find(|text| text.text == "March")
        .expect("month label");
    assert_eq!(march.x, 240.0 + 60.0);
}
