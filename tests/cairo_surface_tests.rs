#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use chrono::NaiveDate;
use fieldwork_board::api::{Board, ManualFrameScheduler, draw_board};
use fieldwork_board::core::{
    Location, Operation, StyleOptions, TaskMatrix, TaskRecord, ValueRange, Viewport,
    WindowIndex,
};
use fieldwork_board::error::BoardError;
use fieldwork_board::render::{CairoSurface, DrawingSurface};

fn range() -> ValueRange {
    let start = NaiveDate::from_ymd_opt(2024, 8, 28).expect("valid date");
    let end = NaiveDate::from_ymd_opt(2024, 9, 8).expect("valid date");
    ValueRange::from_season(
        start,
        end,
        vec![Location::new("a", "Bed A"), Location::new("b", "Bed B")],
    )
}

fn records() -> TaskMatrix {
    let day = NaiveDate::from_ymd_opt(2024, 9, 2).expect("valid date");
    TaskMatrix::from_tasks([TaskRecord {
        location: "b".into(),
        date: day.and_hms_opt(9, 0, 0).expect("valid time"),
        operation: Operation::new("harvest", "Harvest"),
    }])
}

#[test]
fn offscreen_surface_rejects_empty_sizes() {
    let err = CairoSurface::offscreen(0, 480).expect_err("zero width must fail");
    assert!(matches!(err, BoardError::InvalidViewport { .. }));
}

#[test]
fn board_paints_into_an_offscreen_image() {
    let mut surface = CairoSurface::offscreen(640, 300).expect("surface");
    draw_board(
        &mut surface,
        &range(),
        &records(),
        WindowIndex::default(),
        &StyleOptions::default(),
    )
    .expect("draw board");

    let stats = surface.stats();
    assert_eq!(stats.circles_drawn, 1);
    // 10 day numbers, 2 month names, 2 location names.
    assert_eq!(stats.texts_drawn, 14);
    assert!(stats.lines_drawn >= 10);

    let mut png = Vec::new();
    surface.write_png(&mut png).expect("png");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn board_can_draw_on_an_external_context() {
    let image = ImageSurface::create(Format::ARgb32, 640, 300).expect("image");
    let context = Context::new(&image).expect("context");
    let surface = CairoSurface::for_context(context, Viewport::new(640.0, 300.0));
    assert!(surface.image().is_none());
    assert_eq!(surface.size(), Viewport::new(640.0, 300.0));

    let mut board = Board::new(surface, ManualFrameScheduler::new(), range(), records())
        .expect("board init");
    board.draw().expect("draw");
    board.pan_by(2, 0).expect("start transition");
    let mut now = 0.0;
    while board.scheduler_mut().take_pending().is_some() {
        board.on_frame(now).expect("frame");
        now += 100.0;
    }
    assert_eq!(board.window_index(), WindowIndex::new(2, 0));
    assert!(board.surface().stats().circles_drawn >= 1);
}
