//! Unit tests for the presenters
//!
//! Raster primitives, terminal escape output and SVG documents. SVG file
//! tests write into a temporary directory.

#![allow(clippy::unwrap_used)]

use serde_json::json;

use crate::{
    config::Size,
    config_store::ClockConfig,
    present::{
        Frame, Presenter, Raster, SvgPresenter, TerminalPresenter, WindowState, render_svg,
        settings_lines,
    },
    render::{DisplayList, Layer, Line, LineCap, Oval, Point, Renderer, Shape, Surface},
    settings_panel::SettingsView,
    theme::{Color, Theme, ThemeCatalog},
    time_source::ClockReading,
};

const RED: Color = Color::rgb(255, 0, 0);
const WHITE: Color = Color::rgb(255, 255, 255);

fn modern() -> Theme {
    ThemeCatalog::with_builtin_themes()
        .get("Modern")
        .cloned()
        .unwrap()
}

fn drawn_canvas(theme: &Theme) -> DisplayList {
    let mut renderer = Renderer::new();
    renderer.initialize(DisplayList::new(), &ClockConfig::in_memory());
    renderer.render_face(theme).unwrap();
    renderer
        .render_hands(ClockReading::new(10, 10, 30), theme)
        .unwrap();
    renderer.surface().cloned().unwrap()
}

fn window(always_on_top: bool) -> WindowState {
    WindowState {
        size: Size::new(400, 500),
        clock_size: Size::square(350),
        always_on_top,
    }
}

#[test]
fn fill_circle_covers_center_and_clips() {
    let mut raster = Raster::new(10, 10, WHITE);

    raster.fill_circle(0, 0, 3, RED);

    assert_eq!(raster.pixel(0, 0), Some(RED));
    assert_eq!(raster.pixel(3, 0), Some(RED));
    assert_eq!(raster.pixel(3, 3), Some(WHITE));
    assert_eq!(raster.pixel(-1, 0), None);
}

#[test]
fn line_reaches_both_ends() {
    let mut raster = Raster::new(8, 8, WHITE);

    raster.line(1, 6, 6, 1, RED);

    assert_eq!(raster.pixel(1, 6), Some(RED));
    assert_eq!(raster.pixel(6, 1), Some(RED));
    assert_eq!(raster.pixel(1, 1), Some(WHITE));
}

#[test]
fn thick_line_spans_its_thickness() {
    let mut raster = Raster::new(10, 10, WHITE);

    raster.thick_line(0, 5, 9, 5, 3, RED);

    for y in 4..=6 {
        assert_eq!(raster.pixel(5, y), Some(RED));
    }
    assert_eq!(raster.pixel(5, 3), Some(WHITE));
    assert_eq!(raster.pixel(5, 7), Some(WHITE));
}

#[test]
fn circle_outline_leaves_inside_empty() {
    let mut raster = Raster::new(21, 21, WHITE);

    raster.circle_outline(10, 10, 8, RED);

    assert_eq!(raster.pixel(18, 10), Some(RED));
    assert_eq!(raster.pixel(10, 2), Some(RED));
    assert_eq!(raster.pixel(10, 10), Some(WHITE));
}

#[test]
fn oversized_oval_is_clipped_to_the_grid() {
    let mut list = DisplayList::new();
    list.draw(
        Layer::Face,
        Shape::Oval(Oval {
            center: Point::new(175.0, 175.0),
            radius: 400_000.0,
            fill: Some(RED),
            outline: WHITE,
            width: 8000,
        }),
    );

    let raster = Raster::from_display_list(&list, Size::square(350), 48.0 / 350.0);

    assert_eq!((raster.width(), raster.height()), (48, 48));
    assert_eq!(raster.pixel(0, 0), Some(RED));
    assert_eq!(raster.pixel(47, 47), Some(RED));
    assert_eq!(raster.pixel(24, 24), Some(RED));
}

#[test]
fn far_reaching_line_is_clipped_to_the_grid() {
    let mut list = DisplayList::new();
    list.draw(
        Layer::Hands,
        Shape::Line(Line {
            from: Point::new(175.0, 175.0),
            to: Point::new(175.0, -4_000_000.0),
            color: RED,
            width: 6,
            cap: LineCap::Round,
        }),
    );

    let raster = Raster::from_display_list(&list, Size::square(350), 0.2);

    assert_eq!(raster.pixel(35, 0), Some(RED));
    assert_eq!(raster.pixel(35, 35), Some(RED));
    assert_ne!(raster.pixel(35, 60), Some(RED));
}

#[test]
fn huge_configured_radius_still_presents() {
    let theme = modern();
    let mut config = ClockConfig::in_memory();
    config.set("radius", json!(400_000)).unwrap();

    let mut renderer = Renderer::new();
    renderer.initialize(DisplayList::new(), &config);
    renderer.render_face(&theme).unwrap();
    renderer
        .render_hands(ClockReading::new(10, 10, 30), &theme)
        .unwrap();
    let canvas = renderer.surface().cloned().unwrap();

    let mut presenter = TerminalPresenter::new(Vec::new(), 48);
    presenter
        .present(&Frame {
            canvas: &canvas,
            digital: None,
            theme: &theme,
            window: window(false),
        })
        .unwrap();

    assert!(!presenter.get_ref().is_empty());
}

#[test]
fn rasterized_face_keeps_numerals_as_text() {
    let theme = modern();
    let canvas = drawn_canvas(&theme);

    let raster = Raster::from_display_list(&canvas, Size::square(350), 0.2);

    assert_eq!((raster.width(), raster.height()), (70, 70));
    assert_eq!(raster.overlays().len(), 12);
    assert_eq!(raster.pixel(0, 0), Some(theme.palette().canvas));
    assert_eq!(raster.pixel(35, 35), Some(theme.palette().hub));
}

#[test]
fn terminal_frame_has_label_and_title() {
    let theme = modern();
    let canvas = drawn_canvas(&theme);
    let mut presenter = TerminalPresenter::new(Vec::new(), 40);

    presenter
        .present(&Frame {
            canvas: &canvas,
            digital: Some("2024/01/02 10:10:30"),
            theme: &theme,
            window: window(true),
        })
        .unwrap();

    let output = String::from_utf8(presenter.get_ref().clone()).unwrap();
    assert!(output.starts_with("\x1b[?25l\x1b[2J\x1b[1;1H"));
    assert!(output.contains("\x1b]0;Analog Clock (always on top)\x07"));
    assert!(output.contains("2024/01/02 10:10:30"));
    assert!(output.contains('▀'));
    assert!(output.contains("\x1b[38;2;236;240;241m"));
}

#[test]
fn terminal_shows_alert_under_next_frame() {
    let theme = modern();
    let canvas = drawn_canvas(&theme);
    let mut presenter = TerminalPresenter::new(Vec::new(), 20);
    let frame = Frame {
        canvas: &canvas,
        digital: None,
        theme: &theme,
        window: window(false),
    };

    presenter.present(&frame).unwrap();
    presenter.alert("Range error", "size must be between 200 and 800, got 900");
    presenter.present(&frame).unwrap();
    presenter.teardown().unwrap();

    let output = String::from_utf8(presenter.get_ref().clone()).unwrap();
    assert!(output.contains("\x1b]0;Analog Clock\x07"));
    assert_eq!(output.matches("\x1b[2J").count(), 1);
    assert!(output.contains("got 900"));
    assert!(output.ends_with("\x1b[?25h\r\n"));
}

#[test]
fn svg_contains_every_shape() {
    let theme = modern();
    let canvas = drawn_canvas(&theme);

    let svg = render_svg(&Frame {
        canvas: &canvas,
        digital: Some("2024/01/02 10:10:30"),
        theme: &theme,
        window: window(false),
    })
    .unwrap();

    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="400" height="500""#));
    assert_eq!(svg.matches("<circle").count(), 2);
    assert_eq!(svg.matches("<line").count(), 12 + 48 + 3);
    assert_eq!(svg.matches("<text").count(), 13);
    assert_eq!(svg.matches(r#"stroke-linecap="round""#).count(), 3);
    assert!(svg.contains(">2024/01/02 10:10:30</text>"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn svg_presenter_replaces_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clock.svg");
    let theme = modern();
    let canvas = drawn_canvas(&theme);
    let mut presenter = SvgPresenter::new(&path);
    let frame = Frame {
        canvas: &canvas,
        digital: None,
        theme: &theme,
        window: window(false),
    };

    presenter.present(&frame).unwrap();
    presenter.present(&frame).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("<circle"));
    assert!(!written.contains("<text x=\"200\""));
    assert!(!path.with_extension("svg.tmp").exists());
}

#[test]
fn settings_lines_show_toggles() {
    let view = SettingsView::from_config(
        &ClockConfig::in_memory(),
        vec!["Modern".to_string(), "Dark".to_string()],
    );

    let lines = settings_lines(&view);

    assert_eq!(lines[1], "  theme: Modern [Modern, Dark]");
    assert_eq!(lines[2], "  [ ] always on top");
    assert_eq!(lines[3], "  [x] digital clock");
    assert!(lines[4].contains("350px"));
}
