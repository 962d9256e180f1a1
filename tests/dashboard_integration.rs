/*
 *  tests/dashboard_integration.rs
 *
 *  End-to-end dashboard runs on the headless backend
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 */

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Local, TimeZone};
use embedded_graphics::prelude::*;

use obc_dash::dashboard::{Dashboard, Flow};
use obc_dash::display::layout::{logical_size, menu_row, nav_slots, SLIDER_BAR};
use obc_dash::display::{run_polled, Backend, ButtonAction, Frame, HeadlessBackend, InputEvent, InputMapper, Page};
use obc_dash::oil::{LoadOutcome, OilStore, SECS_PER_DAY};
use obc_dash::sensors::FakeSensors;
use obc_dash::settings::{Settings, SpeedUnit, TemperatureUnit};
use obc_dash::svgimage::Logo;
use obc_dash::weather::StubWeather;

static SCRATCH: AtomicUsize = AtomicUsize::new(0);

fn scratch_state() -> PathBuf {
    let n = SCRATCH.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("obc-dash-it-{}-{}", std::process::id(), n));
    let _ = std::fs::remove_dir_all(&dir);
    dir.join("state.json")
}

fn at(hour: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 6, 14, hour, 0, 0).single().unwrap()
}

fn dashboard_with(oil: OilStore) -> Dashboard {
    Dashboard::new(
        Settings::default(),
        oil,
        Box::new(FakeSensors::new(false)),
        Box::new(StubWeather::default()),
        Logo::Emblem,
        "BMW OBC",
    )
}

/// Dashboard already showing HOME, so its buttons can be hit
fn dashboard(now: DateTime<Local>) -> Dashboard {
    let (oil, _) = OilStore::open(scratch_state(), now.timestamp());
    let mut dash = dashboard_with(oil);
    dash.render(now);
    dash
}

/// Logical point doubled onto a 640x480 panel
fn physical(p: Point) -> Point {
    Point::new(p.x * 2, p.y * 2)
}

#[test]
fn test_headless_menu_then_home() {
    let mut dash = dashboard(at(12));
    let mut backend = HeadlessBackend::new(Size::new(640, 480), None);
    backend.push_event(InputEvent::Tap(physical(nav_slots(4)[3].center())));
    backend.push_event(InputEvent::Tap(physical(nav_slots(2)[0].center())));
    backend.push_event(InputEvent::Quit);

    let frames = run_polled(&mut backend, &mut dash, 240, Some(10)).unwrap();
    assert_eq!(frames, 2);
    assert_eq!(dash.page(), Page::Home);
    assert_eq!(backend.pending(), 0);

    let last = backend.last_frame().unwrap();
    assert_eq!(last.size(), Size::new(640, 480));
    assert!(last.rgba().chunks_exact(4).any(|px| px[0] > 0));
}

#[test]
fn test_headless_frame_limit() {
    let mut dash = dashboard(at(12));
    let mut backend = HeadlessBackend::new(Size::new(320, 240), Some(3));
    let frames = run_polled(&mut backend, &mut dash, 240, None).unwrap();
    assert_eq!(frames, 3);
    assert!(backend.finished());
    assert_eq!(backend.frames_presented(), 3);
}

#[test]
fn test_tap_outside_any_button() {
    let now = at(12);
    let mut dash = dashboard(now);
    let mapper = InputMapper::new(logical_size(), Size::new(640, 480));
    let mut frame = Frame::new(Size::new(640, 480));
    dash.step([InputEvent::Tap(physical(nav_slots(4)[3].center()))], &mapper, now, &mut frame);
    assert_eq!(dash.page(), Page::Menu);

    let before = dash.settings().clone();
    let flow = dash.step([InputEvent::Tap(Point::new(630, 20))], &mapper, now, &mut frame);
    assert_eq!(flow, Flow::Continue);
    assert_eq!(dash.page(), Page::Menu);
    assert_eq!(dash.settings(), &before);
}

#[test]
fn test_menu_toggles_and_brightness() {
    let now = at(12);
    let mut dash = dashboard(now);
    let mapper = InputMapper::new(logical_size(), Size::new(320, 240));
    let mut frame = Frame::new(Size::new(320, 240));

    dash.step([InputEvent::Tap(nav_slots(4)[3].center())], &mapper, now, &mut frame);
    dash.step(
        [
            InputEvent::Tap(menu_row(0).center()),
            InputEvent::Tap(menu_row(1).center()),
            InputEvent::Tap(menu_row(3).center()),
        ],
        &mapper,
        now,
        &mut frame,
    );
    assert_eq!(dash.settings().temperature_unit, TemperatureUnit::C);
    assert_eq!(dash.settings().speed_unit, SpeedUnit::Kmh);
    assert_eq!(dash.page(), Page::Menu);

    dash.step([InputEvent::Tap(menu_row(4).center())], &mapper, now, &mut frame);
    assert_eq!(dash.page(), Page::brightness());

    let y = SLIDER_BAR.center().y;
    let x0 = SLIDER_BAR.top_left.x;
    let half = x0 + SLIDER_BAR.size.width as i32 / 2;
    dash.step([InputEvent::Tap(Point::new(half, y))], &mapper, now, &mut frame);
    assert_eq!(dash.settings().brightness(), 50);
    dash.step([InputEvent::Drag(Point::new(x0 - 5, y))], &mapper, now, &mut frame);
    assert_eq!(dash.settings().brightness(), 0);

    // BACK leaves the slider page for the menu
    dash.step([InputEvent::Tap(nav_slots(2)[1].center())], &mapper, now, &mut frame);
    assert_eq!(dash.page(), Page::Menu);
}

#[test]
fn test_state_file_created_then_reread() {
    let path = scratch_state();
    let created = at(9).timestamp();

    let (store, outcome) = OilStore::open(&path, created);
    assert!(matches!(outcome, LoadOutcome::Created { .. }));
    assert!(path.exists());
    assert_eq!(store.record().last_oil_change, created);

    let (again, outcome) = OilStore::open(&path, created + 5 * SECS_PER_DAY);
    assert!(matches!(outcome, LoadOutcome::Loaded(_)));
    assert_eq!(again.days_elapsed(created + 5 * SECS_PER_DAY), 5);
}

#[test]
fn test_oil_page_rereads_edited_file() {
    let now = at(12);
    let path = scratch_state();
    let (oil, _) = OilStore::open(&path, now.timestamp());
    let mut dash = dashboard_with(oil);
    dash.render(now);

    let edited = now.timestamp() - 42 * SECS_PER_DAY;
    std::fs::write(&path, serde_json::json!({ "last_oil_ts": edited }).to_string()).unwrap();

    dash.apply(ButtonAction::Oil, now.timestamp());
    assert_eq!(dash.page(), Page::Oil);
    assert_eq!(dash.oil().days_elapsed(now.timestamp()), 42);

    dash.apply(ButtonAction::ResetOil, now.timestamp());
    let (reread, _) = OilStore::open(&path, now.timestamp());
    assert_eq!(reread.record().last_oil_change, now.timestamp());
}

#[test]
fn test_night_dimming_darkens_frame() {
    let day = at(12);
    let night = at(22);
    let mapper = InputMapper::new(logical_size(), Size::new(320, 240));

    let mut dash = dashboard(day);
    let mut day_frame = Frame::new(Size::new(320, 240));
    dash.step([], &mapper, day, &mut day_frame);
    let mut night_frame = Frame::new(Size::new(320, 240));
    dash.step([], &mapper, night, &mut night_frame);

    let brightest = |f: &Frame| f.rgba().chunks_exact(4).map(|px| px[0]).max().unwrap_or(0);
    assert!(brightest(&night_frame) < brightest(&day_frame));
    assert!(brightest(&night_frame) > 0);
}
