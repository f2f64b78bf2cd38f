//! Unit tests for the application shell
//!
//! Uses a recording presenter and a frozen clock. Run-loop tests use
//! tokio's paused time so tick counts are exact.

#![allow(clippy::unwrap_used)]

use std::{cell::RefCell, rc::Rc, time::Duration};

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;
use tokio::io::BufReader;

use super::ticker::Ticker;
use crate::{
    ClockError, Result,
    config_store::ClockConfig,
    events::{ClockEvent, EventKind},
    present::{Frame, Presenter},
    render::Layer,
    settings_panel::{SettingsView, SizePreset},
    shell::{ClockShell, CommandParseError, Flow, ShellState, SizeRequest, TickPolicy, UiCommand},
    theme::ThemeCatalog,
    time_source::FixedClock,
};

#[derive(Debug, Clone, PartialEq)]
struct Shown {
    digital: Option<String>,
    theme: String,
    always_on_top: bool,
    hands: usize,
}

#[derive(Debug, Default)]
struct Recorder {
    frames: Vec<Shown>,
    alerts: Vec<(String, String)>,
    settings: Vec<SettingsView>,
    teardowns: usize,
}

impl Presenter for Recorder {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()> {
        self.frames.push(Shown {
            digital: frame.digital.map(str::to_string),
            theme: frame.theme.name().to_string(),
            always_on_top: frame.window.always_on_top,
            hands: frame.canvas.count_on(Layer::Hands),
        });
        Ok(())
    }

    fn alert(&mut self, title: &str, message: &str) {
        self.alerts.push((title.to_string(), message.to_string()));
    }

    fn show_settings(&mut self, view: &SettingsView) {
        self.settings.push(view.clone());
    }

    fn teardown(&mut self) -> Result<()> {
        self.teardowns += 1;
        Ok(())
    }
}

fn ten_past_ten() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(10, 10, 30)
        .unwrap()
}

fn shell() -> ClockShell<Recorder, FixedClock> {
    ClockShell::new(Recorder::default(), FixedClock::new(ten_past_ten()))
}

fn initialized() -> ClockShell<Recorder, FixedClock> {
    let mut shell = shell();
    shell
        .initialize(ClockConfig::in_memory(), ThemeCatalog::with_builtin_themes())
        .unwrap();
    shell
}

fn last_frame(shell: &ClockShell<Recorder, FixedClock>) -> &Shown {
    shell.presenter().frames.last().unwrap()
}

#[test]
fn initialize_renders_face() {
    let shell = initialized();

    assert_eq!(shell.state(), ShellState::Initialized);
    assert_eq!(shell.theme().unwrap().name(), "Modern");
    assert!(shell.renderer().face_rendered());
    assert!(shell.presenter().frames.is_empty());
}

#[test]
fn initialize_twice_is_rejected() {
    let mut shell = initialized();

    let result = shell.initialize(ClockConfig::in_memory(), ThemeCatalog::with_builtin_themes());

    assert!(matches!(
        result,
        Err(ClockError::InvalidState {
            operation: "initialize",
            state: "initialized"
        })
    ));
}

#[test]
fn unknown_theme_falls_back_to_default() {
    let mut config = ClockConfig::in_memory();
    config.set("current_theme", json!("Sepia")).unwrap();
    let mut shell = shell();

    shell
        .initialize(config, ThemeCatalog::with_builtin_themes())
        .unwrap();

    assert_eq!(shell.theme().unwrap().name(), "Modern");
}

#[test]
fn missing_default_falls_back_to_first_theme() {
    let mut config = ClockConfig::in_memory();
    config.set("current_theme", json!("Sepia")).unwrap();
    let mut catalog = ThemeCatalog::with_builtin_themes();
    catalog.unregister("Modern");
    let mut shell = shell();

    shell.initialize(config, catalog).unwrap();

    assert_eq!(shell.theme().unwrap().name(), "Classic");
}

#[test]
fn empty_catalog_has_no_theme() {
    let mut shell = shell();

    let result = shell.initialize(ClockConfig::in_memory(), ThemeCatalog::new());

    assert!(matches!(result, Err(ClockError::NoTheme { .. })));
    assert_eq!(shell.state(), ShellState::Uninitialized);
}

#[test]
fn tick_before_initialize_fails() {
    let mut shell = shell();

    assert!(matches!(
        shell.tick(),
        Err(ClockError::NotInitialized { component: "shell" })
    ));
}

#[test]
fn tick_updates_label_and_hands() {
    let mut shell = initialized();

    shell.tick().unwrap();

    assert_eq!(shell.digital_text(), Some("2024/01/02 10:10:30"));
    assert_eq!(
        last_frame(&shell),
        &Shown {
            digital: Some("2024/01/02 10:10:30".to_string()),
            theme: "Modern".to_string(),
            always_on_top: false,
            hands: 4,
        }
    );
}

#[test]
fn repeated_ticks_keep_one_set_of_hands() {
    let mut shell = initialized();

    shell.tick().unwrap();
    shell.tick().unwrap();
    shell.tick().unwrap();

    assert_eq!(shell.presenter().frames.len(), 3);
    assert_eq!(last_frame(&shell).hands, 4);
}

#[test]
fn tick_after_shutdown_draws_nothing() {
    let mut shell = initialized();
    shell.tick().unwrap();

    shell.shutdown().unwrap();
    shell.tick().unwrap();
    shell.shutdown().unwrap();

    assert_eq!(shell.state(), ShellState::Stopped);
    assert_eq!(shell.presenter().frames.len(), 1);
    assert_eq!(shell.presenter().teardowns, 1);
}

#[test]
fn theme_command_redraws_and_publishes() {
    let mut shell = initialized();
    let themes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&themes);
    shell
        .events_mut()
        .subscribe(EventKind::ThemeChanged, move |event| {
            if let ClockEvent::ThemeChanged { name } = event {
                sink.borrow_mut().push(name.clone());
            }
            Ok(())
        });
    shell.tick().unwrap();

    shell.handle(UiCommand::Theme("Neon".to_string())).unwrap();

    assert_eq!(shell.config().current_theme(), "Neon");
    assert_eq!(*themes.borrow(), vec!["Neon".to_string()]);
    let frame = last_frame(&shell);
    assert_eq!(frame.theme, "Neon");
    assert_eq!(frame.hands, 10);
}

#[test]
fn unknown_theme_command_alerts() {
    let mut shell = initialized();

    shell.handle(UiCommand::Theme("Sepia".to_string())).unwrap();

    assert_eq!(shell.theme().unwrap().name(), "Modern");
    assert_eq!(shell.presenter().alerts[0].0, "Unknown theme");
}

#[test]
fn oversized_custom_size_is_rejected() {
    let mut shell = initialized();
    let before = shell.config().settings().clone();

    shell
        .handle(UiCommand::Size(SizeRequest::Custom("900".to_string())))
        .unwrap();

    assert_eq!(shell.config().settings(), &before);
    let (title, message) = &shell.presenter().alerts[0];
    assert_eq!(title, "Range error");
    assert!(message.contains("900"));
}

#[test]
fn size_preset_resizes_renderer() {
    let mut shell = initialized();
    let changes = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&changes);
    shell
        .events_mut()
        .subscribe(EventKind::SettingChanged, move |_| {
            *counter.borrow_mut() += 1;
            Ok(())
        });

    shell
        .handle(UiCommand::Size(SizeRequest::Preset(SizePreset::Large)))
        .unwrap();

    assert_eq!(shell.config().radius(), 200);
    assert_eq!(shell.renderer().geometry().unwrap().radius, 200);
    assert!(shell.renderer().face_rendered());
    assert_eq!(*changes.borrow(), 4);
}

#[test]
fn toggles_reach_the_frame() {
    let mut shell = initialized();
    shell.tick().unwrap();

    shell.handle(UiCommand::AlwaysOnTop(true)).unwrap();
    assert!(last_frame(&shell).always_on_top);

    shell.handle(UiCommand::Digital(false)).unwrap();
    assert_eq!(last_frame(&shell).digital, None);
    assert_eq!(shell.digital_text(), Some("2024/01/02 10:10:30"));
}

#[test]
fn reset_restores_theme_and_size() {
    let mut shell = initialized();
    shell.tick().unwrap();
    shell.handle_line("theme Dark").unwrap();
    shell.handle_line("size small").unwrap();
    shell.handle_line("top on").unwrap();

    shell.handle(UiCommand::Reset).unwrap();

    assert_eq!(shell.theme().unwrap().name(), "Modern");
    assert_eq!(shell.config().radius(), 150);
    assert!(!shell.config().always_on_top());
    assert_eq!(shell.renderer().geometry().unwrap().radius, 150);
    assert_eq!(last_frame(&shell).theme, "Modern");
}

#[test]
fn settings_and_themes_use_the_presenter() {
    let mut shell = initialized();

    shell.handle(UiCommand::Settings).unwrap();
    shell.handle(UiCommand::Themes).unwrap();

    let presenter = shell.presenter();
    assert_eq!(presenter.settings[0].themes.len(), 6);
    assert_eq!(
        presenter.alerts[0],
        (
            "Themes".to_string(),
            "Modern, Classic, Dark, Light, Neon, Minimal".to_string()
        )
    );
}

#[test]
fn garbage_input_is_reported() {
    let mut shell = initialized();

    assert_eq!(shell.handle_line("dance").unwrap(), Flow::Continue);
    assert_eq!(shell.handle_line("   ").unwrap(), Flow::Continue);

    assert_eq!(shell.presenter().alerts.len(), 1);
    assert_eq!(shell.presenter().alerts[0].0, "Unknown command");
}

#[test]
fn exit_requests_close() {
    let mut shell = initialized();
    let closed = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&closed);
    shell
        .events_mut()
        .subscribe(EventKind::CloseRequested, move |_| {
            *flag.borrow_mut() = true;
            Ok(())
        });

    assert_eq!(shell.handle(UiCommand::Exit).unwrap(), Flow::Exit);
    assert!(*closed.borrow());
}

#[test]
fn commands_parse() {
    assert_eq!(
        "theme  Dark ".parse::<UiCommand>(),
        Ok(UiCommand::Theme("Dark".to_string()))
    );
    assert_eq!("TOP on".parse::<UiCommand>(), Ok(UiCommand::AlwaysOnTop(true)));
    assert_eq!("digital off".parse::<UiCommand>(), Ok(UiCommand::Digital(false)));
    assert_eq!(
        "size xlarge".parse::<UiCommand>(),
        Ok(UiCommand::Size(SizeRequest::Preset(SizePreset::XLarge)))
    );
    assert_eq!(
        "size 420".parse::<UiCommand>(),
        Ok(UiCommand::Size(SizeRequest::Custom("420".to_string())))
    );
    assert_eq!("quit".parse::<UiCommand>(), Ok(UiCommand::Exit));
    assert_eq!(
        "theme".parse::<UiCommand>(),
        Err(CommandParseError::MissingArgument { command: "theme" })
    );
    assert_eq!(
        "top maybe".parse::<UiCommand>(),
        Err(CommandParseError::BadToggle("maybe".to_string()))
    );
    assert_eq!("".parse::<UiCommand>(), Err(CommandParseError::Empty));
}

#[tokio::test]
async fn run_before_initialize_fails() {
    let mut shell = shell();

    let result = shell.run(tokio::io::empty()).await;

    assert!(matches!(
        result,
        Err(ClockError::InvalidState {
            operation: "run",
            state: "uninitialized"
        })
    ));
}

#[tokio::test(start_paused = true)]
async fn run_handles_commands_until_exit() {
    let mut shell = initialized();
    let input = BufReader::new(&b"theme Neon\nexit\n"[..]);

    shell.run(input).await.unwrap();

    assert_eq!(shell.state(), ShellState::Stopped);
    assert_eq!(shell.theme().unwrap().name(), "Neon");
    assert_eq!(shell.presenter().frames.len(), 2);
    assert_eq!(shell.presenter().teardowns, 1);
}

async fn frames_until_stopped(policy: TickPolicy) -> usize {
    let mut shell = initialized().with_tick_policy(policy);
    let stop = shell.stop_handle();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(3500)).await;
        stop.stop();
    });

    shell.run(tokio::io::empty()).await.unwrap();

    assert_eq!(shell.state(), ShellState::Stopped);
    shell.presenter().frames.len()
}

#[tokio::test(start_paused = true)]
async fn fixed_delay_ticks_immediately_then_every_second() {
    assert_eq!(frames_until_stopped(TickPolicy::FixedDelay).await, 4);
}

#[tokio::test(start_paused = true)]
async fn interval_ticks_immediately_then_every_second() {
    assert_eq!(frames_until_stopped(TickPolicy::Interval).await, 4);
}

/// Fires the ticker twice, spending `busy` on the first tick, and returns
/// when each fire happened relative to the ticker's creation.
async fn fire_times(policy: TickPolicy, busy: Duration) -> (Duration, Duration) {
    let start = tokio::time::Instant::now();
    let mut ticker = Ticker::new(policy, Duration::from_secs(1));

    ticker.fired().await;
    let first = start.elapsed();
    tokio::time::advance(busy).await;
    ticker.rearm();

    ticker.fired().await;
    (first, start.elapsed())
}

#[tokio::test(start_paused = true)]
async fn fixed_delay_pushes_next_tick_back_by_slow_tick() {
    let (first, second) = fire_times(TickPolicy::FixedDelay, Duration::from_millis(400)).await;

    assert_eq!(first, Duration::from_secs(1));
    assert_eq!(second, Duration::from_millis(2400));
}

#[tokio::test(start_paused = true)]
async fn interval_keeps_one_second_grid_after_slow_tick() {
    let (first, second) = fire_times(TickPolicy::Interval, Duration::from_millis(400)).await;

    assert_eq!(first, Duration::from_secs(1));
    assert_eq!(second, Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn interval_skips_ticks_missed_while_busy() {
    let start = tokio::time::Instant::now();
    let mut ticker = Ticker::new(TickPolicy::Interval, Duration::from_secs(1));

    ticker.fired().await;
    tokio::time::advance(Duration::from_millis(1500)).await;
    ticker.rearm();

    ticker.fired().await;
    assert_eq!(start.elapsed(), Duration::from_millis(2500));
    ticker.fired().await;
    assert_eq!(start.elapsed(), Duration::from_secs(3));
}
