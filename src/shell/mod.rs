//! The application shell.
//!
//! [`ClockShell`] owns the configuration, the theme catalog, the renderer,
//! the presenter and the event bus, and drives them from a single task:
//! ticks come from a tokio timer, commands from lines of input.

mod command;
mod ticker;

#[cfg(test)]
mod tests;

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::Notify,
};
use tracing::{debug, info, instrument, warn};

use crate::{
    ClockError, Result,
    config_store::{ClockConfig, ConfigChange},
    events::{ClockEvent, EventBus},
    present::{Frame, Presenter, WindowState},
    render::{DisplayList, Renderer},
    settings_panel::{SettingsError, SettingsPanel, SettingsView},
    theme::{DEFAULT_THEME, Theme, ThemeCatalog},
    time_source::{ClockReading, DIGITAL_FORMAT, SystemClock, TimeSource, format_time},
};

pub use command::{CommandParseError, SizeRequest, UiCommand};
pub use ticker::TickPolicy;

use ticker::Ticker;

/// Time between ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Lifecycle of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    /// Created, nothing wired yet
    Uninitialized,
    /// Face rendered, not ticking
    Initialized,
    /// Inside [`ClockShell::run`]
    Running,
    /// Shut down; ticks are ignored
    Stopped,
}

impl ShellState {
    fn name(self) -> &'static str {
        match self {
            ShellState::Uninitialized => "uninitialized",
            ShellState::Initialized => "initialized",
            ShellState::Running => "running",
            ShellState::Stopped => "stopped",
        }
    }
}

impl fmt::Display for ShellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether the run loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running
    Continue,
    /// Leave the run loop
    Exit,
}

/// Stops a running shell from another task.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
    wake: Arc<Notify>,
}

impl StopHandle {
    /// Flags the shell as stopped and wakes its run loop.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.wake.notify_one();
    }

    /// Whether [`stop`](Self::stop) has been called.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    async fn stopped(&self) {
        self.wake.notified().await;
    }
}

/// Owns and drives every part of the running clock.
pub struct ClockShell<P, T = SystemClock> {
    state: ShellState,
    config: ClockConfig,
    catalog: ThemeCatalog,
    renderer: Renderer<DisplayList>,
    presenter: P,
    time: T,
    events: EventBus,
    theme: Option<Theme>,
    digital: Option<String>,
    reading: Option<ClockReading>,
    policy: TickPolicy,
    period: Duration,
    stop: StopHandle,
}

impl<P: fmt::Debug, T: fmt::Debug> fmt::Debug for ClockShell<P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClockShell")
            .field("state", &self.state)
            .field("theme", &self.theme.as_ref().map(Theme::name))
            .field("presenter", &self.presenter)
            .field("time", &self.time)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<P: Presenter, T: TimeSource> ClockShell<P, T> {
    /// Creates an uninitialized shell.
    pub fn new(presenter: P, time: T) -> Self {
        Self {
            state: ShellState::Uninitialized,
            config: ClockConfig::in_memory(),
            catalog: ThemeCatalog::new(),
            renderer: Renderer::new(),
            presenter,
            time,
            events: EventBus::new(),
            theme: None,
            digital: None,
            reading: None,
            policy: TickPolicy::default(),
            period: TICK_PERIOD,
            stop: StopHandle::default(),
        }
    }

    /// Selects how ticks are scheduled.
    pub fn with_tick_policy(mut self, policy: TickPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Changes the time between ticks.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Wires in the configuration and catalog and renders the face.
    ///
    /// An unknown configured theme falls back to the default theme, then to
    /// the first registered one.
    ///
    /// # Errors
    /// * `ClockError::InvalidState` - If the shell was already initialized
    /// * `ClockError::NoTheme` - If the catalog is empty
    #[instrument(skip_all, fields(theme = config.current_theme()))]
    pub fn initialize(&mut self, config: ClockConfig, catalog: ThemeCatalog) -> Result<()> {
        self.expect_state(ShellState::Uninitialized, "initialize")?;

        let theme = resolve_theme(&catalog, config.current_theme())?;
        if theme.name() != config.current_theme() {
            warn!(
                requested = config.current_theme(),
                using = theme.name(),
                "Configured theme not found"
            );
        }

        self.renderer.initialize(DisplayList::new(), &config);
        self.renderer.render_face(&theme)?;

        self.theme = Some(theme);
        self.config = config;
        self.catalog = catalog;
        self.state = ShellState::Initialized;
        info!("Clock initialized");

        Ok(())
    }

    /// Updates the clock to the current time.
    ///
    /// Reads the time, refreshes the digital label, redraws the hands and
    /// presents the frame. Does nothing once the shell is stopped.
    ///
    /// # Errors
    /// Returns `ClockError::NotInitialized` before [`initialize`](Self::initialize),
    /// or any rendering or presentation error.
    pub fn tick(&mut self) -> Result<()> {
        if self.is_stopped() {
            debug!("Tick after shutdown ignored");
            return Ok(());
        }
        if self.state == ShellState::Uninitialized {
            return Err(ClockError::NotInitialized { component: "shell" });
        }

        let now = self.time.now();
        self.digital = match format_time(&now, DIGITAL_FORMAT) {
            Ok(label) => Some(label),
            Err(e) => {
                warn!(error = %e, "Failed to format digital time");
                None
            }
        };
        self.reading = Some(ClockReading::from_time(&now));

        self.draw_hands()?;
        self.present()
    }

    /// Runs until `exit`, a stop request or a fatal error.
    ///
    /// Ticks once right away, then on every timer fire. Lines read from
    /// `input` are handled as [`UiCommand`]s between ticks; when `input`
    /// ends the clock keeps ticking.
    ///
    /// # Errors
    /// * `ClockError::InvalidState` - If the shell is not initialized
    /// * Any error from a tick or a command
    pub async fn run<R>(&mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        self.expect_state(ShellState::Initialized, "run")?;
        self.state = ShellState::Running;
        info!(policy = ?self.policy, "Clock running");

        let outcome = self.run_loop(input).await;
        let teardown = self.shutdown();
        outcome.and(teardown)
    }

    async fn run_loop<R>(&mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let stop = self.stop.clone();
        let mut lines = input.lines();
        let mut input_open = true;
        let mut ticker = Ticker::new(self.policy, self.period);

        self.tick()?;

        while !stop.is_stopped() {
            tokio::select! {
                () = ticker.fired() => {
                    self.tick()?;
                    ticker.rearm();
                }
                line = lines.next_line(), if input_open => match line {
                    Ok(Some(line)) => {
                        if self.handle_line(&line)? == Flow::Exit {
                            break;
                        }
                    }
                    Ok(None) => {
                        debug!("Input closed, clock keeps running");
                        input_open = false;
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to read input, ignoring further input");
                        input_open = false;
                    }
                },
                () = stop.stopped() => {}
            }
        }

        Ok(())
    }

    /// Parses and handles one line of input. Unparseable lines are shown as
    /// an alert.
    ///
    /// # Errors
    /// Returns any rendering or presentation error.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        match line.parse::<UiCommand>() {
            Ok(command) => self.handle(command),
            Err(CommandParseError::Empty) => Ok(Flow::Continue),
            Err(e) => {
                self.presenter.alert("Unknown command", &e.to_string());
                self.present_if_drawn()?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Applies a command to the running clock.
    ///
    /// # Errors
    /// Returns `ClockError::NotInitialized` before [`initialize`](Self::initialize),
    /// or any rendering or presentation error.
    #[instrument(skip(self))]
    pub fn handle(&mut self, command: UiCommand) -> Result<Flow> {
        if self.state == ShellState::Uninitialized {
            return Err(ClockError::NotInitialized { component: "shell" });
        }

        match command {
            UiCommand::Theme(name) => self.change_theme(&name)?,
            UiCommand::AlwaysOnTop(on) => {
                let result = SettingsPanel::new(&mut self.config).set_always_on_top(on);
                self.record(result.map(|change| vec![change]));
            }
            UiCommand::Digital(on) => {
                let result = SettingsPanel::new(&mut self.config).set_show_digital(on);
                self.record(result.map(|change| vec![change]));
            }
            UiCommand::Size(request) => {
                let mut panel = SettingsPanel::new(&mut self.config);
                let result = match request {
                    SizeRequest::Preset(preset) => panel.apply_preset(preset),
                    SizeRequest::Custom(text) => panel.apply_custom_size(&text),
                };
                if self.record(result) {
                    self.change_size()?;
                }
            }
            UiCommand::Reset => {
                let result = SettingsPanel::new(&mut self.config).reset();
                if self.record(result) {
                    self.change_size()?;
                    let default_theme = self.config.default_theme().to_string();
                    self.change_theme(&default_theme)?;
                }
            }
            UiCommand::Settings => {
                let view = SettingsView::from_config(&self.config, self.catalog.names());
                self.presenter.show_settings(&view);
            }
            UiCommand::Themes => {
                let names = self.catalog.names().join(", ");
                self.presenter.alert("Themes", &names);
            }
            UiCommand::Exit => {
                self.events.publish(&ClockEvent::CloseRequested);
                return Ok(Flow::Exit);
            }
        }

        self.present_if_drawn()?;
        Ok(Flow::Continue)
    }

    /// Stops the shell and releases the presenter. Later ticks do nothing.
    /// Calling it again is harmless.
    ///
    /// # Errors
    /// Returns the presenter's teardown error.
    pub fn shutdown(&mut self) -> Result<()> {
        self.stop.stop();
        if self.state == ShellState::Stopped {
            return Ok(());
        }

        self.state = ShellState::Stopped;
        info!("Clock stopped");
        self.presenter.teardown()
    }

    /// Handle for stopping the run loop from elsewhere.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ShellState {
        self.state
    }

    /// The live configuration.
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// The theme catalog.
    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    /// Theme on screen, once initialized.
    pub fn theme(&self) -> Option<&Theme> {
        self.theme.as_ref()
    }

    /// Digital label from the last tick.
    pub fn digital_text(&self) -> Option<&str> {
        self.digital.as_deref()
    }

    /// The renderer and its display list.
    pub fn renderer(&self) -> &Renderer<DisplayList> {
        &self.renderer
    }

    /// The presenter.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The event bus, for subscribing.
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    fn is_stopped(&self) -> bool {
        self.state == ShellState::Stopped || self.stop.is_stopped()
    }

    fn expect_state(&self, expected: ShellState, operation: &'static str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(ClockError::InvalidState {
                operation,
                state: self.state.name(),
            })
        }
    }

    fn change_theme(&mut self, name: &str) -> Result<()> {
        let Some(theme) = self.catalog.get(name).cloned() else {
            self.presenter
                .alert("Unknown theme", &format!("no theme named '{name}'"));
            return Ok(());
        };

        let result = SettingsPanel::new(&mut self.config).select_theme(name);
        self.theme = Some(theme);
        self.redraw_face()?;
        self.events.publish(&ClockEvent::ThemeChanged {
            name: name.to_string(),
        });
        self.record(result.map(|change| vec![change]));

        Ok(())
    }

    fn change_size(&mut self) -> Result<()> {
        self.renderer.resize(&self.config)?;
        self.redraw_face()
    }

    fn redraw_face(&mut self) -> Result<()> {
        let theme = displayed(&self.theme)?;
        self.renderer.clear_all()?;
        self.renderer.render_face(theme)?;
        self.draw_hands()
    }

    fn draw_hands(&mut self) -> Result<()> {
        let Some(reading) = self.reading else {
            return Ok(());
        };
        let theme = displayed(&self.theme)?;
        self.renderer.clear_hands()?;
        self.renderer.render_hands(reading, theme)
    }

    /// Publishes accepted changes, or alerts on rejected input. Returns
    /// whether the changes were accepted.
    fn record(&mut self, result: std::result::Result<Vec<ConfigChange>, SettingsError>) -> bool {
        match result {
            Ok(changes) => {
                for change in changes {
                    self.events.publish(&ClockEvent::SettingChanged { change });
                }
                true
            }
            Err(SettingsError::Size(e)) => {
                self.presenter.alert(e.title(), &e.to_string());
                false
            }
            Err(SettingsError::Config(e)) => {
                self.presenter.alert("Settings error", &e.to_string());
                false
            }
        }
    }

    fn present_if_drawn(&mut self) -> Result<()> {
        if self.reading.is_some() {
            self.present()
        } else {
            Ok(())
        }
    }

    fn present(&mut self) -> Result<()> {
        let canvas = self
            .renderer
            .surface()
            .ok_or(ClockError::NotInitialized { component: "renderer" })?;
        let theme = displayed(&self.theme)?;
        let digital = if self.config.show_digital_clock() {
            self.digital.as_deref()
        } else {
            None
        };

        let frame = Frame {
            canvas,
            digital,
            theme,
            window: WindowState {
                size: self.config.window_size(),
                clock_size: self.config.clock_size(),
                always_on_top: self.config.always_on_top(),
            },
        };

        self.presenter.present(&frame)
    }
}

fn displayed(theme: &Option<Theme>) -> Result<&Theme> {
    theme
        .as_ref()
        .ok_or(ClockError::NotInitialized { component: "shell" })
}

fn resolve_theme(catalog: &ThemeCatalog, requested: &str) -> Result<Theme> {
    catalog
        .get(requested)
        .or_else(|| catalog.get(DEFAULT_THEME))
        .or_else(|| catalog.iter().next())
        .cloned()
        .ok_or_else(|| ClockError::NoTheme {
            requested: requested.to_string(),
        })
}
