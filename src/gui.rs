use crate::backend::{relaunch, IcedVideoBackend, WindowRequest};
use crate::font_awesome::FAIcon;
use crate::screen::{ApplyMode, Controls, DisplaySetupScreen, ScreenEvent, ScreenState};
use crate::settings::{JsonSettingsStore, SavedSettings};
use crate::style::{inactive_style, make_button};
use font_awesome_as_a_crate::Type;
use iced::widget::scrollable::RelativeOffset;
use iced::widget::{scrollable, Checkbox, Column, Container, Row, Scrollable, Space, Text};
use iced::{executor, window, Alignment, Application, Command, Element, Length, Size, Theme};
use log::{debug, error, warn};
use std::path::PathBuf;
use video_modes::types::{DisplayConfig, Resolution};
use video_modes::VideoBackend;

pub(crate) struct DisplaySetupUi {
    screen: DisplaySetupScreen<IcedVideoBackend, JsonSettingsStore>,
    header_icon: Option<FAIcon>,
    notice_icon: Option<FAIcon>,
    error_message: String,
}

#[derive(Debug, Clone)]
pub(crate) enum DisplayMessage {
    OpenSettings,
    CloseSettings,
    ModeSelected(usize),
    FullscreenToggled(bool),
    Apply,
}

impl From<DisplayMessage> for ScreenEvent {
    fn from(message: DisplayMessage) -> Self {
        match message {
            DisplayMessage::ModeSelected(index) => ScreenEvent::ListSelectionChanged(index),
            // the checkbox reports its new value, the screen flips its own state
            DisplayMessage::FullscreenToggled(_) => ScreenEvent::FullscreenToggled,
            DisplayMessage::Apply => ScreenEvent::ApplyPressed,
            DisplayMessage::OpenSettings | DisplayMessage::CloseSettings => ScreenEvent::Other,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub(crate) struct GuiFlags {
    pub(crate) settings: SavedSettings,
    pub(crate) config_file: Option<PathBuf>,
}

impl GuiFlags {
    /// Reads the saved settings, falling back to defaults when there are none
    pub(crate) fn load() -> Self {
        let config_file = match SavedSettings::config_file() {
            Ok(file) => Some(file),
            Err(e) => {
                warn!("Settings will not be saved: {}", e);
                None
            }
        };
        Self::from_config_file(config_file)
    }

    fn from_config_file(config_file: Option<PathBuf>) -> Self {
        let mut settings = config_file
            .as_deref()
            .and_then(SavedSettings::load_from)
            .unwrap_or_default();
        if settings.display.resolution.is_degenerate() {
            warn!(
                "Saved resolution {} is unusable, using defaults",
                settings.display.resolution
            );
            settings.display = DisplayConfig::default();
        }
        Self {
            settings,
            config_file,
        }
    }
}

fn mode_list_id() -> scrollable::Id {
    scrollable::Id::new("mode-list")
}

fn describe(config: &DisplayConfig) -> String {
    let window_mode = match config.fullscreen {
        true => "fullscreen",
        false => "windowed",
    };
    match config.resolution.aspect_ratio() {
        Ok(aspect) => format!("{} [{}], {}", config.resolution, aspect, window_mode),
        Err(_) => format!("{}, {}", config.resolution, window_mode),
    }
}

fn reconfigure_window(config: DisplayConfig) -> Command<DisplayMessage> {
    let Resolution { width, height } = config.resolution;
    let mode = match config.fullscreen {
        true => window::Mode::Fullscreen,
        false => window::Mode::Windowed,
    };
    Command::batch(vec![
        window::change_mode(window::Id::MAIN, mode),
        window::resize(window::Id::MAIN, Size::new(width as f32, height as f32)),
    ])
}

impl DisplaySetupUi {
    fn build(flags: GuiFlags, apply_mode: ApplyMode) -> Self {
        let backend = IcedVideoBackend::new(flags.settings.display);
        let store = JsonSettingsStore::new(flags.config_file, flags.settings);
        Self {
            screen: DisplaySetupScreen::new(backend, store, apply_mode),
            header_icon: FAIcon::new(Type::Solid, "desktop"),
            notice_icon: FAIcon::new(Type::Solid, "exclamation-triangle"),
            error_message: String::new(),
        }
    }

    /// Scrolls the mode list so the preselected row is visible
    fn scroll_to_selection(&self) -> Command<DisplayMessage> {
        let list = match self.screen.controls() {
            Some(controls) => &controls.list,
            None => return Command::none(),
        };
        match (list.selected(), list.entries().len()) {
            (Some(selected), len) if len > 1 => scrollable::snap_to(
                mode_list_id(),
                RelativeOffset {
                    x: 0.0,
                    y: selected as f32 / (len - 1) as f32,
                },
            ),
            _ => Command::none(),
        }
    }

    fn window_commands(&mut self) -> Command<DisplayMessage> {
        let mut commands = Vec::new();
        for request in self.screen.backend_mut().drain_requests() {
            match request {
                WindowRequest::Reconfigure(config) => commands.push(reconfigure_window(config)),
                WindowRequest::Restart => match relaunch() {
                    Ok(()) => commands.push(window::close(window::Id::MAIN)),
                    Err(e) => {
                        error!("{:#}", e);
                        self.error_message = format!("Restart failed: {}", e);
                    }
                },
            }
        }
        Command::batch(commands)
    }

    fn summary_view(&self) -> Element<'_, DisplayMessage> {
        let config = self.screen.backend().video_config();
        Column::new()
            .spacing(10)
            .push(Text::new(format!("Current mode: {}", describe(&config))))
            .push(make_button("Display settings").on_press(DisplayMessage::OpenSettings))
            .into()
    }

    fn settings_view<'a>(&'a self, controls: &'a Controls) -> Element<'a, DisplayMessage> {
        let selected = controls.list.selected();
        let modes = controls.list.entries().iter().enumerate().fold(
            Column::new().spacing(2),
            |column, (index, entry)| {
                column.push(
                    make_button(&entry.label)
                        .width(Length::Fill)
                        .style(inactive_style(selected == Some(index)))
                        .on_press(DisplayMessage::ModeSelected(index)),
                )
            },
        );

        let mut column = Column::new()
            .spacing(10)
            .push(Text::new("Resolution:"))
            .push(
                Scrollable::new(modes)
                    .id(mode_list_id())
                    .height(Length::Fixed(240.0)),
            )
            .push(
                Checkbox::new("Full screen", controls.fullscreen.is_checked())
                    .on_toggle(DisplayMessage::FullscreenToggled),
            );

        if let Some(notice) = self.screen.restart_notice() {
            let notice_row = self
                .notice_icon
                .iter()
                .fold(
                    Row::new().spacing(5).align_items(Alignment::Center),
                    |row, icon| {
                        row.push(
                            icon.svg()
                                .width(Length::Fixed(16.0))
                                .height(Length::Fixed(16.0)),
                        )
                    },
                )
                .push(Text::new(notice).size(14));
            column = column.push(notice_row);
        }

        column
            .push(
                Row::new()
                    .spacing(10)
                    .push(Space::with_width(Length::Fill))
                    .push(
                        make_button("Apply").on_press_maybe(
                            controls
                                .apply
                                .is_enabled()
                                .then(|| DisplayMessage::Apply),
                        ),
                    )
                    .push(make_button("Close").on_press(DisplayMessage::CloseSettings)),
            )
            .into()
    }
}

impl Application for DisplaySetupUi {
    type Executor = executor::Default;
    type Message = DisplayMessage;
    type Theme = Theme;
    type Flags = GuiFlags;

    fn new(flags: Self::Flags) -> (Self, Command<DisplayMessage>) {
        let fullscreen = flags.settings.display.fullscreen;
        let ui = DisplaySetupUi::build(flags, ApplyMode::for_current_platform());
        let command = match fullscreen {
            true => window::change_mode(window::Id::MAIN, window::Mode::Fullscreen),
            false => Command::none(),
        };
        (ui, command)
    }

    fn title(&self) -> String {
        match self.screen.state() {
            ScreenState::Dirty => "Display setup (not applied)".to_string(),
            _ => "Display setup".to_string(),
        }
    }

    fn update(&mut self, message: DisplayMessage) -> Command<DisplayMessage> {
        if let DisplayMessage::FullscreenToggled(checked) = message {
            let unchanged = self
                .screen
                .controls()
                .map_or(false, |controls| controls.fullscreen.is_checked() == checked);
            if unchanged {
                return Command::none();
            }
        }
        // the screen sees every message first, whatever it leaves belongs to the shell
        if !self.screen.handle_event(ScreenEvent::from(message.clone())) {
            return self.window_commands();
        }
        match message {
            DisplayMessage::OpenSettings => {
                self.error_message.clear();
                self.screen.activate();
                self.scroll_to_selection()
            }
            DisplayMessage::CloseSettings => {
                self.screen.close();
                Command::none()
            }
            other => {
                debug!("Unhandled message {:?}", other);
                Command::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Self::Message> {
        let header = self
            .header_icon
            .iter()
            .fold(
                Row::new().spacing(10).align_items(Alignment::Center),
                |row, icon| {
                    row.push(
                        icon.svg()
                            .width(Length::Fixed(24.0))
                            .height(Length::Fixed(24.0)),
                    )
                },
            )
            .push(Text::new("Display").size(28));

        let body = match self.screen.controls() {
            Some(controls) => self.settings_view(controls),
            None => self.summary_view(),
        };

        let mut column = Column::new()
            .spacing(15)
            .padding(20)
            .max_width(560)
            .push(header)
            .push(body);
        if !self.error_message.is_empty() {
            column = column.push(Text::new(&self.error_message));
        }

        Container::new(column)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x()
            .center_y()
            .into()
    }
}
