use crate::settings::SettingsStore;
use log::{debug, error, info, warn};
use video_modes::types::{DisplayConfig, ModeFilter, Resolution};
use video_modes::VideoBackend;

pub(crate) const RESTART_NOTICE: &str =
    "The game will be restarted in order to apply changes. All unsaved progress will be lost.";

/// Modes offered by the screen: no duplicates, nothing below 640x480
pub(crate) const MODE_FILTER: ModeFilter = ModeFilter {
    unique: true,
    minimum: Some(Resolution::new(640, 480)),
};

/// How an applied configuration reaches the renderer
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum ApplyMode {
    /// Reconfigure the running output surface
    Live,
    /// Save, then relaunch the process
    Restart,
}

impl ApplyMode {
    /// Only Linux is known to survive an in-place reconfiguration
    pub(crate) fn for_current_platform() -> Self {
        match cfg!(target_os = "linux") {
            true => ApplyMode::Live,
            false => ApplyMode::Restart,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum ScreenState {
    Inactive,
    Clean,
    Dirty,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum ScreenEvent {
    ListSelectionChanged(usize),
    FullscreenToggled,
    ApplyPressed,
    Other,
}

/// What the user has picked, or what was picked when the screen opened
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub(crate) struct Selection {
    pub(crate) mode: Option<usize>,
    pub(crate) fullscreen: bool,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct ModeEntry {
    pub(crate) resolution: Resolution,
    pub(crate) label: String,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ModeList {
    entries: Vec<ModeEntry>,
    selected: Option<usize>,
}

impl ModeList {
    /// Replaces the entries with `modes`, labelled `WxH [a:b]`.
    /// Modes with a zero dimension have no aspect ratio and are left out.
    fn refresh(&mut self, modes: Vec<Resolution>) {
        self.entries.clear();
        self.selected = None;
        for resolution in modes {
            match resolution.aspect_ratio() {
                Ok(aspect) => self.entries.push(ModeEntry {
                    resolution,
                    label: format!("{} [{}]", resolution, aspect),
                }),
                Err(e) => warn!("Skipping video mode: {}", e),
            }
        }
    }

    fn position_of(&self, resolution: Resolution) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.resolution == resolution)
    }

    /// Returns false, leaving the selection alone, when `index` is past the end
    fn select(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(i) if i >= self.entries.len() => false,
            _ => {
                self.selected = index;
                true
            }
        }
    }

    pub(crate) fn entries(&self) -> &[ModeEntry] {
        &self.entries
    }

    pub(crate) fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub(crate) fn selected_resolution(&self) -> Option<Resolution> {
        self.selected
            .and_then(|i| self.entries.get(i))
            .map(|entry| entry.resolution)
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub(crate) struct FullscreenCheck {
    checked: bool,
}

impl FullscreenCheck {
    fn toggle(&mut self) {
        self.checked = !self.checked;
    }

    pub(crate) fn is_checked(&self) -> bool {
        self.checked
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub(crate) struct ApplyButton {
    enabled: bool,
}

impl ApplyButton {
    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// The widgets of an open screen. Only exists while the screen is active.
#[derive(Debug, Clone)]
pub(crate) struct Controls {
    pub(crate) list: ModeList,
    pub(crate) fullscreen: FullscreenCheck,
    pub(crate) apply: ApplyButton,
}

impl Controls {
    fn selection(&self) -> Selection {
        Selection {
            mode: self.list.selected(),
            fullscreen: self.fullscreen.is_checked(),
        }
    }
}

/// Display settings screen: picks a resolution and fullscreen flag, then
/// hands the result to the settings store and the video backend.
pub(crate) struct DisplaySetupScreen<B, S> {
    backend: B,
    store: S,
    apply_mode: ApplyMode,
    snapshot: Selection,
    controls: Option<Controls>,
}

impl<B: VideoBackend, S: SettingsStore> DisplaySetupScreen<B, S> {
    pub(crate) fn new(backend: B, store: S, apply_mode: ApplyMode) -> Self {
        Self {
            backend,
            store,
            apply_mode,
            snapshot: Selection::default(),
            controls: None,
        }
    }

    /// Opens the screen with the list and checkbox mirroring the current config
    pub(crate) fn activate(&mut self) {
        let config = self.backend.video_config();
        let mut list = ModeList::default();
        list.refresh(self.backend.video_modes(&MODE_FILTER));

        let mode = list.position_of(config.resolution);
        if mode.is_none() {
            warn!(
                "Current resolution {} is not among the {} offered modes",
                config.resolution,
                list.entries().len()
            );
        }
        list.select(mode);

        self.snapshot = Selection {
            mode,
            fullscreen: config.fullscreen,
        };
        self.controls = Some(Controls {
            list,
            fullscreen: FullscreenCheck {
                checked: config.fullscreen,
            },
            apply: ApplyButton::default(),
        });
        self.update_apply();
        debug!("Display setup opened with {:?}", self.snapshot);
    }

    /// Closes the screen, throwing away anything not applied
    pub(crate) fn close(&mut self) {
        if let Some(controls) = self.controls.take() {
            debug!("Display setup closed, discarding {:?}", controls.selection());
        }
    }

    /// Dispatches a UI event. Returns true when the event was not for this
    /// screen and should keep propagating.
    pub(crate) fn handle_event(&mut self, event: ScreenEvent) -> bool {
        match event {
            ScreenEvent::ListSelectionChanged(index) => {
                if let Some(controls) = self.controls.as_mut() {
                    if !controls.list.select(Some(index)) {
                        warn!("Ignoring selection of missing mode {}", index);
                    }
                }
                self.update_apply();
            }
            ScreenEvent::FullscreenToggled => {
                if let Some(controls) = self.controls.as_mut() {
                    controls.fullscreen.toggle();
                }
                self.update_apply();
            }
            ScreenEvent::ApplyPressed => {
                match self.controls.as_ref().map(|c| c.apply.is_enabled()) {
                    None => {}
                    Some(false) => debug!("Apply pressed with nothing to apply"),
                    Some(true) => {
                        self.change_display();
                        self.update_apply();
                    }
                }
            }
            ScreenEvent::Other => return true,
        }
        false
    }

    pub(crate) fn state(&self) -> ScreenState {
        match &self.controls {
            None => ScreenState::Inactive,
            Some(_) if self.is_dirty() => ScreenState::Dirty,
            Some(_) => ScreenState::Clean,
        }
    }

    /// True when the pending selection differs from the snapshot in either field
    pub(crate) fn is_dirty(&self) -> bool {
        self.controls
            .as_ref()
            .map_or(false, |controls| controls.selection() != self.snapshot)
    }

    pub(crate) fn controls(&self) -> Option<&Controls> {
        self.controls.as_ref()
    }

    pub(crate) fn restart_notice(&self) -> Option<&'static str> {
        match self.apply_mode {
            ApplyMode::Restart => Some(RESTART_NOTICE),
            ApplyMode::Live => None,
        }
    }

    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    pub(crate) fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    fn update_apply(&mut self) {
        let dirty = self.is_dirty();
        if let Some(controls) = self.controls.as_mut() {
            controls.apply.enabled = dirty;
        }
    }

    fn change_display(&mut self) {
        let selection = match &self.controls {
            Some(controls) => controls.selection(),
            None => return,
        };
        let selected_resolution = self
            .controls
            .as_ref()
            .and_then(|controls| controls.list.selected_resolution());

        let mut config = self.backend.video_config();
        // no selected mode keeps the current resolution
        if let Some(resolution) = selected_resolution {
            config.resolution = resolution;
        }
        config.fullscreen = selection.fullscreen;
        self.snapshot = selection;

        match self.store.save_resolution_settings(&config) {
            Ok(()) => info!("Saved display settings {:?}", config),
            Err(e) => error!("Failed to save display settings: {:#}", e),
        }

        match self.apply_mode {
            ApplyMode::Restart => {
                info!("Restarting to apply {}", config.resolution);
                self.backend.restart();
            }
            ApplyMode::Live => {
                info!(
                    "Changing video config to {} fullscreen={}",
                    config.resolution, config.fullscreen
                );
                self.backend.change_video_config(config);
            }
        }
        self.controls = None;
    }
}
