use crate::types::{DisplayConfig, ModeFilter, Resolution, STANDARD_MODES};
use log::debug;
use thiserror::Error;

pub mod types;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VideoModeError {
    #[error("Resolution {0} has a zero dimension")]
    DegenerateResolution(Resolution),
    #[error("Invalid resolution {0:?}, expected WIDTHxHEIGHT")]
    InvalidResolution(String),
}

pub type VideoResult<T> = Result<T, VideoModeError>;

/// The windowing/graphics side of the display settings.
///
/// Implementors own the live [`DisplayConfig`]; the settings screen only reads it
/// and asks for it to change.
pub trait VideoBackend {
    /// Lists the modes the current display adapter offers, in presentation order.
    fn video_modes(&self, filter: &ModeFilter) -> Vec<Resolution>;

    fn video_config(&self) -> DisplayConfig;

    /// Reconfigures the output surface without restarting.
    fn change_video_config(&mut self, config: DisplayConfig);

    /// Terminates and relaunches the process so that a saved config takes effect.
    fn restart(&mut self);
}

/// Provides the catalogue of common desktop modes for backends that cannot
/// query the adapter themselves
#[derive(Default, Debug, Clone)]
pub struct StandardModes {}

impl StandardModes {
    /// Returns the catalogue, smallest first, with `filter` applied
    ///
    /// # Example Usage
    /// ```
    /// use video_modes::{StandardModes, types::{ModeFilter, Resolution}};
    ///
    /// let modes = StandardModes::list(&ModeFilter {
    ///     unique: true,
    ///     minimum: Some(Resolution::new(1920, 1080)),
    /// });
    /// assert!(modes.iter().all(|m| m.width >= 1920 && m.height >= 1080));
    /// ```
    pub fn list(filter: &ModeFilter) -> Vec<Resolution> {
        let modes = filter.apply(STANDARD_MODES.iter().copied());
        debug!("Standard mode catalogue filtered to {} modes", modes.len());
        modes
    }
}
