use anyhow::{Context, Result};
use log::{debug, info};
use video_modes::types::{DisplayConfig, ModeFilter, Resolution};
use video_modes::{StandardModes, VideoBackend};

/// Window changes the iced runtime still has to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WindowRequest {
    Reconfigure(DisplayConfig),
    Restart,
}

/// [`VideoBackend`] for the iced front-end. Requests are queued here and
/// turned into window commands by the application's `update`.
#[derive(Debug, Default)]
pub(crate) struct IcedVideoBackend {
    config: DisplayConfig,
    requests: Vec<WindowRequest>,
}

impl IcedVideoBackend {
    pub(crate) fn new(config: DisplayConfig) -> Self {
        Self {
            config,
            requests: Vec::new(),
        }
    }

    pub(crate) fn drain_requests(&mut self) -> Vec<WindowRequest> {
        std::mem::take(&mut self.requests)
    }
}

impl VideoBackend for IcedVideoBackend {
    fn video_modes(&self, filter: &ModeFilter) -> Vec<Resolution> {
        StandardModes::list(filter)
    }

    fn video_config(&self) -> DisplayConfig {
        self.config
    }

    fn change_video_config(&mut self, config: DisplayConfig) {
        debug!("Queueing window reconfiguration {:?}", config);
        self.config = config;
        self.requests.push(WindowRequest::Reconfigure(config));
    }

    fn restart(&mut self) {
        debug!("Queueing restart");
        self.requests.push(WindowRequest::Restart);
    }
}

/// Starts a fresh copy of this executable with the same arguments
pub(crate) fn relaunch() -> Result<()> {
    let exe = std::env::current_exe().context("Could not locate the running executable")?;
    info!("Relaunching {:?}", exe);
    std::process::Command::new(&exe)
        .args(std::env::args_os().skip(1))
        .spawn()
        .with_context(|| format!("Failed to relaunch {:?}", exe))?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn live_change_updates_config_and_queues() {
        let mut backend = IcedVideoBackend::default();
        let config = DisplayConfig {
            resolution: Resolution::new(1600, 900),
            fullscreen: true,
        };
        backend.change_video_config(config);
        assert_eq!(backend.video_config(), config);
        assert_eq!(
            backend.drain_requests(),
            vec![WindowRequest::Reconfigure(config)]
        );
        assert!(backend.drain_requests().is_empty());
    }

    #[test]
    fn restart_keeps_config() {
        let config = DisplayConfig::default();
        let mut backend = IcedVideoBackend::new(config);
        backend.restart();
        assert_eq!(backend.video_config(), config);
        assert_eq!(backend.drain_requests(), vec![WindowRequest::Restart]);
    }

    #[test]
    fn modes_come_from_catalogue() {
        let backend = IcedVideoBackend::default();
        let filter = ModeFilter {
            unique: true,
            minimum: Some(Resolution::new(3840, 2160)),
        };
        assert_eq!(
            backend.video_modes(&filter),
            vec![
                Resolution::new(3840, 2160),
                Resolution::new(3840, 2400),
                Resolution::new(3840, 2880)
            ]
        );
    }
}
