mod backend;
mod font_awesome;
mod gui;
mod screen;
mod settings;
mod style;

use gui::{DisplaySetupUi, GuiFlags};
use iced::{window, Application, Settings, Size};

fn main() -> iced::Result {
    pretty_env_logger::init();
    let flags = GuiFlags::load();
    let resolution = flags.settings.display.resolution;
    DisplaySetupUi::run(Settings {
        window: window::Settings {
            size: Size::new(resolution.width as f32, resolution.height as f32),
            min_size: Some(Size::new(640.0, 480.0)),
            ..Default::default()
        },
        ..Settings::with_flags(flags)
    })
}
