use font_awesome_as_a_crate::Type;
use iced::widget::svg::{Handle, Svg};
use log::warn;

pub struct FAIcon {
    icon_handle: Handle,
}

impl FAIcon {
    /// Creates a new font awesome icon, None if the icon can not be found
    pub fn new(fa_type: Type, icon_name: &str) -> Option<Self> {
        match font_awesome_as_a_crate::svg(fa_type, icon_name) {
            Ok(svg) => Some(Self {
                icon_handle: Handle::from_memory(svg.as_bytes()),
            }),
            Err(_) => {
                warn!("No font awesome icon named {}", icon_name);
                None
            }
        }
    }

    pub fn svg(&self) -> Svg {
        Svg::new(self.icon_handle.clone())
    }
}
