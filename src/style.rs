use crate::gui::DisplayMessage;
use iced::widget::{Button, Text};
use iced::{theme, Length};

pub(crate) fn make_button(text: &str) -> Button<'_, DisplayMessage> {
    Button::new(Text::new(text).size(18))
        .padding(10)
        .style(theme::Button::Primary)
        .height(Length::Shrink)
        .width(Length::Shrink)
}

/// Selected rows keep the primary style, everything else is muted
pub(crate) fn inactive_style(selected: bool) -> theme::Button {
    match selected {
        true => theme::Button::Primary,
        false => theme::Button::Secondary,
    }
}
