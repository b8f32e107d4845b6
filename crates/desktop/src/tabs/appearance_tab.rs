use iced::widget::{button, checkbox, column, pick_list, row, slider, text, text_input, Space};
use iced::Element;

use crate::app::{scaled, Message};
use crate::settings::{Appearance, Settings, MAX_FONT_SCALE, MIN_FONT_SCALE};

pub fn view<'a>(settings: &Settings) -> Element<'a, Message> {
    let fs = settings.font_scale;

    column![
        text("Theme").size(scaled(16.0, fs)),
        Space::new().height(8),
        row![
            text("Mode").size(scaled(13.0, fs)),
            pick_list(Appearance::ALL, Some(settings.appearance), Message::AppearanceChanged)
                .text_size(scaled(13.0, fs)),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
        Space::new().height(12),
        checkbox(settings.high_contrast)
            .label("High contrast")
            .on_toggle(Message::HighContrastChanged)
            .text_size(scaled(13.0, fs)),
        Space::new().height(20),
        text("Font size").size(scaled(16.0, fs)),
        Space::new().height(8),
        row![
            slider(
                MIN_FONT_SCALE..=MAX_FONT_SCALE,
                settings.font_scale,
                Message::FontScaleChanged
            )
            .step(0.05),
            text(format!("{:.0}%", settings.font_scale * 100.0)).size(scaled(13.0, fs)),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
        Space::new().height(20),
        text("Detection server").size(scaled(16.0, fs)),
        Space::new().height(8),
        text_input("http://localhost:8877", &settings.server_url)
            .on_input(Message::ServerUrlChanged)
            .size(scaled(13.0, fs))
            .padding([6, 10]),
        Space::new().height(20),
        button(text("Open settings folder").size(scaled(13.0, fs)))
            .on_press(Message::OpenSettingsFolder)
            .style(button::secondary)
            .padding([6, 14]),
    ]
    .spacing(0)
    .into()
}
