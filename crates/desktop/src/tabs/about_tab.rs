use iced::widget::{column, text, Space};
use iced::Element;

use crate::app::{scaled, Message};

pub fn view(fs: f32) -> Element<'static, Message> {
    let version = env!("CARGO_PKG_VERSION");

    column![
        text("DeepShield").size(scaled(22.0, fs)),
        Space::new().height(4),
        text(format!("Version {version}")).size(scaled(13.0, fs)),
        Space::new().height(12),
        text(
            "Upload a real video or picture of a person next to a suspected deep fake. \
             The detection server embeds sampled frames of both and compares them. A low \
             similarity marks the second file as likely manipulated."
        )
        .size(scaled(13.0, fs)),
        Space::new().height(12),
        text("Files are sent to the server configured under Appearance and deleted after scoring.")
            .size(scaled(13.0, fs)),
        Space::new().height(24),
        text("\u{00A9}2024 All Rights Reserved...").size(scaled(11.0, fs)),
    ]
    .spacing(0)
    .into()
}
