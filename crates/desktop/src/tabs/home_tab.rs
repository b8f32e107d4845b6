use iced::widget::{column, container, text, Space};
use iced::{Border, Element, Font, Length, Theme};

use crate::app::{scaled, HoverTarget, Message, Tab};
use crate::theme::{border_color, muted_color, surface_color};
use crate::widgets::primary_button::primary_button;

const DESCRIPTION: &str = "DeepShield project develops a deepfake detection system using \
pretrained models and cosine similarity to identify manipulated media content. The \
methodology involves feature extraction and similarity calculation to classify media \
samples. The system demonstrates high accuracy and reliability in detecting deepfakes, \
ensuring digital content integrity.";

pub fn view<'a>(fs: f32, get_started_hovered: bool, theme: &Theme) -> Element<'a, Message> {
    let surface = surface_color(theme);
    let border = border_color(theme);

    let hero = text("AI Interface Visualization")
        .size(scaled(34.0, fs))
        .font(Font {
            weight: iced::font::Weight::Bold,
            ..Font::DEFAULT
        });

    let description = container(
        text(DESCRIPTION)
            .size(scaled(15.0, fs))
            .line_height(1.5)
            .color(muted_color(theme)),
    )
    .padding(20)
    .width(Length::Fill)
    .style(move |_theme: &Theme| container::Style {
        background: Some(iced::Background::Color(surface)),
        border: Border {
            color: border,
            width: 1.0,
            radius: 14.0.into(),
        },
        ..container::Style::default()
    });

    let get_started = primary_button(
        move || text("Check a video or picture").size(scaled(14.0, fs)).into(),
        Some(Message::TabSelected(Tab::Detect)),
        get_started_hovered,
        |h| Message::Hover(HoverTarget::GetStarted, h),
        [10, 22],
        Length::Shrink,
    );

    column![
        Space::new().height(12),
        hero,
        Space::new().height(20),
        description,
        Space::new().height(24),
        get_started,
    ]
    .align_x(iced::Alignment::Center)
    .width(Length::Fill)
    .into()
}
