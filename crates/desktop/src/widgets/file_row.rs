use iced::widget::{column, container, row, text, Space};
use iced::{Element, Font, Length, Theme};

use deepshield_core::client::media_selection::SelectedMedia;

use crate::app::{scaled, Message};
use crate::theme::{border_color, surface_color, tertiary_color};
use crate::widgets::secondary_button::secondary_button;

const CORNER_RADIUS: f32 = 10.0;

/// Name and kind of the chosen file with a button to pick another one.
pub fn file_row<'a>(
    fs: f32,
    media: &SelectedMedia,
    on_change: Message,
    hovered: bool,
    on_hover: impl Fn(bool) -> Message + 'a,
    theme: &Theme,
) -> Element<'a, Message> {
    let tertiary = tertiary_color(theme);
    let surface = surface_color(theme);
    let border = border_color(theme);

    let name = text(media.display_name())
        .size(scaled(14.0, fs))
        .font(Font {
            weight: iced::font::Weight::Medium,
            ..Font::DEFAULT
        });
    let kind = text(media.kind.to_string().to_uppercase())
        .size(scaled(11.0, fs))
        .color(tertiary);

    let change = secondary_button(
        move || text("Change").size(scaled(13.0, fs)).into(),
        on_change,
        hovered,
        on_hover,
        [5, 12],
        Length::Shrink,
    );

    let info = column![kind, Space::new().height(2), name].width(Length::Fill);

    container(row![info, change].spacing(8).align_y(iced::Alignment::Center))
        .padding([10, 12])
        .width(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(surface)),
            border: iced::border::Border {
                color: border,
                width: 1.0,
                radius: CORNER_RADIUS.into(),
            },
            ..container::Style::default()
        })
        .into()
}
