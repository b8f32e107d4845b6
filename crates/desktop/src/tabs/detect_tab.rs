use iced::widget::{center, column, container, opaque, row, stack, text, Space};
use iced::{Border, Color, Element, Length, Theme};

use deepshield_core::client::media_selection::{MediaSelection, MediaSlot};

use crate::app::{scaled, HoverTarget, Message};
use crate::widgets::media_box::media_box;
use crate::widgets::primary_button::primary_button;
use crate::widgets::result_card::result_card;

pub fn view<'a>(
    fs: f32,
    selection: &MediaSelection,
    loading: bool,
    is_hovered: impl Fn(HoverTarget) -> bool,
    theme: &Theme,
) -> Element<'a, Message> {
    let boxes = row(MediaSlot::ALL.iter().map(|&slot| {
        media_box(fs, slot, selection.get(slot), &is_hovered, theme)
    }))
    .spacing(16);

    let label = if loading { "Processing..." } else { "Check Score" };
    let check = primary_button(
        move || text(label).size(scaled(15.0, fs)).into(),
        selection
            .can_submit(loading)
            .then_some(Message::CheckScore),
        is_hovered(HoverTarget::CheckScore),
        |h| Message::Hover(HoverTarget::CheckScore, h),
        [10, 28],
        Length::Shrink,
    );

    let mut page = column![boxes, Space::new().height(20)]
        .width(Length::Fill)
        .align_x(iced::Alignment::Center);

    if let Some(error) = selection.error() {
        page = page
            .push(error_banner(fs, error.to_string(), theme))
            .push(Space::new().height(16));
    }
    page = page.push(check);

    match selection.visible_result() {
        Some(result) => {
            let card = result_card(fs, result, is_hovered(HoverTarget::CloseResult), theme);
            let backdrop = container(center(card))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_theme: &Theme| container::Style {
                    background: Some(iced::Background::Color(Color {
                        a: 0.5,
                        ..Color::BLACK
                    })),
                    ..container::Style::default()
                });
            stack![page, opaque(backdrop)].into()
        }
        None => page.into(),
    }
}

fn error_banner<'a>(fs: f32, message: String, theme: &Theme) -> Element<'a, Message> {
    let danger = theme.palette().danger;

    container(text(message).size(scaled(14.0, fs)).color(danger))
        .padding([10, 14])
        .width(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(Color { a: 0.1, ..danger })),
            border: Border {
                color: Color { a: 0.4, ..danger },
                width: 1.0,
                radius: 8.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}
