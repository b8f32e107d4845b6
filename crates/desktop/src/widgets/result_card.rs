use iced::widget::{column, container, row, text, Space};
use iced::{Border, Color, Element, Font, Length, Shadow, Theme, Vector};

use deepshield_core::client::detect_response::{DetectResult, Verdict};

use crate::app::{scaled, HoverTarget, Message};
use crate::theme::{border_color, muted_color, surface_color};
use crate::widgets::secondary_button::secondary_button_pill;

const CARD_WIDTH: f32 = 360.0;

/// Overlay card with the similarity score and verdict.
pub fn result_card<'a>(
    fs: f32,
    result: &DetectResult,
    close_hovered: bool,
    theme: &Theme,
) -> Element<'a, Message> {
    let verdict = result.verdict();
    let palette = theme.palette();
    let muted = muted_color(theme);
    let surface = surface_color(theme);
    let border = border_color(theme);

    let (icon, tone) = match verdict {
        Verdict::Manipulated => ("\u{26A0}", palette.danger),
        Verdict::Authentic => ("\u{2713}", palette.success),
    };

    let close = secondary_button_pill(
        move || text("\u{00D7}").size(scaled(16.0, fs)).into(),
        Message::CloseResult,
        close_hovered,
        |h| Message::Hover(HoverTarget::CloseResult, h),
        [2, 10],
    );

    let header = row![
        text("Detection Results")
            .size(scaled(20.0, fs))
            .font(Font {
                weight: iced::font::Weight::Bold,
                ..Font::DEFAULT
            })
            .width(Length::Fill),
        close,
    ]
    .align_y(iced::Alignment::Center);

    let mut body = column![
        header,
        Space::new().height(16),
        stat_line(fs, "Similarity Score:", result.similarity_score(), muted),
    ];
    if let Some(euclidean) = result.euclidean_similarity {
        body = body
            .push(Space::new().height(6))
            .push(stat_line(fs, "Euclidean Distance:", format!("{euclidean:.2}"), muted));
    }
    body = body
        .push(Space::new().height(6))
        .push(stat_line(fs, "Likely Deepfake:", verdict.answer().to_string(), muted))
        .push(Space::new().height(16))
        .push(
            container(
                row![
                    text(icon).size(scaled(18.0, fs)).color(tone),
                    text(verdict.description()).size(scaled(14.0, fs)).color(tone),
                ]
                .spacing(10)
                .align_y(iced::Alignment::Center),
            )
            .padding([10, 12])
            .width(Length::Fill)
            .style(move |_theme: &Theme| container::Style {
                background: Some(iced::Background::Color(Color { a: 0.12, ..tone })),
                border: Border {
                    radius: 8.0.into(),
                    ..Border::default()
                },
                ..container::Style::default()
            }),
        );

    container(body)
        .padding(20)
        .width(scaled(CARD_WIDTH, fs))
        .style(move |_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(surface)),
            border: Border {
                color: border,
                width: 1.0,
                radius: 14.0.into(),
            },
            shadow: Shadow {
                color: Color {
                    a: 0.3,
                    ..Color::BLACK
                },
                offset: Vector::new(0.0, 6.0),
                blur_radius: 24.0,
            },
            ..container::Style::default()
        })
        .into()
}

fn stat_line<'a>(fs: f32, label: &'a str, value: String, muted: Color) -> Element<'a, Message> {
    row![
        text(label).size(scaled(14.0, fs)).color(muted),
        text(value)
            .size(scaled(14.0, fs))
            .font(Font {
                weight: iced::font::Weight::Semibold,
                ..Font::DEFAULT
            }),
    ]
    .spacing(8)
    .into()
}
