use iced::widget::{column, container, row, text, text_input, Space};
use iced::{Border, Element, Font, Length, Theme};

use crate::app::{scaled, HoverTarget, Message};
use crate::forms::FeedbackForm;
use crate::theme::{border_color, muted_color, surface_color, tertiary_color};
use crate::widgets::primary_button::primary_button;

const CARDS_PER_ROW: usize = 3;

const FEATURES: [&str; 12] = [
    "Real-Time Deep Fake Detection",
    "Comprehensive Media Analysis",
    "Multi-Format Support",
    "User-Friendly Interface",
    "Batch Processing",
    "Privacy and Data Security",
    "Customizable Alerts and Notifications",
    "Detailed Reporting and Insights",
    "API Integration",
    "Mobile Compatibility",
    "Ethical and Legal Guidance",
    "Support for Multiple Languages",
];

const FOOTER_GROUPS: [(&str, &[&str]); 4] = [
    ("Features", &["Detect videos", "Detect audio", "Detect pictures"]),
    (
        "Information",
        &[
            "Impact of deep fake",
            "Research and development",
            "Accuracy and Reliability",
            "Overview of deep fakes",
        ],
    ),
    (
        "Support",
        &[
            "FAQ",
            "Contact",
            "Technical Support",
            "Troubleshooting Tips",
            "Updates and Release Notes",
        ],
    ),
    ("Download", &["iOS", "Android", "Windows", "MAC"]),
];

const SOCIAL: [&str; 6] = ["WhatsApp", "YouTube", "Instagram", "Twitter", "Facebook", "Discord"];

pub fn view<'a>(
    fs: f32,
    feedback: &FeedbackForm,
    is_hovered: impl Fn(HoverTarget) -> bool,
    theme: &Theme,
) -> Element<'a, Message> {
    let title = text("Fantastic Features")
        .size(scaled(30.0, fs))
        .font(Font {
            weight: iced::font::Weight::Bold,
            ..Font::DEFAULT
        });

    column![
        title,
        Space::new().height(20),
        feature_grid(fs, theme),
        Space::new().height(32),
        footer_links(fs, theme),
        Space::new().height(28),
        feedback_form(fs, feedback, is_hovered(HoverTarget::SendFeedback), theme),
        Space::new().height(24),
        text("\u{00A9}2024 All Rights Reserved...")
            .size(scaled(11.0, fs))
            .color(tertiary_color(theme)),
    ]
    .width(Length::Fill)
    .align_x(iced::Alignment::Center)
    .into()
}

fn feature_grid<'a>(fs: f32, theme: &Theme) -> Element<'a, Message> {
    let surface = surface_color(theme);
    let border = border_color(theme);
    let accent = theme.palette().primary;

    let rows = FEATURES.chunks(CARDS_PER_ROW).map(|chunk| {
        row(chunk.iter().map(|&title| {
            container(
                column![
                    text("\u{25C6}").size(scaled(18.0, fs)).color(accent),
                    Space::new().height(8),
                    text(title)
                        .size(scaled(14.0, fs))
                        .font(Font {
                            weight: iced::font::Weight::Semibold,
                            ..Font::DEFAULT
                        })
                        .align_x(iced::Alignment::Center),
                ]
                .align_x(iced::Alignment::Center),
            )
            .padding(16)
            .center_x(Length::FillPortion(1))
            .center_y(scaled(110.0, fs))
            .style(move |_theme: &Theme| container::Style {
                background: Some(iced::Background::Color(surface)),
                border: Border {
                    color: border,
                    width: 1.0,
                    radius: 12.0.into(),
                },
                ..container::Style::default()
            })
            .into()
        }))
        .spacing(12)
        .into()
    });

    column(rows).spacing(12).into()
}

fn footer_links<'a>(fs: f32, theme: &Theme) -> Element<'a, Message> {
    let muted = muted_color(theme);

    let group = |heading: &'a str, links: &'a [&'a str]| -> Element<'a, Message> {
        let items = links
            .iter()
            .map(|&link| text(link).size(scaled(12.0, fs)).color(muted).into());
        column![
            text(heading).size(scaled(14.0, fs)).font(Font {
                weight: iced::font::Weight::Semibold,
                ..Font::DEFAULT
            }),
            Space::new().height(6),
            column(items).spacing(4),
        ]
        .width(Length::FillPortion(1))
        .into()
    };

    let groups = row(FOOTER_GROUPS
        .iter()
        .map(|&(heading, links)| group(heading, links)))
    .spacing(16);

    let social = row![text("Follow us on :").size(scaled(13.0, fs))]
        .extend(
            SOCIAL
                .iter()
                .map(|&name| text(name).size(scaled(12.0, fs)).color(muted).into()),
        )
        .spacing(12)
        .align_y(iced::Alignment::Center);

    column![groups, Space::new().height(16), social]
        .width(Length::Fill)
        .into()
}

fn feedback_form<'a>(
    fs: f32,
    form: &FeedbackForm,
    send_hovered: bool,
    theme: &Theme,
) -> Element<'a, Message> {
    let send = primary_button(
        move || text("Send Feedback").size(scaled(14.0, fs)).into(),
        form.can_submit().then_some(Message::SubmitFeedback),
        send_hovered,
        |h| Message::Hover(HoverTarget::SendFeedback, h),
        [8, 20],
        Length::Shrink,
    );

    let mut body = column![
        text("Share Your Experience")
            .size(scaled(18.0, fs))
            .font(Font {
                weight: iced::font::Weight::Bold,
                ..Font::DEFAULT
            }),
        Space::new().height(10),
        text_input("Your email", &form.email)
            .on_input(Message::FeedbackEmailChanged)
            .size(scaled(14.0, fs))
            .padding([8, 10]),
        Space::new().height(8),
        text_input("Your message", &form.message)
            .on_input(Message::FeedbackMessageChanged)
            .on_submit(Message::SubmitFeedback)
            .size(scaled(14.0, fs))
            .padding([8, 10]),
        Space::new().height(12),
        send,
    ]
    .max_width(scaled(480.0, fs))
    .align_x(iced::Alignment::Center);

    if let Some(thanks) = form.thanks() {
        body = body.push(Space::new().height(10)).push(
            text(thanks)
                .size(scaled(13.0, fs))
                .color(theme.palette().success),
        );
    }

    body.into()
}
