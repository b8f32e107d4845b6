use iced::widget::{column, container, image, mouse_area, text, Space};
use iced::{mouse, Border, Color, ContentFit, Element, Font, Length, Theme};

use deepshield_core::client::media_selection::{MediaSlot, Preview, SelectedMedia};

use crate::app::{scaled, HoverTarget, Message};
use crate::theme::{muted_color, tertiary_color};
use crate::widgets::dashed_container::dashed_container;
use crate::widgets::file_row::file_row;

const PREVIEW_HEIGHT: f32 = 200.0;

/// One upload slot: title, clickable dashed preview area and, once a file
/// is chosen, a row naming it.
pub fn media_box<'a>(
    fs: f32,
    slot: MediaSlot,
    media: Option<&SelectedMedia>,
    is_hovered: impl Fn(HoverTarget) -> bool,
    theme: &Theme,
) -> Element<'a, Message> {
    let title = text(slot.title())
        .size(scaled(16.0, fs))
        .font(Font {
            weight: iced::font::Weight::Semibold,
            ..Font::DEFAULT
        });

    let inner: Element<'a, Message> = match media.map(|m| &m.preview) {
        None => placeholder(fs, theme),
        Some(Preview::Image(path)) => image(image::Handle::from_path(path))
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .border_radius(8.0)
            .into(),
        Some(Preview::Video(_)) => {
            video_placeholder(fs, media.map(|m| m.display_name()).unwrap_or_default(), theme)
        }
    };

    let drop_area = dashed_container(inner)
        .hovered(is_hovered(HoverTarget::Upload(slot)))
        .padding(12)
        .height(scaled(PREVIEW_HEIGHT, fs));

    let clickable = mouse_area(drop_area)
        .on_press(Message::PickMedia(slot))
        .on_enter(Message::Hover(HoverTarget::Upload(slot), true))
        .on_exit(Message::Hover(HoverTarget::Upload(slot), false))
        .interaction(mouse::Interaction::Pointer);

    let mut body = column![title, Space::new().height(10), clickable].width(Length::Fill);

    if let Some(media) = media {
        body = body.push(Space::new().height(10)).push(file_row(
            fs,
            media,
            Message::PickMedia(slot),
            is_hovered(HoverTarget::Change(slot)),
            move |h| Message::Hover(HoverTarget::Change(slot), h),
            theme,
        ));
    }

    body.into()
}

fn placeholder<'a>(fs: f32, theme: &Theme) -> Element<'a, Message> {
    let accent = theme.palette().primary;
    let tertiary = tertiary_color(theme);

    let icon = container(text("\u{2B06}").size(scaled(20.0, fs)))
        .width(scaled(48.0, fs))
        .height(scaled(48.0, fs))
        .center_x(Length::Shrink)
        .center_y(Length::Shrink)
        .style(move |_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(Color { a: 0.12, ..accent })),
            border: Border {
                radius: 100.0.into(),
                ..Border::default()
            },
            text_color: Some(accent),
            ..container::Style::default()
        });

    column![
        icon,
        Space::new().height(12),
        text("Click to upload").size(scaled(15.0, fs)),
        Space::new().height(4),
        text("JPG, PNG, MP4, MOV, AVI")
            .size(scaled(12.0, fs))
            .color(tertiary),
    ]
    .align_x(iced::Alignment::Center)
    .into()
}

fn video_placeholder<'a>(fs: f32, name: String, theme: &Theme) -> Element<'a, Message> {
    let muted = muted_color(theme);
    let tertiary = tertiary_color(theme);

    column![
        text("\u{1F3AC}").size(scaled(32.0, fs)),
        Space::new().height(10),
        text(name).size(scaled(14.0, fs)).color(muted),
        Space::new().height(4),
        text("Video selected").size(scaled(12.0, fs)).color(tertiary),
    ]
    .align_x(iced::Alignment::Center)
    .into()
}
