use std::time::Duration;

use iced::border::Border;
use iced::widget::{button, mouse_area};
use iced::{Color, Element, Length, Theme};
use iced_anim::transition::Easing;
use iced_anim::AnimationBuilder;

use crate::theme::{border_color, muted_color, surface_color};

const CORNER_RADIUS: f32 = 8.0;
const CORNER_RADIUS_PILL: f32 = 100.0;
const ANIMATION_DURATION: Duration = Duration::from_millis(180);

/// Outlined button on the surface color; the border picks up the accent on hover.
pub fn secondary_button<'a, Message: Clone + 'a>(
    content: impl Fn() -> Element<'a, Message> + 'a,
    on_press: Message,
    hovered: bool,
    on_hover: impl Fn(bool) -> Message + 'a,
    padding: [u16; 2],
    width: Length,
) -> Element<'a, Message> {
    secondary_button_inner(content, on_press, hovered, on_hover, padding, width, CORNER_RADIUS)
}

/// Round variant used for the close cross on the result card.
pub fn secondary_button_pill<'a, Message: Clone + 'a>(
    content: impl Fn() -> Element<'a, Message> + 'a,
    on_press: Message,
    hovered: bool,
    on_hover: impl Fn(bool) -> Message + 'a,
    padding: [u16; 2],
) -> Element<'a, Message> {
    secondary_button_inner(
        content,
        on_press,
        hovered,
        on_hover,
        padding,
        Length::Shrink,
        CORNER_RADIUS_PILL,
    )
}

fn secondary_button_inner<'a, Message: Clone + 'a>(
    content: impl Fn() -> Element<'a, Message> + 'a,
    on_press: Message,
    hovered: bool,
    on_hover: impl Fn(bool) -> Message + 'a,
    padding: [u16; 2],
    width: Length,
    radius: f32,
) -> Element<'a, Message> {
    let target = if hovered { 1.0_f32 } else { 0.0 };

    let animated: Element<'a, Message> = AnimationBuilder::new(target, move |t: f32| {
        let t = t.clamp(0.0, 1.0);
        button(content())
            .on_press(on_press.clone())
            .padding(padding)
            .width(width)
            .style(move |theme: &Theme, status: button::Status| {
                let amount = if status == button::Status::Pressed {
                    1.0
                } else {
                    t
                };
                styled(theme, radius, amount)
            })
            .into()
    })
    .animation(Easing::EASE_OUT.with_duration(ANIMATION_DURATION))
    .into();

    mouse_area(animated)
        .on_enter(on_hover(true))
        .on_exit(on_hover(false))
        .into()
}

fn styled(theme: &Theme, radius: f32, hover_amount: f32) -> button::Style {
    let accent = theme.palette().primary;
    let surface = surface_color(theme);
    let tint = Color { a: 0.12, ..accent };

    button::Style {
        background: Some(lerp_color(surface, blend(surface, tint), hover_amount).into()),
        text_color: lerp_color(muted_color(theme), theme.palette().text, hover_amount),
        border: Border {
            color: lerp_color(border_color(theme), accent, hover_amount),
            width: 1.0,
            radius: radius.into(),
        },
        ..button::Style::default()
    }
}

/// Composite a translucent overlay onto an opaque base.
fn blend(base: Color, overlay: Color) -> Color {
    let a = overlay.a;
    Color {
        r: base.r * (1.0 - a) + overlay.r * a,
        g: base.g * (1.0 - a) + overlay.g * a,
        b: base.b * (1.0 - a) + overlay.b * a,
        a: 1.0,
    }
}

fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    Color {
        r: a.r + (b.r - a.r) * t,
        g: a.g + (b.g - a.g) * t,
        b: a.b + (b.b - a.b) * t,
        a: a.a + (b.a - a.a) * t,
    }
}
