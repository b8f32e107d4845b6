use iced::color;
use iced::theme::Palette;
use iced::{Color, Theme};

use crate::platform;
use crate::settings::Appearance;

/// Resolve the iced Theme from appearance + high_contrast settings.
pub fn resolve_theme(appearance: Appearance, high_contrast: bool) -> Theme {
    let is_dark = match appearance {
        Appearance::Dark => true,
        Appearance::Light => false,
        Appearance::System => platform::is_dark_mode(),
    };

    let palette = match (is_dark, high_contrast) {
        (true, false) => dark_palette(),
        (false, false) => light_palette(),
        (true, true) => high_contrast_dark_palette(),
        (false, true) => high_contrast_light_palette(),
    };

    Theme::custom("DeepShield", palette)
}

// Indigo accent on a near-black or paper background; red and green carry
// the deepfake verdict.

fn dark_palette() -> Palette {
    Palette {
        background: color!(0x12, 0x12, 0x1a),
        text: color!(0xd6, 0xd6, 0xe0),
        primary: color!(0x7c, 0x6c, 0xf2),
        success: color!(0x3c, 0xc8, 0x7a),
        warning: color!(0xf5, 0xb9, 0x42),
        danger: color!(0xf2, 0x5f, 0x5c),
    }
}

fn light_palette() -> Palette {
    Palette {
        background: color!(0xf6, 0xf5, 0xfa),
        text: color!(0x1e, 0x1b, 0x2e),
        primary: color!(0x5b, 0x4b, 0xdb),
        success: color!(0x1f, 0x9d, 0x5a),
        warning: color!(0xd9, 0x8a, 0x0b),
        danger: color!(0xd6, 0x3a, 0x37),
    }
}

fn high_contrast_dark_palette() -> Palette {
    Palette {
        background: color!(0x00, 0x00, 0x00),
        text: color!(0xff, 0xff, 0xff),
        primary: color!(0xa8, 0x9c, 0xff),
        success: color!(0x4c, 0xe0, 0x8a),
        warning: color!(0xff, 0xd6, 0x0a),
        danger: color!(0xff, 0x5c, 0x57),
    }
}

fn high_contrast_light_palette() -> Palette {
    Palette {
        background: color!(0xff, 0xff, 0xff),
        text: color!(0x00, 0x00, 0x00),
        primary: color!(0x3a, 0x1f, 0xc4),
        success: color!(0x14, 0x7a, 0x3f),
        warning: color!(0x9a, 0x55, 0x00),
        danger: color!(0xb0, 0x00, 0x12),
    }
}

fn is_light(theme: &Theme) -> bool {
    let bg = theme.palette().background;
    bg.r * 0.299 + bg.g * 0.587 + bg.b * 0.114 > 0.5
}

/// Card and input background, one step off the window background.
pub fn surface_color(theme: &Theme) -> Color {
    let bg = theme.palette().background;
    let shift = if is_light(theme) { 0.03 } else { 0.06 };
    let lift = |c: f32| (c + shift).min(1.0);
    Color {
        r: lift(bg.r),
        g: lift(bg.g),
        b: lift(bg.b),
        a: 1.0,
    }
}

/// Secondary text, e.g. labels and placeholders.
pub fn muted_color(theme: &Theme) -> Color {
    Color {
        a: 0.72,
        ..theme.palette().text
    }
}

/// Hints and captions.
pub fn tertiary_color(theme: &Theme) -> Color {
    Color {
        a: 0.5,
        ..theme.palette().text
    }
}

/// Thin outlines around cards and inputs.
pub fn border_color(theme: &Theme) -> Color {
    Color {
        a: 0.15,
        ..theme.palette().text
    }
}
