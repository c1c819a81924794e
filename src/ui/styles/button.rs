// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    border, opacity,
    palette::{self, BLACK, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Shadow, Theme};

/// Main action (retry, subject in use).
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => palette::PRIMARY_400,
        button::Status::Disabled => palette::GRAY_400,
        button::Status::Active | button::Status::Pressed => palette::PRIMARY_500,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: WHITE,
        border: Border {
            color: palette::PRIMARY_700,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        shadow: if status == button::Status::Hovered {
            shadow::MD
        } else {
            shadow::SM
        },
        snap: true,
    }
}

/// Secondary button that adapts to the light/dark theme.
pub fn secondary(theme: &Theme, status: button::Status) -> button::Style {
    let is_light = !theme.extended_palette().is_dark;
    let (background, text_color) = match (is_light, status) {
        (_, button::Status::Disabled) => (
            if is_light { palette::GRAY_100 } else { palette::GRAY_700 },
            palette::GRAY_400,
        ),
        (true, button::Status::Hovered) => (palette::GRAY_200, palette::GRAY_900),
        (true, _) => (palette::GRAY_100, palette::GRAY_900),
        (false, button::Status::Hovered) => (Color::from_rgb(0.35, 0.35, 0.35), WHITE),
        (false, _) => (palette::GRAY_700, WHITE),
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: if status == button::Status::Hovered {
                palette::PRIMARY_500
            } else {
                palette::GRAY_400
            },
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        shadow: Shadow::default(),
        snap: true,
    }
}

/// Picks [`primary`] or [`secondary`] for toggle groups.
pub fn toggle(selected: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        if selected {
            primary(theme, status)
        } else {
            secondary(theme, status)
        }
    }
}

/// Removable filter chip.
pub fn chip(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().primary.weak;
    let alpha = match status {
        button::Status::Hovered | button::Status::Pressed => opacity::OPAQUE,
        _ => opacity::OVERLAY_STRONG,
    };
    button::Style {
        background: Some(Background::Color(Color { a: alpha, ..base.color })),
        text_color: base.text,
        border: Border {
            radius: radius::FULL.into(),
            ..Border::default()
        },
        shadow: Shadow::default(),
        snap: true,
    }
}

/// Variant card; the selected card gets a brand outline.
pub fn card(selected: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        let background = theme.extended_palette().background.weak.color;
        let outline = if selected {
            palette::PRIMARY_500
        } else if status == button::Status::Hovered {
            palette::PRIMARY_200
        } else {
            Color::TRANSPARENT
        };

        button::Style {
            background: Some(Background::Color(background)),
            text_color: theme.extended_palette().background.base.text,
            border: Border {
                color: outline,
                width: border::WIDTH_MD,
                radius: radius::LG.into(),
            },
            shadow: if status == button::Status::Hovered {
                shadow::MD
            } else {
                shadow::SM
            },
            snap: true,
        }
    }
}

/// Semi-transparent control drawn over the turntable image.
pub fn overlay(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = match status {
        button::Status::Hovered => opacity::OVERLAY_STRONG,
        button::Status::Pressed => opacity::OPAQUE,
        _ => opacity::OVERLAY_MEDIUM,
    };

    button::Style {
        background: Some(Background::Color(Color { a: alpha, ..BLACK })),
        text_color: WHITE,
        border: Border {
            radius: radius::FULL.into(),
            ..Border::default()
        },
        shadow: shadow::MD,
        snap: true,
    }
}
