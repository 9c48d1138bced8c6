//! WCAG relative luminance and contrast utilities.

use std::fmt;

use crate::color::Color;

/// Overlay color written for shades that read better with dark text.
pub const NEAR_BLACK_CSS: &str = "hsla(0,0%,0%,0.87)";
/// Overlay color written for shades that read better with light text.
pub const WHITE_CSS: &str = "#ffffff";

pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of the 8-bit channels, in `0.0..=1.0`.
pub fn relative_luminance(color: Color) -> f64 {
    let r = srgb_to_linear(f64::from(color.red()) / 255.0);
    let g = srgb_to_linear(f64::from(color.green()) / 255.0);
    let b = srgb_to_linear(f64::from(color.blue()) / 255.0);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Contrast ratio in `1.0..=21.0`. Argument order does not matter.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let lum_a = relative_luminance(a);
    let lum_b = relative_luminance(b);
    let lighter = lum_a.max(lum_b);
    let darker = lum_a.min(lum_b);
    (lighter + 0.05) / (darker + 0.05)
}

/// The two overlay colors a palette shade can be paired with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContrastColor {
    /// Black at 87% opacity.
    NearBlack,
    White,
}

impl ContrastColor {
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::NearBlack => NEAR_BLACK_CSS,
            Self::White => WHITE_CSS,
        }
    }
}

impl fmt::Display for ContrastColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ContrastColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_css())
    }
}

/// Overlay color for text drawn on `background`.
///
/// Near-black wins only when its ratio is strictly greater than white's, so
/// an exact tie resolves to white.
pub fn contrast_color(background: Color) -> ContrastColor {
    let on_black = contrast_ratio(Color::BLACK, background);
    let on_white = contrast_ratio(Color::WHITE, background);
    if on_black > on_white {
        ContrastColor::NearBlack
    } else {
        ContrastColor::White
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_to_linear_boundaries() {
        assert!((srgb_to_linear(0.0) - 0.0).abs() < 1e-10);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert!(srgb_to_linear(0.03) < srgb_to_linear(0.04));
    }

    #[test]
    fn luminance_of_black_and_white() {
        assert!(relative_luminance(Color::BLACK) < 0.01);
        assert!(relative_luminance(Color::WHITE) > 0.99);
    }

    #[test]
    fn black_on_white_is_21() {
        let ratio = contrast_ratio(Color::BLACK, Color::WHITE);
        assert!((ratio - 21.0).abs() < 0.01, "got {ratio}");
    }

    #[test]
    fn ratio_is_symmetric() {
        let a = Color::rgb(84, 105, 212);
        let b = Color::rgb(250, 250, 250);
        assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
        assert_eq!(contrast_ratio(a, a), 1.0);
    }

    #[test]
    fn contrast_color_extremes() {
        assert_eq!(contrast_color(Color::WHITE), ContrastColor::NearBlack);
        assert_eq!(contrast_color(Color::BLACK), ContrastColor::White);
        assert_eq!(contrast_color(Color::rgb(0x54, 0x69, 0xd4)), ContrastColor::White);
    }

    #[test]
    fn contrast_css_constants() {
        assert_eq!(ContrastColor::NearBlack.as_css(), "hsla(0,0%,0%,0.87)");
        assert_eq!(ContrastColor::White.to_string(), "#ffffff");
    }
}
