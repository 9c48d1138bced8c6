//! Color value type, parsing, and HSL-based derivations.
//!
//! [`Color`] keeps its channels as floating point so chained derivations such
//! as `lighten(50).saturate(30)` round only once, at serialization time.
//! Every constructor and derivation clamps, so a `Color` is always valid.
//!
//! # Accepted input
//!
//! | Form | Example |
//! |------|---------|
//! | short hex | `#fff`, `fff`, `#ffff` |
//! | long hex | `#5469d4`, `#5469d4c7` |
//! | functional | `rgb(84, 105, 212)`, `rgba(84, 105, 212, 0.5)`, `rgb(100%, 0%, 0%)` |

use std::fmt;
use std::str::FromStr;

use crate::contrast;
use crate::error::{ColorError, Result};

/// Perceived brightness below which a color reads as dark.
///
/// Brightness uses the `(299 R + 587 G + 114 B) / 1000` weighting on 8-bit
/// channels, so the midpoint of its `0..=255` range is the cutoff.
pub const DARK_BRIGHTNESS_THRESHOLD: f64 = 128.0;

/// Binary light/dark classification of a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Tone {
    Light,
    Dark,
}

impl Tone {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hue, saturation, lightness, each normalized to `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    #[must_use]
    fn clamped(self) -> Self {
        Self {
            h: self.h.rem_euclid(1.0),
            s: self.s.clamp(0.0, 1.0),
            l: self.l.clamp(0.0, 1.0),
        }
    }
}

/// An immutable RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color from 8-bit channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        }
    }

    /// Color from 8-bit channels and an alpha in `0.0..=1.0` (clamped).
    #[must_use]
    pub fn rgba(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self::rgb(r, g, b).with_alpha(alpha)
    }

    fn from_channels(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
            a: clamp_alpha(a),
        }
    }

    /// Parse a hex or `rgb()`/`rgba()` color string.
    ///
    /// # Errors
    ///
    /// [`ColorError::Empty`] for blank input and
    /// [`ColorError::InvalidColorFormat`] for anything unrecognized.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ColorError::Empty);
        }
        let lower = trimmed.to_ascii_lowercase();

        if let Some(args) =
            functional_args(&lower, "rgba").or_else(|| functional_args(&lower, "rgb"))
        {
            return parse_rgb_function(args).ok_or_else(|| ColorError::invalid(trimmed));
        }

        let hex = lower.strip_prefix('#').unwrap_or(&lower);
        parse_hex(hex).ok_or_else(|| ColorError::invalid(trimmed))
    }

    /// Red channel rounded to 8 bits.
    #[must_use]
    pub fn red(self) -> u8 {
        round_channel(self.r)
    }

    /// Green channel rounded to 8 bits.
    #[must_use]
    pub fn green(self) -> u8 {
        round_channel(self.g)
    }

    /// Blue channel rounded to 8 bits.
    #[must_use]
    pub fn blue(self) -> u8 {
        round_channel(self.b)
    }

    #[must_use]
    pub fn alpha(self) -> f64 {
        self.a
    }

    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }

    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        let r = self.r / 255.0;
        let g = self.g / 255.0;
        let b = self.b / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;

        if d <= f64::EPSILON {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl { h: h / 6.0, s, l }
    }

    #[must_use]
    pub fn from_hsl(hsl: Hsl, alpha: f64) -> Self {
        let Hsl { h, s, l } = hsl.clamped();
        let (r, g, b) = if s <= 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;
            (
                hue_to_rgb(p, q, h + 1.0 / 3.0),
                hue_to_rgb(p, q, h),
                hue_to_rgb(p, q, h - 1.0 / 3.0),
            )
        };
        Self::from_channels(r * 255.0, g * 255.0, b * 255.0, alpha)
    }

    /// Raise HSL lightness by `amount` percentage points.
    #[must_use]
    pub fn lighten(self, amount: f64) -> Self {
        self.map_hsl(|hsl| hsl.l += amount / 100.0)
    }

    /// Lower HSL lightness by `amount` percentage points.
    #[must_use]
    pub fn darken(self, amount: f64) -> Self {
        self.map_hsl(|hsl| hsl.l -= amount / 100.0)
    }

    /// Raise HSL saturation by `amount` percentage points.
    #[must_use]
    pub fn saturate(self, amount: f64) -> Self {
        self.map_hsl(|hsl| hsl.s += amount / 100.0)
    }

    fn map_hsl(self, f: impl FnOnce(&mut Hsl)) -> Self {
        let mut hsl = self.to_hsl();
        f(&mut hsl);
        Self::from_hsl(hsl, self.a)
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: clamp_alpha(alpha),
            ..self
        }
    }

    /// `#rrggbb`, lowercase. Alpha is dropped.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red(), self.green(), self.blue())
    }

    /// `#rrggbbaa`, lowercase, alpha byte is `round(alpha * 255)`.
    #[must_use]
    pub fn to_hex8(self) -> String {
        format!("{}{:02x}", self.to_hex(), self.alpha_byte())
    }

    #[must_use]
    pub fn alpha_byte(self) -> u8 {
        (self.a * 255.0).round() as u8
    }

    /// `rgb(r, g, b)` when opaque, otherwise `rgba(r, g, b, a)`.
    #[must_use]
    pub fn to_rgb_string(self) -> String {
        if self.is_opaque() {
            format!("rgb({}, {}, {})", self.red(), self.green(), self.blue())
        } else {
            let alpha = (self.a * 100.0).round() / 100.0;
            format!(
                "rgba({}, {}, {}, {alpha})",
                self.red(),
                self.green(),
                self.blue()
            )
        }
    }

    /// Perceived brightness in `0.0..=255.0`.
    #[must_use]
    pub fn brightness(self) -> f64 {
        let r = f64::from(self.red());
        let g = f64::from(self.green());
        let b = f64::from(self.blue());
        (r * 299.0 + g * 587.0 + b * 114.0) / 1000.0
    }

    #[must_use]
    pub fn relative_luminance(self) -> f64 {
        contrast::relative_luminance(self)
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self.brightness() < DARK_BRIGHTNESS_THRESHOLD
    }

    #[must_use]
    pub fn is_light(self) -> bool {
        !self.is_dark()
    }

    #[must_use]
    pub fn tone(self) -> Tone {
        if self.is_dark() { Tone::Dark } else { Tone::Light }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            f.write_str(&self.to_hex())
        } else {
            f.write_str(&self.to_hex8())
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

fn clamp_channel(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 255.0)
    }
}

fn clamp_alpha(value: f64) -> f64 {
    if value.is_nan() {
        1.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn round_channel(value: f64) -> u8 {
    clamp_channel(value).round() as u8
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn functional_args<'a>(input: &'a str, name: &str) -> Option<&'a str> {
    input
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_rgb_function(args: &str) -> Option<Color> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    match parts.as_slice() {
        [r, g, b] => Some(Color::from_channels(
            parse_channel(r)?,
            parse_channel(g)?,
            parse_channel(b)?,
            1.0,
        )),
        [r, g, b, a] => Some(Color::from_channels(
            parse_channel(r)?,
            parse_channel(g)?,
            parse_channel(b)?,
            parse_alpha(a)?,
        )),
        _ => None,
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_channel(raw: &str) -> Option<f64> {
    match raw.strip_suffix('%') {
        Some(percent) => parse_number(percent).map(|p| p.clamp(0.0, 100.0) * 2.55),
        None => parse_number(raw),
    }
}

fn parse_alpha(raw: &str) -> Option<f64> {
    match raw.strip_suffix('%') {
        Some(percent) => parse_number(percent).map(|p| p / 100.0),
        None => parse_number(raw),
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    // Safe to slice by byte: every byte is an ASCII hex digit.
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Color::rgba(
            nibble(0)?,
            nibble(1)?,
            nibble(2)?,
            f64::from(nibble(3)?) / 255.0,
        )),
        6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color::rgba(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            f64::from(byte(6)?) / 255.0,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(input: &str) -> String {
        Color::parse(input).expect("valid color").to_hex()
    }

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(hex("#5469d4"), "#5469d4");
        assert_eq!(hex("5469D4"), "#5469d4");
        assert_eq!(hex("#fff"), "#ffffff");
        assert_eq!(hex("  #ABC  "), "#aabbcc");
    }

    #[test]
    fn parses_hex_with_alpha() {
        let color = Color::parse("#11223380").unwrap();
        assert_eq!(color.to_hex(), "#112233");
        assert_eq!(color.alpha_byte(), 0x80);
        assert!(!color.is_opaque());

        let short = Color::parse("#fff0").unwrap();
        assert_eq!(short.alpha(), 0.0);
    }

    #[test]
    fn parses_rgb_functions() {
        assert_eq!(hex("rgb(84, 105, 212)"), "#5469d4");
        assert_eq!(hex("RGB(84 105 212)"), "#5469d4");
        assert_eq!(hex("rgb(100%, 0%, 0%)"), "#ff0000");
        let translucent = Color::parse("rgba(0, 0, 0, 0.5)").unwrap();
        assert_eq!(translucent.alpha(), 0.5);
    }

    #[test]
    fn out_of_range_rgb_channels_clamp() {
        assert_eq!(hex("rgb(300, -4, 12)"), "#ff000c");
        assert_eq!(Color::parse("rgba(1, 2, 3, 7)").unwrap().alpha(), 1.0);
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(Color::parse(""), Err(ColorError::Empty));
        assert_eq!(Color::parse("   "), Err(ColorError::Empty));
        for bad in ["#", "#12", "#12345", "#ggg", "blue-ish", "rgb(1, 2)", "rgb(a, b, c)", "rgb(1,2,3"] {
            assert!(
                matches!(Color::parse(bad), Err(ColorError::InvalidColorFormat { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_finite_numbers() {
        assert!(Color::parse("rgb(inf, 0, 0)").is_err());
        assert!(Color::parse("rgb(NaN, 0, 0)").is_err());
    }

    #[test]
    fn hsl_round_trip_preserves_hex() {
        for input in ["#5469d4", "#ff3b5b", "#111827", "#fafafa", "#808080", "#00ff00"] {
            let color = Color::parse(input).unwrap();
            let back = Color::from_hsl(color.to_hsl(), 1.0);
            assert_eq!(back.to_hex(), input);
        }
    }

    #[test]
    fn gray_has_zero_saturation() {
        let hsl = Color::rgb(128, 128, 128).to_hsl();
        assert_eq!(hsl.s, 0.0);
        assert_eq!(hsl.h, 0.0);
    }

    #[test]
    fn lighten_and_darken_clamp_at_bounds() {
        let base = Color::parse("#5469d4").unwrap();
        assert_eq!(base.lighten(100.0).to_hex(), "#ffffff");
        assert_eq!(base.darken(100.0).to_hex(), "#000000");
        assert_eq!(Color::WHITE.lighten(10.0).to_hex(), "#ffffff");
        assert_eq!(Color::BLACK.darken(10.0).to_hex(), "#000000");
    }

    #[test]
    fn lighten_moves_lightness_by_points() {
        let base = Color::parse("#808080").unwrap();
        let lighter = base.lighten(10.0);
        let delta = lighter.to_hsl().l - base.to_hsl().l;
        assert!((delta - 0.10).abs() < 0.005, "delta was {delta}");
    }

    #[test]
    fn saturate_caps_at_full_saturation() {
        let base = Color::parse("#5469d4").unwrap();
        let saturated = base.saturate(500.0);
        assert!((saturated.to_hsl().s - 1.0).abs() < 1e-9);
        assert_eq!(Color::rgb(120, 120, 120).saturate(0.0).to_hex(), "#787878");
    }

    #[test]
    fn derivations_keep_alpha() {
        let base = Color::rgba(10, 20, 30, 0.25);
        assert_eq!(base.lighten(10.0).alpha(), 0.25);
        assert_eq!(base.saturate(10.0).alpha(), 0.25);
    }

    #[test]
    fn with_alpha_clamps() {
        assert_eq!(Color::WHITE.with_alpha(2.0).alpha(), 1.0);
        assert_eq!(Color::WHITE.with_alpha(-1.0).alpha(), 0.0);
    }

    #[test]
    fn hex8_uses_rounded_alpha_byte() {
        let secondary = Color::BLACK.with_alpha(0.78);
        assert_eq!(secondary.to_hex8(), "#000000c7");
    }

    #[test]
    fn rgb_string_switches_on_alpha() {
        assert_eq!(Color::rgb(84, 105, 212).to_rgb_string(), "rgb(84, 105, 212)");
        assert_eq!(
            Color::rgba(84, 105, 212, 0.5).to_rgb_string(),
            "rgba(84, 105, 212, 0.5)"
        );
    }

    #[test]
    fn display_uses_hex8_only_when_translucent() {
        assert_eq!(Color::WHITE.to_string(), "#ffffff");
        assert_eq!(Color::rgba(255, 255, 255, 0.0).to_string(), "#ffffff00");
    }

    #[test]
    fn brightness_classification() {
        assert!(Color::BLACK.is_dark());
        assert!(Color::WHITE.is_light());
        assert!(Color::parse("#111827").unwrap().is_dark());
        assert!(Color::parse("#fafafa").unwrap().is_light());
        // brightness 127.0 vs 128.0 straddles the cutoff
        assert!(Color::rgb(127, 127, 127).is_dark());
        assert!(Color::rgb(128, 128, 128).is_light());
    }

    #[test]
    fn tone_matches_predicates() {
        assert_eq!(Color::BLACK.tone(), Tone::Dark);
        assert_eq!(Color::WHITE.tone(), Tone::Light);
        assert_eq!(Tone::Dark.to_string(), "dark");
    }
}
