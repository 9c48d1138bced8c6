//! Tonal palette generation.
//!
//! A [`Palette`] is the fixed 14-shade derivation of one base color, in the
//! Material naming scheme (`50` through `900`, plus accents `A100`..`A700`).
//! Generation is a pure function of the base color.
//!
//! # Example
//!
//! ```
//! use tint_style::{ContrastColor, Palette, Shade};
//!
//! let palette = Palette::from_hex("#5469d4").unwrap();
//! assert_eq!(palette.get(Shade::S500).hex, "#5469d4");
//! assert_eq!(palette.get(Shade::S50).contrast, ContrastColor::NearBlack);
//! ```

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::color::Color;
use crate::contrast::{ContrastColor, contrast_color};
use crate::error::Result;

/// One named tonal variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shade {
    S50,
    S100,
    S200,
    S300,
    S400,
    S500,
    S600,
    S700,
    S800,
    S900,
    A100,
    A200,
    A400,
    A700,
}

impl Shade {
    /// Every shade, in palette order.
    pub const ALL: [Shade; 14] = [
        Shade::S50,
        Shade::S100,
        Shade::S200,
        Shade::S300,
        Shade::S400,
        Shade::S500,
        Shade::S600,
        Shade::S700,
        Shade::S800,
        Shade::S900,
        Shade::A100,
        Shade::A200,
        Shade::A400,
        Shade::A700,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            Shade::S50 => "50",
            Shade::S100 => "100",
            Shade::S200 => "200",
            Shade::S300 => "300",
            Shade::S400 => "400",
            Shade::S500 => "500",
            Shade::S600 => "600",
            Shade::S700 => "700",
            Shade::S800 => "800",
            Shade::S900 => "900",
            Shade::A100 => "A100",
            Shade::A200 => "A200",
            Shade::A400 => "A400",
            Shade::A700 => "A700",
        }
    }

    pub const fn is_accent(self) -> bool {
        matches!(self, Shade::A100 | Shade::A200 | Shade::A400 | Shade::A700)
    }

    /// How this shade is derived from the base color.
    pub const fn recipe(self) -> Recipe {
        match self {
            Shade::S50 => Recipe::Lighten(52.0),
            Shade::S100 => Recipe::Lighten(37.0),
            Shade::S200 => Recipe::Lighten(26.0),
            Shade::S300 => Recipe::Lighten(12.0),
            Shade::S400 => Recipe::Lighten(6.0),
            Shade::S500 => Recipe::Base,
            Shade::S600 => Recipe::Darken(6.0),
            Shade::S700 => Recipe::Darken(12.0),
            Shade::S800 => Recipe::Darken(18.0),
            Shade::S900 => Recipe::Darken(24.0),
            Shade::A100 => Recipe::Accent {
                lighten: 50.0,
                saturate: 30.0,
            },
            Shade::A200 => Recipe::Accent {
                lighten: 30.0,
                saturate: 30.0,
            },
            Shade::A400 => Recipe::Accent {
                lighten: 10.0,
                saturate: 15.0,
            },
            Shade::A700 => Recipe::Accent {
                lighten: 5.0,
                saturate: 5.0,
            },
        }
    }
}

impl fmt::Display for Shade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseShadeError(String);

impl fmt::Display for ParseShadeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown shade label {:?}", self.0)
    }
}

impl std::error::Error for ParseShadeError {}

impl FromStr for Shade {
    type Err = ParseShadeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        Shade::ALL
            .into_iter()
            .find(|shade| shade.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseShadeError(wanted.to_string()))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Shade {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Derivation applied to the base color. Amounts are percentage points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recipe {
    Base,
    Lighten(f64),
    Darken(f64),
    /// Lighten, then saturate.
    Accent { lighten: f64, saturate: f64 },
}

impl Recipe {
    #[must_use]
    pub fn apply(self, base: Color) -> Color {
        match self {
            Recipe::Base => base,
            Recipe::Lighten(amount) => base.lighten(amount),
            Recipe::Darken(amount) => base.darken(amount),
            Recipe::Accent { lighten, saturate } => base.lighten(lighten).saturate(saturate),
        }
    }
}

/// A named shade with its serializations and overlay color.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PaletteEntry {
    #[cfg_attr(feature = "serde", serde(rename = "name"))]
    pub shade: Shade,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub color: Color,
    pub hex: String,
    pub rgb: String,
    #[cfg_attr(feature = "serde", serde(rename = "contrastColor"))]
    pub contrast: ContrastColor,
}

impl PaletteEntry {
    fn derive(base: Color, shade: Shade) -> Self {
        let color = shade.recipe().apply(base);
        let hex = color.to_hex();
        // Contrast is judged on the serialized hex, which drops alpha.
        let contrast = contrast_color(Color::rgb(color.red(), color.green(), color.blue()));
        Self {
            shade,
            color,
            rgb: color.to_rgb_string(),
            hex,
            contrast,
        }
    }
}

/// The 14 tonal variants of one base color, in [`Shade::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Palette {
    entries: [PaletteEntry; 14],
}

impl Palette {
    #[must_use]
    pub fn generate(base: Color) -> Self {
        let entries = Shade::ALL.map(|shade| PaletteEntry::derive(base, shade));
        trace!(base = %base, "palette generated");
        Self { entries }
    }

    /// Parse `input` and generate its palette.
    ///
    /// # Errors
    ///
    /// Fails when `input` is not a valid color string.
    pub fn from_hex(input: &str) -> Result<Self> {
        Ok(Self::generate(Color::parse(input)?))
    }

    #[must_use]
    pub fn get(&self, shade: Shade) -> &PaletteEntry {
        &self.entries[shade.index()]
    }

    /// The unmodified base color (shade `500`).
    #[must_use]
    pub fn base(&self) -> &PaletteEntry {
        self.get(Shade::S500)
    }

    #[must_use]
    pub fn entries(&self) -> &[PaletteEntry; 14] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PaletteEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a PaletteEntry;
    type IntoIter = std::slice::Iter<'a, PaletteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
