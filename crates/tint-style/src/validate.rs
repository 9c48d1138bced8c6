//! Suitability checks for externally supplied background and text colors.
//!
//! A dark-mode background must itself read as dark, while dark-mode text must
//! read as light (it sits on that background). Light mode is the mirror image.
//! Primary and warn colors are never rejected on tone.

use std::fmt;

use crate::color::{Color, Tone};
use crate::error::ColorError;
use crate::theme::{Role, ThemeMode};

pub fn is_suitable_dark_background(color: Color) -> bool {
    color.is_dark()
}

pub fn is_suitable_light_background(color: Color) -> bool {
    color.is_light()
}

pub fn is_suitable_dark_text(color: Color) -> bool {
    color.is_light()
}

pub fn is_suitable_light_text(color: Color) -> bool {
    color.is_dark()
}

/// Tone a color must have to serve `role` in `mode`, if any.
#[must_use]
pub const fn required_tone(role: Role, mode: ThemeMode) -> Option<Tone> {
    match (role, mode) {
        (Role::Background, ThemeMode::Dark) | (Role::Text, ThemeMode::Light) => Some(Tone::Dark),
        (Role::Background, ThemeMode::Light) | (Role::Text, ThemeMode::Dark) => Some(Tone::Light),
        (Role::Primary | Role::Warn, _) => None,
    }
}

pub fn is_suitable(role: Role, color: Color, mode: ThemeMode) -> bool {
    match (role, mode) {
        (Role::Background, ThemeMode::Dark) => is_suitable_dark_background(color),
        (Role::Background, ThemeMode::Light) => is_suitable_light_background(color),
        (Role::Text, ThemeMode::Dark) => is_suitable_dark_text(color),
        (Role::Text, ThemeMode::Light) => is_suitable_light_text(color),
        (Role::Primary | Role::Warn, _) => true,
    }
}

/// Why a supplied color was not used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Nothing supplied, or only whitespace.
    Missing,
    Malformed(ColorError),
    /// Parsed fine but has the wrong tone for the role and mode.
    WrongTone { found: Tone, required: Tone },
}

impl Rejection {
    /// `Missing` is the normal "no override" case and not worth reporting.
    #[must_use]
    pub fn is_diagnostic(&self) -> bool {
        !matches!(self, Self::Missing)
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("no color supplied"),
            Self::Malformed(error) => write!(f, "{error}"),
            Self::WrongTone { found, required } => {
                write!(f, "color is {found}, expected {required}")
            }
        }
    }
}

/// Parse and tone-check a raw color for `role` in `mode`.
///
/// # Errors
///
/// Returns the [`Rejection`] that disqualifies the input.
pub fn screen(role: Role, raw: Option<&str>, mode: ThemeMode) -> Result<Color, Rejection> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Err(Rejection::Missing),
        Some(raw) => raw,
    };
    let color = Color::parse(raw).map_err(Rejection::Malformed)?;
    match required_tone(role, mode) {
        Some(required) if !is_suitable(role, color, mode) => Err(Rejection::WrongTone {
            found: color.tone(),
            required,
        }),
        _ => Ok(color),
    }
}
