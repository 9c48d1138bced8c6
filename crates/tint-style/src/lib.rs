#![forbid(unsafe_code)]

//! Color primitives, tonal palettes, and theme validation.
//!
//! # Role in tint
//! `tint-style` is the pure half of the console theming engine. It has no
//! state and no I/O: given a color string it produces a [`Palette`], a
//! [`ContrastColor`] per shade, and light/dark suitability verdicts.
//!
//! # This crate provides
//! - [`Color`] with hex/`rgb()` parsing and HSL lighten/darken/saturate.
//! - WCAG [`contrast_ratio`] and the per-shade [`contrast_color`] pick.
//! - [`Palette`] generation over the fixed 14 [`Shade`] labels.
//! - [`validate`] checks gating branding colors per [`ThemeMode`].
//!
//! # How it fits in the system
//! `tint-runtime` owns the mutable theme context and writes what this crate
//! computes into a style surface. `tint-cli` exposes both for inspection.

/// Color value type and HSL derivations.
pub mod color;
/// Luminance, contrast ratio, and overlay color selection.
pub mod contrast;
/// Parse errors.
pub mod error;
/// 14-shade palette generation.
pub mod palette;
/// Theme mode and semantic role vocabulary.
pub mod theme;
/// Background/text suitability checks.
pub mod validate;

pub use color::{Color, DARK_BRIGHTNESS_THRESHOLD, Hsl, Tone};
pub use contrast::{
    ContrastColor, NEAR_BLACK_CSS, WHITE_CSS, contrast_color, contrast_ratio, relative_luminance,
};
pub use error::ColorError;
pub use palette::{Palette, PaletteEntry, ParseShadeError, Recipe, Shade};
pub use theme::{ParseRoleError, ParseThemeModeError, Role, ThemeMode};
pub use validate::Rejection;
