#![forbid(unsafe_code)]

//! Stateful theming: the active mode, applied colors, and persistence.
//!
//! # Role in tint
//! `tint-runtime` turns the pure color math of `tint-style` into a running
//! theme. [`ThemeContext`] owns the current [`ThemeMode`](tint_style::ThemeMode),
//! notifies subscribers on every mode change, writes palettes and text
//! colors to a [`StyleSurface`], and persists the mode through a
//! [`PreferenceStore`].
//!
//! # How it fits in the system
//! `tint-cli` builds a context from [`RuntimeConfig::from_env`], applies a
//! [`BrandingPolicy`] or individual colors, and prints the surface.

pub mod config;
pub mod context;
pub mod error;
pub mod observable;
pub mod policy;
pub mod storage;
pub mod surface;

pub use config::{ModeColors, RuntimeConfig, STORE_PATH_ENV, ThemeDefaults};
pub use context::{Applied, SECONDARY_TEXT_ALPHA, ThemeContext};
pub use error::StoreError;
pub use observable::{Observable, Subscription};
pub use policy::{BrandingPolicy, Fallback, PolicyReport};
pub use storage::{FileStore, MemoryStore, PreferenceStore, THEME_KEY};
pub use surface::{
    InMemoryStyleSurface, StyleSurface, contrast_key, secondary_text_key, shade_key, text_key,
};
