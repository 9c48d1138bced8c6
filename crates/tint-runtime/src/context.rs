//! Theme context: the single owner of the active mode and the applied colors.
//!
//! # Design
//!
//! [`ThemeContext`] is generic over where its output goes ([`StyleSurface`])
//! and where the mode preference lives ([`PreferenceStore`]). It holds the
//! mode in an [`Observable`] so any number of listeners learn about every
//! [`ThemeContext::set_mode`] call, and it remembers the last palette applied
//! per (role, mode) so callers can inspect what was written.
//!
//! Background and text inputs are screened with [`validate::screen`]; a
//! rejected or missing color falls back to the configured default for that
//! mode. Primary and warn colors are only parsed.
//!
//! # Failure Modes
//!
//! - **Preference store unavailable**: reads resolve to dark mode and writes
//!   are dropped. Both are logged at `warn` and never abort a mode change.

use ahash::AHashMap;
use tint_style::{Color, ColorError, Palette, Rejection, Role, ThemeMode, validate};
use tracing::{debug, info, info_span, warn};

use crate::config::ThemeDefaults;
use crate::observable::{Observable, Subscription};
use crate::policy::{BrandingPolicy, Fallback, PolicyReport};
use crate::storage::{MemoryStore, PreferenceStore, THEME_KEY};
use crate::surface::{
    InMemoryStyleSurface, StyleSurface, contrast_key, secondary_text_key, shade_key, text_key,
};

/// Alpha applied to the text color to derive secondary text.
pub const SECONDARY_TEXT_ALPHA: f64 = 0.78;

/// Result of applying a screened background or text color.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub role: Role,
    pub mode: ThemeMode,
    /// The color actually written.
    pub color: Color,
    /// Set when the supplied color was replaced by the default.
    pub rejection: Option<Rejection>,
}

impl Applied {
    #[must_use]
    pub fn used_fallback(&self) -> bool {
        self.rejection.is_some()
    }
}

#[derive(Debug)]
pub struct ThemeContext<S = InMemoryStyleSurface, P = MemoryStore> {
    surface: S,
    store: P,
    mode: Observable<ThemeMode>,
    defaults: ThemeDefaults,
    palettes: AHashMap<(Role, ThemeMode), Palette>,
    text: AHashMap<ThemeMode, Color>,
}

impl ThemeContext {
    /// In-memory surface and store, built-in defaults.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(InMemoryStyleSurface::new(), MemoryStore::new())
    }
}

impl<S: StyleSurface, P: PreferenceStore> ThemeContext<S, P> {
    /// Starts in dark mode with built-in defaults. Nothing is written to the
    /// surface or read from the store until asked.
    pub fn new(surface: S, store: P) -> Self {
        Self {
            surface,
            store,
            mode: Observable::new(ThemeMode::default()),
            defaults: ThemeDefaults::BUILTIN,
            palettes: AHashMap::new(),
            text: AHashMap::new(),
        }
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: ThemeDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use]
    pub fn defaults(&self) -> &ThemeDefaults {
        &self.defaults
    }

    #[must_use]
    pub fn mode(&self) -> ThemeMode {
        self.mode.get()
    }

    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.mode().is_dark()
    }

    /// Number of mode notifications published so far.
    #[must_use]
    pub fn mode_version(&self) -> u64 {
        self.mode.version()
    }

    /// Persist `mode`, then notify every subscriber, even if unchanged.
    pub fn set_mode(&mut self, mode: ThemeMode) {
        if let Err(error) = self.store.set_item(THEME_KEY, mode.storage_value()) {
            warn!(%error, mode = %mode, "could not persist theme preference");
        }
        debug!(mode = %mode, "theme mode set");
        self.mode.publish(mode);
    }

    /// Switch to the other mode and return it.
    pub fn toggle_mode(&mut self) -> ThemeMode {
        let next = self.mode().toggled();
        self.set_mode(next);
        next
    }

    /// Restore the persisted mode. Anything other than `light-theme`,
    /// including nothing, resolves to dark. Subscribers are notified; the
    /// store is not written.
    pub fn resume_from_storage(&mut self) -> ThemeMode {
        let stored = match self.store.get_item(THEME_KEY) {
            Ok(stored) => stored,
            Err(error) => {
                warn!(%error, "could not read theme preference, using dark");
                None
            }
        };
        let mode = stored
            .as_deref()
            .map_or(ThemeMode::Dark, ThemeMode::from_storage_value);
        debug!(stored = ?stored, mode = %mode, "theme mode resumed");
        self.mode.publish(mode);
        mode
    }

    /// Call `callback` with the current mode now and on every later
    /// notification, until the returned guard is dropped.
    pub fn subscribe(&self, callback: impl Fn(ThemeMode) + 'static) -> Subscription {
        callback(self.mode());
        self.mode.subscribe(move |mode| callback(*mode))
    }

    /// Generate and write the primary palette for `mode`.
    ///
    /// # Errors
    ///
    /// Returns the parse error when `color` is not a color; nothing is
    /// written in that case.
    pub fn apply_primary(&mut self, color: &str, mode: ThemeMode) -> Result<&Palette, ColorError> {
        let color = Color::parse(color)?;
        Ok(self.write_palette(Role::Primary, mode, color))
    }

    /// Generate and write the warn palette for `mode`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::apply_primary`].
    pub fn apply_warn(&mut self, color: &str, mode: ThemeMode) -> Result<&Palette, ColorError> {
        let color = Color::parse(color)?;
        Ok(self.write_palette(Role::Warn, mode, color))
    }

    /// Screen `color` for `mode` and write its palette, or the default's.
    pub fn apply_background(&mut self, color: Option<&str>, mode: ThemeMode) -> Applied {
        let (color, rejection) = self.screen_or_default(Role::Background, color, mode);
        self.write_palette(Role::Background, mode, color);
        Applied {
            role: Role::Background,
            mode,
            color,
            rejection,
        }
    }

    /// Screen `color` for `mode` and write it as text plus its secondary
    /// variant, or the default's.
    pub fn apply_text(&mut self, color: Option<&str>, mode: ThemeMode) -> Applied {
        let (color, rejection) = self.screen_or_default(Role::Text, color, mode);
        self.write_text(mode, color);
        Applied {
            role: Role::Text,
            mode,
            color,
            rejection,
        }
    }

    /// Write every role for both modes from the configured defaults.
    pub fn apply_defaults(&mut self) {
        for mode in ThemeMode::ALL {
            let colors = *self.defaults.for_mode(mode);
            for role in Role::PALETTE_ROLES {
                self.write_palette(role, mode, colors.get(role));
            }
            self.write_text(mode, colors.text);
        }
    }

    /// Apply an organization's branding to every role in both modes.
    ///
    /// Missing fields silently use the default. Malformed or wrong-tone
    /// fields also use the default and are listed in the report.
    pub fn apply_policy(&mut self, policy: &BrandingPolicy) -> PolicyReport {
        let mut report = PolicyReport::default();
        for role in Role::ALL {
            for mode in ThemeMode::ALL {
                let supplied = policy.override_for(role, mode);
                let (color, rejection) = self.screen_or_default(role, supplied, mode);
                if let (Some(supplied), Some(rejection)) = (supplied, rejection)
                    && rejection.is_diagnostic()
                {
                    report.fallbacks.push(Fallback {
                        role,
                        mode,
                        supplied: supplied.to_owned(),
                        rejection,
                        used: color.to_hex(),
                    });
                }
                if role.has_palette() {
                    self.write_palette(role, mode, color);
                } else {
                    self.write_text(mode, color);
                }
            }
        }
        info!(fallbacks = report.fallbacks.len(), "branding policy applied");
        report
    }

    /// Last palette written for `role` in `mode`.
    #[must_use]
    pub fn palette(&self, role: Role, mode: ThemeMode) -> Option<&Palette> {
        self.palettes.get(&(role, mode))
    }

    /// Last text color written for `mode`.
    #[must_use]
    pub fn text_color(&self, mode: ThemeMode) -> Option<Color> {
        self.text.get(&mode).copied()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn store(&self) -> &P {
        &self.store
    }

    /// Tear down, returning the surface and store. Live subscriptions stay
    /// valid but will never fire again.
    pub fn into_parts(self) -> (S, P) {
        (self.surface, self.store)
    }

    fn screen_or_default(
        &self,
        role: Role,
        raw: Option<&str>,
        mode: ThemeMode,
    ) -> (Color, Option<Rejection>) {
        match validate::screen(role, raw, mode) {
            Ok(color) => (color, None),
            Err(rejection) => {
                let fallback = self.defaults.color(role, mode);
                if rejection.is_diagnostic() {
                    info!(
                        role = %role,
                        mode = %mode,
                        supplied = raw.unwrap_or_default(),
                        fallback = %fallback,
                        reason = %rejection,
                        "supplied color rejected, falling back to default"
                    );
                }
                (fallback, Some(rejection))
            }
        }
    }

    fn write_palette(&mut self, role: Role, mode: ThemeMode, base: Color) -> &Palette {
        let _span = info_span!("theme.apply", role = %role, mode = %mode).entered();
        let palette = Palette::generate(base);
        for entry in &palette {
            self.surface
                .set_property(&shade_key(mode, role, entry.shade), &entry.hex);
            self.surface
                .set_property(&contrast_key(mode, role, entry.shade), entry.contrast.as_css());
        }
        debug!(base = %palette.base().hex, "palette written");
        self.palettes.insert((role, mode), palette);
        &self.palettes[&(role, mode)]
    }

    fn write_text(&mut self, mode: ThemeMode, color: Color) {
        let _span = info_span!("theme.apply", role = %Role::Text, mode = %mode).entered();
        let secondary = color.with_alpha(SECONDARY_TEXT_ALPHA).to_hex8();
        self.surface.set_property(&text_key(mode), &color.to_string());
        self.surface
            .set_property(&secondary_text_key(mode), &secondary);
        debug!(text = %color, secondary = %secondary, "text color written");
        self.text.insert(mode, color);
    }
}
