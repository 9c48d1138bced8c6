//! Built-in theme colors and environment configuration.

use std::path::PathBuf;

use tint_style::{Color, Role, ThemeMode, validate};
use tracing::warn;

/// One color per semantic role, for a single mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeColors {
    pub primary: Color,
    pub warn: Color,
    pub background: Color,
    pub text: Color,
}

impl ModeColors {
    #[must_use]
    pub const fn get(&self, role: Role) -> Color {
        match role {
            Role::Primary => self.primary,
            Role::Warn => self.warn,
            Role::Background => self.background,
            Role::Text => self.text,
        }
    }

    fn slot_mut(&mut self, role: Role) -> &mut Color {
        match role {
            Role::Primary => &mut self.primary,
            Role::Warn => &mut self.warn,
            Role::Background => &mut self.background,
            Role::Text => &mut self.text,
        }
    }
}

/// Colors used before branding arrives and whenever a branding color is
/// missing or rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeDefaults {
    pub dark: ModeColors,
    pub light: ModeColors,
}

impl ThemeDefaults {
    pub const BUILTIN: Self = Self {
        dark: ModeColors {
            primary: Color::rgb(0xbb, 0xba, 0xfa),
            warn: Color::rgb(0xff, 0x3b, 0x5b),
            background: Color::rgb(0x11, 0x18, 0x27),
            text: Color::WHITE,
        },
        light: ModeColors {
            primary: Color::rgb(0x54, 0x69, 0xd4),
            warn: Color::rgb(0xcd, 0x3d, 0x56),
            background: Color::rgb(0xfa, 0xfa, 0xfa),
            text: Color::BLACK,
        },
    };

    #[must_use]
    pub const fn for_mode(&self, mode: ThemeMode) -> &ModeColors {
        match mode {
            ThemeMode::Dark => &self.dark,
            ThemeMode::Light => &self.light,
        }
    }

    #[must_use]
    pub const fn color(&self, role: Role, mode: ThemeMode) -> Color {
        self.for_mode(mode).get(role)
    }

    #[must_use]
    pub fn with_color(mut self, role: Role, mode: ThemeMode, color: Color) -> Self {
        let colors = match mode {
            ThemeMode::Dark => &mut self.dark,
            ThemeMode::Light => &mut self.light,
        };
        *colors.slot_mut(role) = color;
        self
    }

    /// Revert any background or text default that fails its mode's
    /// suitability check to the built-in value.
    #[must_use]
    pub fn validated(mut self) -> Self {
        for mode in ThemeMode::ALL {
            for role in [Role::Background, Role::Text] {
                let color = self.color(role, mode);
                if !validate::is_suitable(role, color, mode) {
                    let builtin = Self::BUILTIN.color(role, mode);
                    warn!(
                        role = %role,
                        mode = %mode,
                        configured = %color,
                        builtin = %builtin,
                        "configured default is unsuitable for its mode, using built-in"
                    );
                    self = self.with_color(role, mode, builtin);
                }
            }
        }
        self
    }
}

impl Default for ThemeDefaults {
    fn default() -> Self {
        Self::BUILTIN
    }
}

/// Environment variable holding the preference file path.
pub const STORE_PATH_ENV: &str = "TINT_THEME_STORE";

/// Runtime configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuntimeConfig {
    /// Preference file; `None` keeps preferences in memory only.
    pub store_path: Option<PathBuf>,
    pub defaults: ThemeDefaults,
}

impl RuntimeConfig {
    /// Name of the variable overriding the default for `role` in `mode`,
    /// e.g. `TINT_DARK_PRIMARY`.
    #[must_use]
    pub fn default_color_var(role: Role, mode: ThemeMode) -> String {
        format!(
            "TINT_{}_{}",
            mode.as_str().to_ascii_uppercase(),
            role.as_str().to_ascii_uppercase()
        )
    }

    /// Load config from environment variables.
    ///
    /// Reads:
    /// - `TINT_THEME_STORE`: preference file path
    /// - `TINT_{DARK,LIGHT}_{PRIMARY,WARN,BACKGROUND,TEXT}`: default colors
    ///
    /// Unparsable colors are ignored and unsuitable defaults are reverted,
    /// see [`ThemeDefaults::validated`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Self::from_env`] with an explicit variable source.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(STORE_PATH_ENV)
            && !path.trim().is_empty()
        {
            config.store_path = Some(PathBuf::from(path.trim()));
        }

        for mode in ThemeMode::ALL {
            for role in Role::ALL {
                let var = Self::default_color_var(role, mode);
                let Some(raw) = lookup(&var) else {
                    continue;
                };
                match Color::parse(&raw) {
                    Ok(color) => config.defaults = config.defaults.with_color(role, mode, color),
                    Err(error) => warn!(var = %var, %error, "ignoring unparsable default color"),
                }
            }
        }

        config.defaults = config.defaults.validated();
        config
    }
}
