//! Organization branding (label) policy input.

use serde::{Deserialize, Serialize};
use tint_style::{Rejection, Role, ThemeMode};

/// Per-mode color overrides supplied by an organization's label policy.
///
/// Field names follow the management API's JSON (`primaryColor`,
/// `fontColorDark`, ...). Absent and blank fields mean "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandingPolicy {
    pub primary_color: Option<String>,
    pub primary_color_dark: Option<String>,
    pub warn_color: Option<String>,
    pub warn_color_dark: Option<String>,
    pub background_color: Option<String>,
    pub background_color_dark: Option<String>,
    pub font_color: Option<String>,
    pub font_color_dark: Option<String>,
}

impl BrandingPolicy {
    /// # Errors
    ///
    /// Fails on malformed JSON or non-string color fields.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// The non-blank override for `role` in `mode`, if any.
    #[must_use]
    pub fn override_for(&self, role: Role, mode: ThemeMode) -> Option<&str> {
        let field = match (role, mode) {
            (Role::Primary, ThemeMode::Dark) => &self.primary_color_dark,
            (Role::Primary, ThemeMode::Light) => &self.primary_color,
            (Role::Warn, ThemeMode::Dark) => &self.warn_color_dark,
            (Role::Warn, ThemeMode::Light) => &self.warn_color,
            (Role::Background, ThemeMode::Dark) => &self.background_color_dark,
            (Role::Background, ThemeMode::Light) => &self.background_color,
            (Role::Text, ThemeMode::Dark) => &self.font_color_dark,
            (Role::Text, ThemeMode::Light) => &self.font_color,
        };
        field.as_deref().filter(|value| !value.trim().is_empty())
    }
}

/// A supplied color that was replaced by a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback {
    pub role: Role,
    pub mode: ThemeMode,
    pub supplied: String,
    pub rejection: Rejection,
    /// Hex of the default that was applied instead.
    pub used: String,
}

/// Outcome of applying a [`BrandingPolicy`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyReport {
    pub fallbacks: Vec<Fallback>,
}

impl PolicyReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.fallbacks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_management_api_field_names() {
        let policy = BrandingPolicy::from_json(
            r##"{
                "primaryColor": "#5469d4",
                "primaryColorDark": "#bbbafa",
                "fontColorDark": "#ffffff",
                "logoUrl": "https://example.com/logo.svg"
            }"##,
        )
        .unwrap();
        assert_eq!(policy.override_for(Role::Primary, ThemeMode::Light), Some("#5469d4"));
        assert_eq!(policy.override_for(Role::Primary, ThemeMode::Dark), Some("#bbbafa"));
        assert_eq!(policy.override_for(Role::Text, ThemeMode::Dark), Some("#ffffff"));
        assert_eq!(policy.override_for(Role::Warn, ThemeMode::Light), None);
    }

    #[test]
    fn blank_fields_are_absent() {
        let policy = BrandingPolicy {
            background_color: Some("   ".into()),
            ..BrandingPolicy::default()
        };
        assert_eq!(policy.override_for(Role::Background, ThemeMode::Light), None);
    }

    #[test]
    fn empty_object_is_default_policy() {
        assert_eq!(BrandingPolicy::from_json("{}").unwrap(), BrandingPolicy::default());
        assert!(BrandingPolicy::from_json("{\"primaryColor\": 5}").is_err());
    }

    #[test]
    fn report_cleanliness() {
        assert!(PolicyReport::default().is_clean());
    }
}
