//! Style surface: the sink for CSS custom properties.
//!
//! The theme context writes every computed color through [`StyleSurface`].
//! In the browser this is the document root's inline style; here
//! [`InMemoryStyleSurface`] collects the properties so they can be rendered
//! as a CSS block or inspected.

use std::fmt::Write as _;

use ahash::AHashMap;
use tint_style::{Role, Shade, ThemeMode};

/// Key/value sink for CSS custom properties.
pub trait StyleSurface {
    fn set_property(&mut self, name: &str, value: &str);

    fn property(&self, name: &str) -> Option<&str>;
}

impl<S: StyleSurface + ?Sized> StyleSurface for &mut S {
    fn set_property(&mut self, name: &str, value: &str) {
        (**self).set_property(name, value);
    }

    fn property(&self, name: &str) -> Option<&str> {
        (**self).property(name)
    }
}

/// `--theme-<mode>-<role>-<shade>`
#[must_use]
pub fn shade_key(mode: ThemeMode, role: Role, shade: Shade) -> String {
    format!("--theme-{mode}-{role}-{shade}")
}

/// `--theme-<mode>-<role>-contrast-<shade>`
#[must_use]
pub fn contrast_key(mode: ThemeMode, role: Role, shade: Shade) -> String {
    format!("--theme-{mode}-{role}-contrast-{shade}")
}

/// `--theme-<mode>-text`
#[must_use]
pub fn text_key(mode: ThemeMode) -> String {
    format!("--theme-{mode}-text")
}

/// `--theme-<mode>-secondary-text`
#[must_use]
pub fn secondary_text_key(mode: ThemeMode) -> String {
    format!("--theme-{mode}-secondary-text")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryStyleSurface {
    properties: AHashMap<String, String>,
}

impl InMemoryStyleSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Properties sorted by name.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Properties whose name starts with `prefix`, sorted by name.
    #[must_use]
    pub fn with_prefix(&self, prefix: &str) -> Vec<(&str, &str)> {
        self.sorted()
            .into_iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .collect()
    }

    /// Render as one CSS rule block, properties in name order.
    #[must_use]
    pub fn to_css(&self, selector: &str) -> String {
        let mut css = format!("{selector} {{\n");
        for (name, value) in self.sorted() {
            let _ = writeln!(css, "  {name}: {value};");
        }
        css.push_str("}\n");
        css
    }
}

impl StyleSurface for InMemoryStyleSurface {
    fn set_property(&mut self, name: &str, value: &str) {
        if let Some(existing) = self.properties.get_mut(name) {
            existing.clear();
            existing.push_str(value);
        } else {
            self.properties.insert(name.to_owned(), value.to_owned());
        }
    }

    fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }
}
