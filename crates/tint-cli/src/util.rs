use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;
use tint_style::ThemeMode;
use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Variable selecting machine-readable error output.
pub const OUTPUT_ENV: &str = "TINT_OUTPUT";

/// Error report format on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

/// How errors are reported on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputIntegration {
    pub mode: OutputMode,
}

impl OutputIntegration {
    /// JSON when `TINT_OUTPUT=json` or `--json` is on the command line.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_sources(
            std::env::var(OUTPUT_ENV).ok().as_deref(),
            std::env::args().skip(1),
        )
    }

    #[must_use]
    pub fn from_sources(env: Option<&str>, args: impl IntoIterator<Item = String>) -> Self {
        let env_json = env.is_some_and(|value| value.trim().eq_ignore_ascii_case("json"));
        let flag_json = args.into_iter().any(|arg| arg == "--json");
        let mode = if env_json || flag_json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };
        Self { mode }
    }

    #[must_use]
    pub fn should_emit_json(&self) -> bool {
        self.mode == OutputMode::Json
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the `warn`
/// default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Which modes a command covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModeChoice {
    Dark,
    Light,
    #[default]
    Both,
}

impl ModeChoice {
    #[must_use]
    pub fn modes(self) -> &'static [ThemeMode] {
        match self {
            Self::Dark => &[ThemeMode::Dark],
            Self::Light => &[ThemeMode::Light],
            Self::Both => &ThemeMode::ALL,
        }
    }
}

pub fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn json_from_env_or_flag() {
        assert!(OutputIntegration::from_sources(Some("JSON"), args(&["palette"])).should_emit_json());
        assert!(
            OutputIntegration::from_sources(None, args(&["palette", "#fff", "--json"]))
                .should_emit_json()
        );
        assert!(!OutputIntegration::from_sources(None, args(&["palette"])).should_emit_json());
        assert!(!OutputIntegration::from_sources(Some("text"), args(&[])).should_emit_json());
    }

    #[test]
    fn unrecognized_env_value_falls_back_to_text() {
        assert_eq!(
            OutputIntegration::from_sources(Some(" Json "), args(&[])).mode,
            OutputMode::Json
        );
        assert_eq!(
            OutputIntegration::from_sources(Some("yaml"), args(&["--jsonl"])).mode,
            OutputMode::Text
        );
    }

    #[test]
    fn mode_choice_expands() {
        assert_eq!(ModeChoice::Both.modes(), &[ThemeMode::Dark, ThemeMode::Light]);
        assert_eq!(ModeChoice::Light.modes(), &[ThemeMode::Light]);
        assert_eq!(ModeChoice::default(), ModeChoice::Both);
    }
}
