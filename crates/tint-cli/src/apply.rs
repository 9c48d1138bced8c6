use std::collections::BTreeMap;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use serde::Serialize;
use tint_runtime::{
    BrandingPolicy, InMemoryStyleSurface, MemoryStore, PolicyReport, RuntimeConfig, StyleSurface,
    ThemeContext,
};
use tint_style::{Role, ThemeMode};
use tracing::warn;

use crate::error::{CliError, Result};
use crate::util::{ModeChoice, write_json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Css,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct ApplyArgs {
    /// Label policy JSON file (`-` for stdin). Without it only the defaults
    /// are applied.
    #[arg(long)]
    pub policy: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ModeChoice::Both)]
    pub mode: ModeChoice,

    #[arg(long, value_enum, default_value_t = OutputFormat::Css)]
    pub format: OutputFormat,

    /// CSS selector wrapping the properties.
    #[arg(long, default_value = ":root")]
    pub selector: String,
}

#[derive(Debug, Serialize)]
struct FallbackView {
    role: Role,
    mode: ThemeMode,
    supplied: String,
    reason: String,
    used: String,
}

#[derive(Debug, Serialize)]
struct ApplyOutput<'a> {
    properties: BTreeMap<&'a str, &'a str>,
    fallbacks: Vec<FallbackView>,
}

fn read_policy(path: &Path) -> Result<BrandingPolicy> {
    let raw = if path.as_os_str() == "-" {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw)?;
        raw
    } else {
        fs::read_to_string(path).map_err(|source| CliError::PolicyRead {
            path: path.to_path_buf(),
            source,
        })?
    };
    Ok(BrandingPolicy::from_json(&raw)?)
}

fn fallback_views(report: &PolicyReport) -> Vec<FallbackView> {
    report
        .fallbacks
        .iter()
        .map(|fallback| FallbackView {
            role: fallback.role,
            mode: fallback.mode,
            supplied: fallback.supplied.clone(),
            reason: fallback.rejection.to_string(),
            used: fallback.used.clone(),
        })
        .collect()
}

pub fn run_apply(args: &ApplyArgs, config: &RuntimeConfig, out: &mut dyn Write) -> Result<()> {
    let policy = args.policy.as_deref().map(read_policy).transpose()?;

    let mut ctx = ThemeContext::new(InMemoryStyleSurface::new(), MemoryStore::new())
        .with_defaults(config.defaults);
    ctx.apply_defaults();
    let report = match &policy {
        Some(policy) => ctx.apply_policy(policy),
        None => PolicyReport::default(),
    };
    for fallback in &report.fallbacks {
        warn!(
            role = %fallback.role,
            mode = %fallback.mode,
            supplied = %fallback.supplied,
            used = %fallback.used,
            reason = %fallback.rejection,
            "branding color replaced by default"
        );
    }

    let mut selected = InMemoryStyleSurface::new();
    for mode in args.mode.modes() {
        let prefix = format!("--theme-{mode}-");
        for (name, value) in ctx.surface().with_prefix(&prefix) {
            selected.set_property(name, value);
        }
    }

    match args.format {
        OutputFormat::Css => {
            write!(out, "{}", selected.to_css(&args.selector))?;
        }
        OutputFormat::Json => {
            let output = ApplyOutput {
                properties: selected.sorted().into_iter().collect(),
                fallbacks: fallback_views(&report),
            };
            write_json(out, &output)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(policy: Option<PathBuf>, mode: ModeChoice, format: OutputFormat) -> ApplyArgs {
        ApplyArgs {
            policy,
            mode,
            format,
            selector: ":root".to_string(),
        }
    }

    fn run(args: &ApplyArgs) -> Result<String> {
        let mut out = Vec::new();
        run_apply(args, &RuntimeConfig::default(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn defaults_only_css_for_one_mode() {
        let css = run(&args(None, ModeChoice::Light, OutputFormat::Css)).unwrap();
        assert!(css.starts_with(":root {\n"));
        assert!(css.contains("  --theme-light-primary-500: #5469d4;\n"));
        assert!(css.contains("  --theme-light-secondary-text: #000000c7;\n"));
        assert!(!css.contains("--theme-dark-"));
        // 3 palettes * 28 properties + 2 text properties + 2 brace lines
        assert_eq!(css.lines().count(), 3 * 28 + 2 + 2);
    }

    #[test]
    fn policy_file_overrides_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.json");
        fs::write(
            &path,
            r##"{"primaryColorDark": "#a78bfa", "backgroundColorDark": "#f5f5f5"}"##,
        )
        .unwrap();

        let json = run(&args(Some(path), ModeChoice::Dark, OutputFormat::Json)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["properties"]["--theme-dark-primary-500"], "#a78bfa");
        assert_eq!(value["properties"]["--theme-dark-background-500"], "#111827");
        let fallbacks = value["fallbacks"].as_array().unwrap();
        assert_eq!(fallbacks.len(), 1);
        assert_eq!(fallbacks[0]["role"], "background");
        assert_eq!(fallbacks[0]["mode"], "dark");
        assert_eq!(fallbacks[0]["used"], "#111827");
    }

    #[test]
    fn missing_policy_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = run(&args(Some(path), ModeChoice::Both, OutputFormat::Css)).unwrap_err();
        assert!(matches!(err, CliError::PolicyRead { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn malformed_policy_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.json");
        fs::write(&path, "{ not json").unwrap();
        let err = run(&args(Some(path), ModeChoice::Both, OutputFormat::Css)).unwrap_err();
        assert!(matches!(err, CliError::Json(_)));
    }
}
