use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;
use tint_runtime::{
    FileStore, InMemoryStyleSurface, PreferenceStore, RuntimeConfig, THEME_KEY, ThemeContext,
};
use tint_style::ThemeMode;

use crate::error::{CliError, Result};
use crate::util::write_json;

#[derive(Debug, Clone, Args)]
pub struct ModeArgs {
    #[command(subcommand)]
    pub action: Option<ModeAction>,

    /// Preference file; defaults to `TINT_THEME_STORE`.
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ModeAction {
    /// Print the persisted mode (the default action).
    Show,

    /// Persist a mode.
    Set { mode: ThemeMode },

    /// Persist the opposite of the current mode.
    Toggle,
}

#[derive(Debug, Serialize)]
struct ModeView {
    mode: ThemeMode,
    stored: String,
    store: PathBuf,
}

fn store_path(args: &ModeArgs, config: &RuntimeConfig) -> Result<PathBuf> {
    args.store
        .clone()
        .or_else(|| config.store_path.clone())
        .ok_or_else(|| CliError::invalid("no preference store: pass --store or set TINT_THEME_STORE"))
}

pub fn run_mode(args: &ModeArgs, config: &RuntimeConfig, out: &mut dyn Write) -> Result<()> {
    let path = store_path(args, config)?;
    let mut ctx = ThemeContext::new(InMemoryStyleSurface::new(), FileStore::new(&path));
    let current = ctx.resume_from_storage();

    let mode = match args.action.clone().unwrap_or(ModeAction::Show) {
        ModeAction::Show => current,
        ModeAction::Set { mode } => {
            ctx.set_mode(mode);
            mode
        }
        ModeAction::Toggle => ctx.toggle_mode(),
    };

    // set_mode only logs persistence failures; surface them here.
    let (_, store) = ctx.into_parts();
    let stored = store.get_item(THEME_KEY)?;
    let wrote = matches!(
        args.action,
        Some(ModeAction::Set { .. } | ModeAction::Toggle)
    );
    if wrote && stored.as_deref() != Some(mode.storage_value()) {
        return Err(CliError::exit(
            1,
            format!("could not persist {mode} mode to {}", path.display()),
        ));
    }

    let view = ModeView {
        mode,
        stored: stored.unwrap_or_default(),
        store: path,
    };
    if args.json {
        write_json(out, &view)
    } else {
        writeln!(out, "{}", view.mode)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(action: Option<ModeAction>, store: Option<PathBuf>) -> ModeArgs {
        ModeArgs {
            action,
            store,
            json: false,
        }
    }

    fn run(args: &ModeArgs, config: &RuntimeConfig) -> Result<String> {
        let mut out = Vec::new();
        run_mode(args, config, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn show_on_fresh_store_is_dark_and_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let text = run(&args(None, Some(path.clone())), &RuntimeConfig::default()).unwrap();
        assert_eq!(text, "dark\n");
        assert!(!path.exists());
    }

    #[test]
    fn set_then_show_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let config = RuntimeConfig {
            store_path: Some(path.clone()),
            ..RuntimeConfig::default()
        };

        let text = run(
            &args(Some(ModeAction::Set { mode: ThemeMode::Light }), None),
            &config,
        )
        .unwrap();
        assert_eq!(text, "light\n");
        assert_eq!(run(&args(Some(ModeAction::Show), None), &config).unwrap(), "light\n");
        assert_eq!(
            FileStore::new(&path).get_item(THEME_KEY).unwrap().as_deref(),
            Some("light-theme")
        );
    }

    #[test]
    fn toggle_flips_persisted_mode() {
        let dir = tempfile::tempdir().unwrap();
        let store = Some(dir.path().join("prefs.json"));
        let config = RuntimeConfig::default();
        assert_eq!(run(&args(Some(ModeAction::Toggle), store.clone()), &config).unwrap(), "light\n");
        assert_eq!(run(&args(Some(ModeAction::Toggle), store), &config).unwrap(), "dark\n");
    }

    #[test]
    fn json_view_includes_stored_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let mut out = Vec::new();
        run_mode(
            &ModeArgs {
                action: Some(ModeAction::Set { mode: ThemeMode::Dark }),
                store: Some(path),
                json: true,
            },
            &RuntimeConfig::default(),
            &mut out,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["mode"], "dark");
        assert_eq!(value["stored"], "dark-theme");
    }

    #[test]
    fn missing_store_is_usage_error() {
        let err = run(&args(None, None), &RuntimeConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn corrupt_store_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "[]").unwrap();
        let err = run(&args(None, Some(path)), &RuntimeConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Store(_)));
    }
}
