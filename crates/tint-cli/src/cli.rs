use std::io::Write;

use clap::{Parser, Subcommand};
use tint_runtime::RuntimeConfig;

use crate::apply::{ApplyArgs, run_apply};
use crate::check::{CheckArgs, run_check};
use crate::error::Result;
use crate::mode::{ModeArgs, run_mode};
use crate::palette::{PaletteArgs, run_palette};

#[derive(Debug, Parser)]
#[command(
    name = "tint",
    about = "Palette generation and theme inspection for the console",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the 14-shade palette of a color.
    Palette(PaletteArgs),

    /// Report brightness, contrast, and light/dark suitability of a color.
    Check(CheckArgs),

    /// Apply defaults and an optional label policy, then print the properties.
    Apply(ApplyArgs),

    /// Show or change the persisted theme mode.
    Mode(ModeArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    let config = RuntimeConfig::from_env();
    let stdout = std::io::stdout();
    run(cli, &config, &mut stdout.lock())
}

pub fn run(cli: Cli, config: &RuntimeConfig, out: &mut dyn Write) -> Result<()> {
    match cli.command {
        Commands::Palette(args) => run_palette(&args, out),
        Commands::Check(args) => run_check(&args, out),
        Commands::Apply(args) => run_apply(&args, config, out),
        Commands::Mode(args) => run_mode(&args, config, out),
    }
}
