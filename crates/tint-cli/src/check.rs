use std::io::Write;

use clap::Args;
use serde::Serialize;
use tint_style::{
    Color, ContrastColor, Role, ThemeMode, Tone, contrast_color, contrast_ratio, validate,
};

use crate::error::{CliError, Result};
use crate::util::write_json;

/// Exit code when a color fails the requested role/mode check.
pub const UNSUITABLE_EXIT_CODE: i32 = 3;

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    pub color: String,

    /// Require the color to suit this role; needs `--mode`.
    #[arg(long, requires = "mode")]
    pub role: Option<Role>,

    #[arg(long)]
    pub mode: Option<ThemeMode>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Serialize)]
struct Suitability {
    role: Role,
    mode: ThemeMode,
    suitable: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckReport {
    color: String,
    brightness: f64,
    luminance: f64,
    tone: Tone,
    contrast_vs_black: f64,
    contrast_vs_white: f64,
    overlay: ContrastColor,
    suitability: Vec<Suitability>,
}

impl CheckReport {
    fn new(color: Color) -> Self {
        let suitability = [Role::Background, Role::Text]
            .into_iter()
            .flat_map(|role| {
                ThemeMode::ALL.into_iter().map(move |mode| Suitability {
                    role,
                    mode,
                    suitable: validate::is_suitable(role, color, mode),
                })
            })
            .collect();
        Self {
            color: color.to_string(),
            brightness: color.brightness(),
            luminance: color.relative_luminance(),
            tone: color.tone(),
            contrast_vs_black: contrast_ratio(color, Color::BLACK),
            contrast_vs_white: contrast_ratio(color, Color::WHITE),
            overlay: contrast_color(color),
            suitability,
        }
    }

    fn write_text(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "color       {}", self.color)?;
        writeln!(out, "brightness  {:.1}", self.brightness)?;
        writeln!(out, "luminance   {:.4}", self.luminance)?;
        writeln!(out, "tone        {}", self.tone)?;
        writeln!(
            out,
            "contrast    {:.2}:1 vs black, {:.2}:1 vs white",
            self.contrast_vs_black, self.contrast_vs_white
        )?;
        writeln!(out, "overlay     {}", self.overlay)?;
        for entry in &self.suitability {
            let verdict = if entry.suitable { "yes" } else { "no" };
            writeln!(
                out,
                "{:<11} {verdict}",
                format!("{}-{}", entry.mode, entry.role)
            )?;
        }
        Ok(())
    }
}

pub fn run_check(args: &CheckArgs, out: &mut dyn Write) -> Result<()> {
    let color = Color::parse(&args.color)?;
    let report = CheckReport::new(color);

    if args.json {
        write_json(out, &report)?;
    } else {
        report.write_text(out)?;
    }

    if let (Some(role), Some(mode)) = (args.role, args.mode)
        && let Err(rejection) = validate::screen(role, Some(&args.color), mode)
    {
        return Err(CliError::exit(
            UNSUITABLE_EXIT_CODE,
            format!("{} is not a suitable {mode} {role}: {rejection}", report.color),
        ));
    }
    Ok(())
}
