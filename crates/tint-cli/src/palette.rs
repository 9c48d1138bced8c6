use std::io::Write;

use clap::Args;
use tint_style::Palette;
use tracing::debug;

use crate::error::Result;
use crate::util::write_json;

#[derive(Debug, Clone, Args)]
pub struct PaletteArgs {
    /// Base color: hex (`#5469d4`, `fff`) or `rgb()`/`rgba()`.
    pub color: String,

    /// Print the palette as a JSON array.
    #[arg(long)]
    pub json: bool,
}

pub fn run_palette(args: &PaletteArgs, out: &mut dyn Write) -> Result<()> {
    let palette = Palette::from_hex(&args.color)?;
    debug!(color = %args.color, "palette requested");

    if args.json {
        return write_json(out, &palette);
    }

    for entry in &palette {
        writeln!(
            out,
            "{:<5} {}  {:<20} {}",
            entry.shade.label(),
            entry.hex,
            entry.rgb,
            entry.contrast
        )?;
    }
    Ok(())
}
