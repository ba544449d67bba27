mod config;
mod core;
mod phase;
mod render;
mod scene;
mod theme;
mod types;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::theme::Theme;

#[derive(Parser, Debug)]
#[command(about = "A skittish triangle in a drifting field of circles")]
struct Args {
    /// Columns per field grid
    #[arg(long, default_value_t = config::DEFAULT_COLUMNS)]
    columns: u32,

    /// Rows per field grid
    #[arg(long, default_value_t = config::DEFAULT_ROWS)]
    rows: u32,

    /// Field size scales; one grid is spawned per value
    #[arg(long = "scale", value_name = "FACTOR")]
    field_scales: Vec<f32>,

    /// Theme colors file (YAML with primary / primary_dark / gray_dark)
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let theme = match &args.theme {
        Some(path) => Theme::load(path),
        None => Theme::default(),
    };
    let field_scales = if args.field_scales.is_empty() {
        config::DEFAULT_FIELD_SCALES.to_vec()
    } else {
        args.field_scales
    };
    ui::run(ui::Options {
        columns: args.columns.max(1),
        rows: args.rows.max(1),
        field_scales,
        seed: args.seed,
        theme,
    })
}
