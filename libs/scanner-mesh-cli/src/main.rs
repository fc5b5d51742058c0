//! Command-line front end for `scanner-mesh`.
//!
//! ```sh
//! scanner-mesh -i scanner.json -o scanner.ply --fov 400 200 --show-det-eff
//! cat scanner.json | scanner-mesh -o modules.stl --modules-only
//! ```

mod export;
mod reader;

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use config::constants::EngineConfig;
use env_logger::Env;
use scanner_mesh::{export_scanner, Fov, RenderOptions};

use crate::export::FileSink;
use crate::reader::JsonScannerSource;

#[derive(Parser, Debug)]
#[command(name = "scanner-mesh")]
#[command(about = "Create a 3D model of the scanner described in a list-mode file")]
#[command(version)]
struct Args {
    /// File to read from, or stdin if omitted.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// File to write; the extension selects the format (ply, stl, obj).
    #[arg(short, long)]
    output: PathBuf,

    /// Add a cylindrical field of view, as radius and height.
    #[arg(long, num_args = 2, value_names = ["RADIUS", "HEIGHT"])]
    fov: Option<Vec<f64>>,

    /// Generate one convex hull per module instead of one box per crystal.
    #[arg(long)]
    modules_only: bool,

    /// Color crystals by detection efficiency.
    #[arg(long)]
    show_det_eff: bool,

    /// Random colors, to check placements by eye.
    #[arg(long)]
    random_color: bool,

    /// Seed for --random-color.
    #[arg(long)]
    seed: Option<u64>,

    /// Log every module.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn render_options(&self) -> Result<RenderOptions> {
        let fov = match self.fov.as_deref() {
            Some(&[radius, height]) => Some(Fov::new(radius, height)?),
            Some(other) => anyhow::bail!("--fov takes a radius and a height, got {other:?}"),
            None => None,
        };
        Ok(RenderOptions {
            modules_only: self.modules_only,
            show_det_eff: self.show_det_eff,
            random_color: self.random_color,
            fov,
            color_seed: self.seed,
        })
    }

    fn open_input(&self) -> Result<Box<dyn Read>> {
        match &self.input {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                Ok(Box::new(BufReader::new(file)))
            }
            None => Ok(Box::new(io::stdin().lock())),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let options = args.render_options()?;
    let mut sink = FileSink::new(&args.output)?;

    let input = args.open_input()?;
    let mut source =
        JsonScannerSource::from_reader(input).context("failed to read scanner description")?;

    export_scanner(&mut source, &mut sink, &options, &EngineConfig::default())
        .with_context(|| format!("failed to create {}", args.output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_map_to_options() {
        let args = Args::parse_from([
            "scanner-mesh",
            "-o",
            "out.ply",
            "--fov",
            "300",
            "150",
            "--modules-only",
            "--show-det-eff",
            "--seed",
            "9",
        ]);
        let options = args.render_options().unwrap();
        assert!(options.modules_only);
        assert!(options.show_det_eff);
        assert!(!options.random_color);
        assert_eq!(options.fov, Some(Fov { radius: 300.0, height: 150.0 }));
        assert_eq!(options.color_seed, Some(9));
        assert!(args.input.is_none());
    }

    #[test]
    fn test_output_is_required() {
        assert!(Args::try_parse_from(["scanner-mesh", "-i", "in.json"]).is_err());
    }

    #[test]
    fn test_invalid_fov_is_rejected() {
        let args = Args::parse_from(["scanner-mesh", "-o", "out.stl", "--fov", "0", "1"]);
        assert!(args.render_options().is_err());
    }

    #[test]
    fn test_fov_needs_two_values() {
        assert!(Args::try_parse_from(["scanner-mesh", "-o", "o.ply", "--fov", "1"]).is_err());
    }
}
