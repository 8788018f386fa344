// SPDX-License-Identifier: GPL-3.0-or-later
// src/main.rs
//
// Command line entry point: replay interaction scripts, crop images.

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};

use alaanu::app::Script;
use alaanu::config::AppConfig;

/// Command line arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "alaanu", version, about = "Form widget interaction engines")]
pub struct Args {
    /// Config file (defaults to the per-user location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Replay a recorded interaction script and print every notification
    /// as one JSON line.
    Replay {
        script: PathBuf,
    },
    /// Crop an image the way the profile cropper would.
    #[cfg(feature = "image")]
    Crop(crop::CropArgs),
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = AppConfig::load_or_default(args.config.as_deref())?;

    match args.command {
        Command::Replay { script } => replay(&script, &config),
        #[cfg(feature = "image")]
        Command::Crop(crop_args) => crop::run(&crop_args, &config),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn replay(path: &std::path::Path, config: &AppConfig) -> anyhow::Result<()> {
    let script = Script::load(path)?;
    let outcomes = script.replay(config)?;

    let mut failures = 0;
    for outcome in &outcomes {
        for notification in &outcome.notifications {
            let line = serde_json::to_string(notification).context("failed to encode notification")?;
            println!("{line}");
        }
        if let Some(error) = &outcome.error {
            failures += 1;
            log::error!("step {} failed: {error}", outcome.index);
        }
    }
    log::info!("{} steps replayed, {failures} failed", outcomes.len());
    Ok(())
}

#[cfg(feature = "image")]
mod crop {
    use std::path::{Path, PathBuf};

    use anyhow::{Context, bail};
    use clap::Args;

    use alaanu::app::raster::{self, RasterImage};
    use alaanu::config::AppConfig;
    use alaanu::constant::OUTPUT_EXT;
    use alaanu::{CropInteractionEngine, ImageMetrics, Point, Rect, Shape, Size};

    #[derive(Debug, Clone, Args)]
    pub struct CropArgs {
        /// Image to crop.
        pub input: PathBuf,
        /// Output file (defaults to `<name>-cropped.png` in the output dir).
        pub output: Option<PathBuf>,
        /// Region left edge in container units.
        #[arg(long)]
        pub x: Option<f32>,
        /// Region top edge in container units.
        #[arg(long)]
        pub y: Option<f32>,
        /// Region edge length in container units.
        #[arg(long)]
        pub size: Option<f32>,
        /// Cut a circle instead of a square.
        #[arg(long)]
        pub round: bool,
        /// Container size as `WIDTHxHEIGHT`.
        #[arg(long, value_parser = parse_size)]
        pub container: Option<Size>,
    }

    pub fn run(args: &CropArgs, config: &AppConfig) -> anyhow::Result<()> {
        let mut crop_config = config.crop.clone();
        if args.round {
            crop_config.shape = Shape::Circle;
        }
        if let Some(size) = args.size {
            crop_config.region_size = size;
        }
        if let Some(container) = args.container {
            crop_config.container = container;
        }

        let source = RasterImage::open(&args.input)?;
        let name = args
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut engine = CropInteractionEngine::new(crop_config).context("invalid crop settings")?;
        let region = engine.load_image(source.descriptor(name))?;

        if args.x.is_some() || args.y.is_some() {
            let target = Point::new(
                args.x.unwrap_or(region.position.x),
                args.y.unwrap_or(region.position.y),
            );
            let mut drag = engine.drag_move(region.position)?;
            drag.move_to(target);
        }

        let metrics = ImageMetrics {
            container_origin: Point::ORIGIN,
            displayed: Rect::contain(source.natural_size(), engine.container()),
            natural: source.natural_size(),
        };
        let descriptor = engine.commit_crop(&metrics)?;
        let output = source.apply(&descriptor)?;

        let path = match &args.output {
            Some(path) => path.clone(),
            None => default_output(&args.input, config)?,
        };
        raster::save(&output, &path)?;
        log::info!("cropped image written to {}", path.display());

        println!(
            "{}",
            serde_json::to_string(&descriptor).context("failed to encode crop descriptor")?
        );
        Ok(())
    }

    fn default_output(input: &Path, config: &AppConfig) -> anyhow::Result<PathBuf> {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let file = format!("{stem}-cropped.{OUTPUT_EXT}");
        match &config.default_output_dir {
            Some(dir) => Ok(dir.join(file)),
            None => match input.parent() {
                Some(parent) => Ok(parent.join(file)),
                None => bail!("no output path given and no default output directory"),
            },
        }
    }

    fn parse_size(text: &str) -> Result<Size, String> {
        let (width, height) = text
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{text}'"))?;
        let width: f32 = width.trim().parse().map_err(|e| format!("bad width: {e}"))?;
        let height: f32 = height.trim().parse().map_err(|e| format!("bad height: {e}"))?;
        if !(width > 0.0 && height > 0.0) {
            return Err(format!("container must be positive, got '{text}'"));
        }
        Ok(Size::new(width, height))
    }

}
