use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use lightbox_core::{load_preset, load_scene, presets::PRESET_NAMES, SceneDescription};
use lightbox_renderer::{render_with_cancel, Camera, OutputEncoding, RenderConfig, Scene};

/// Render a lightbox scene to PNG.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Scene description (JSON)
    #[arg(long, conflicts_with = "preset")]
    scene: Option<PathBuf>,

    /// Built-in scene to render when no --scene is given
    #[arg(long, default_value = "lightbox")]
    preset: String,

    /// Output PNG path
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Samples per pixel
    #[arg(long)]
    samples: Option<u32>,

    /// Maximum bounce depth
    #[arg(long)]
    depth: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    bucket_size: Option<u32>,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Cancel the render after this many seconds
    #[arg(long)]
    time_limit: Option<f64>,

    /// Write linear values instead of gamma 2.0
    #[arg(long)]
    linear: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn load(&self) -> Result<SceneDescription> {
        match &self.scene {
            Some(path) => {
                load_scene(path).with_context(|| format!("Failed to load scene {}", path.display()))
            }
            None => load_preset(&self.preset)
                .with_context(|| format!("Available presets: {}", PRESET_NAMES.join(", "))),
        }
    }

    fn apply_overrides(&self, desc: &mut SceneDescription) {
        let settings = &mut desc.settings;
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(samples) = self.samples {
            settings.samples_per_pixel = samples;
        }
        if let Some(depth) = self.depth {
            settings.max_depth = depth;
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(bucket_size) = self.bucket_size {
            settings.bucket_size = bucket_size;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    log::info!("Starting lightbox");

    let mut desc = args.load()?;
    args.apply_overrides(&mut desc);
    desc.validate().context("Invalid render settings")?;

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }
    log::info!("Using {} worker threads", rayon::current_num_threads());

    let cancel = Arc::new(AtomicBool::new(false));
    if let Some(secs) = args.time_limit {
        let limit = Duration::try_from_secs_f64(secs)
            .with_context(|| format!("Invalid time limit {secs}"))?;
        let cancel = Arc::clone(&cancel);
        thread::spawn(move || {
            thread::sleep(limit);
            log::warn!("Time limit of {:?} reached, cancelling", limit);
            cancel.store(true, Ordering::Relaxed);
        });
    }

    let scene = Scene::from_description(&desc);
    let camera = Camera::from_description(&desc);
    let config = RenderConfig::from(&desc.settings);

    let start = Instant::now();
    let image = render_with_cancel(&camera, &scene, &config, &cancel)?;
    log::info!("Render finished in {:.2?}", start.elapsed());

    let encoding = if args.linear {
        OutputEncoding::Linear
    } else {
        OutputEncoding::Gamma2
    };
    image
        .save_png(&args.output, encoding)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["lightbox"]);
        assert_eq!(args.preset, "lightbox");
        assert_eq!(args.output, PathBuf::from("output.png"));
        assert!(args.scene.is_none());
        assert!(!args.linear);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "lightbox",
            "--preset",
            "lightbox_soft",
            "--width",
            "64",
            "--height",
            "32",
            "--samples",
            "8",
            "--depth",
            "4",
            "--seed",
            "9",
            "--bucket-size",
            "16",
        ]);
        let mut desc = args.load().unwrap();
        args.apply_overrides(&mut desc);

        assert_eq!(desc.settings.width, 64);
        assert_eq!(desc.settings.height, 32);
        assert_eq!(desc.settings.samples_per_pixel, 8);
        assert_eq!(desc.settings.max_depth, 4);
        assert_eq!(desc.settings.seed, 9);
        assert_eq!(desc.settings.bucket_size, 16);
        assert!(desc.validate().is_ok());
    }

    #[test]
    fn test_unknown_preset() {
        let args = Args::parse_from(["lightbox", "--preset", "nope"]);
        assert!(args.load().is_err());
    }

    #[test]
    fn test_scene_conflicts_with_preset() {
        let result = Args::try_parse_from(["lightbox", "--scene", "a.json", "--preset", "lightbox"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_samples_rejected() {
        let args = Args::parse_from(["lightbox", "--samples", "0"]);
        let mut desc = args.load().unwrap();
        args.apply_overrides(&mut desc);
        assert!(desc.validate().is_err());
    }
}
