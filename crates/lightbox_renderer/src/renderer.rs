//! Image driver.
//!
//! Implements the outer Monte Carlo loop:
//! - Multi-sample averaging per pixel
//! - Bucket-parallel rendering with per-bucket random streams
//! - Cooperative cancellation between buckets
//! - Gamma correction on output

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

use lightbox_core::RenderSettings;
use lightbox_math::Interval;
use rand::RngCore;
use rayon::prelude::*;

use crate::bucket::{bucket_rng, generate_buckets, render_bucket, BucketResult};
use crate::error::{RenderError, RenderResult};
use crate::{Camera, Color, Scene, Shading, Tracer};

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Camera rays averaged per pixel
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Base seed; each bucket derives its own stream from it
    pub seed: u64,
    /// Edge length of a bucket in pixels
    pub bucket_size: u32,
    /// Direct-light blend and cosine handling
    pub shading: Shading,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::from(&RenderSettings::default())
    }
}

impl From<&RenderSettings> for RenderConfig {
    fn from(settings: &RenderSettings) -> Self {
        Self {
            samples_per_pixel: settings.samples_per_pixel,
            max_depth: settings.max_depth,
            seed: settings.seed,
            bucket_size: settings.bucket_size,
            shading: Shading::from(settings),
        }
    }
}

/// How radiance is mapped to 8-bit output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputEncoding {
    /// Gamma 2.0, then clamp
    #[default]
    Gamma2,
    /// Clamp only
    Linear,
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a color to 8-bit RGBA.
pub fn color_to_rgba(color: Color, encoding: OutputEncoding) -> [u8; 4] {
    let encode = |c: f32| {
        let c = match encoding {
            OutputEncoding::Gamma2 => linear_to_gamma(c),
            OutputEncoding::Linear => c,
        };
        (255.0 * Interval::UNIT.clamp(c)).round() as u8
    };
    [encode(color.x), encode(color.y), encode(color.z), 255]
}

/// Render a single pixel: trace `samples_per_pixel` camera rays and average.
pub fn render_pixel(
    camera: &Camera,
    tracer: &Tracer<'_>,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += tracer.trace_ray(&ray, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel.max(1) as f32
}

fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Floating-point image, row-major, row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; pixel_count(width, height)],
        }
    }

    /// Wrap an existing pixel vector.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> RenderResult<Self> {
        let expected = pixel_count(width, height);
        if pixels.len() != expected {
            return Err(RenderError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Copy a rendered bucket into place.
    pub fn blit(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, *color);
        }
    }

    /// Mean color over all pixels.
    pub fn average(&self) -> Color {
        if self.pixels.is_empty() {
            return Color::ZERO;
        }
        self.pixels.iter().copied().sum::<Color>() / self.pixels.len() as f32
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self, encoding: OutputEncoding) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color, encoding));
        }
        bytes
    }

    /// Encode as PNG and write to `path`.
    pub fn save_png<P: AsRef<Path>>(&self, path: P, encoding: OutputEncoding) -> RenderResult<()> {
        let bytes = self.to_rgba(encoding);
        let expected = pixel_count(self.width, self.height) * 4;
        let actual = bytes.len();

        let rgba = image::RgbaImage::from_raw(self.width, self.height, bytes)
            .ok_or(RenderError::BufferSize { expected, actual })?;
        rgba.save_with_format(path.as_ref(), image::ImageFormat::Png)?;

        log::info!("Saved {}x{} image to {}", self.width, self.height, path.as_ref().display());
        Ok(())
    }
}

/// Render the entire scene, buckets in parallel.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let never = AtomicBool::new(false);
    let results = render_buckets(camera, scene, config, &never);
    assemble(camera, results.iter().flatten())
}

/// Render the entire scene, checking `cancel` before each bucket.
///
/// Buckets already in flight finish; the rest are skipped and the call
/// returns `RenderError::Cancelled`.
pub fn render_with_cancel(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    cancel: &AtomicBool,
) -> RenderResult<ImageBuffer> {
    let results = render_buckets(camera, scene, config, cancel);

    let total = results.len();
    let completed = results.iter().filter(|r| r.is_some()).count();
    if completed < total {
        log::warn!("Render cancelled, {} of {} buckets finished", completed, total);
        return Err(RenderError::Cancelled { completed, total });
    }

    Ok(assemble(camera, results.iter().flatten()))
}

fn assemble<'r>(camera: &Camera, results: impl Iterator<Item = &'r BucketResult>) -> ImageBuffer {
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    for result in results {
        image.blit(result);
    }
    image
}

fn render_buckets(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    cancel: &AtomicBool,
) -> Vec<Option<BucketResult>> {
    let buckets = generate_buckets(camera.image_width, camera.image_height, config.bucket_size);
    let tracer = Tracer::new(scene, config.max_depth, config.shading);
    let total = buckets.len();
    let finished = AtomicUsize::new(0);

    log::info!(
        "Rendering {}x{} @ {} spp, depth {}, {} buckets",
        camera.image_width,
        camera.image_height,
        config.samples_per_pixel,
        config.max_depth,
        total
    );
    let start = Instant::now();

    let results: Vec<Option<BucketResult>> = buckets
        .par_iter()
        .map(|bucket| {
            if cancel.load(Ordering::Relaxed) {
                return None;
            }

            let mut rng = bucket_rng(config.seed, bucket.index);
            let pixels = render_bucket(bucket, camera, &tracer, config, &mut rng);

            let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!("Bucket {} done ({}/{})", bucket.index, done, total);

            Some(BucketResult::new(*bucket, pixels))
        })
        .collect();

    log::info!("Rendered in {:?}", start.elapsed());
    results
}
