//! Simple path tracer example.
//!
//! Renders the `lightbox` preset at a small size and saves it as PNG.
//!
//! ```text
//! cargo run --release -p lightbox_renderer --example simple_render
//! ```

use lightbox_core::load_preset;
use lightbox_renderer::{render, Camera, OutputEncoding, RenderConfig, Scene};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut desc = load_preset("lightbox")?;

    // Quick preview quality
    desc.settings.width = 256;
    desc.settings.height = 128;
    desc.settings.samples_per_pixel = 32;

    let scene = Scene::from_description(&desc);
    let camera = Camera::from_description(&desc);
    let config = RenderConfig::from(&desc.settings);

    let image = render(&camera, &scene, &config);
    log::info!("Average color: {:?}", image.average());

    image.save_png("simple_render.png", OutputEncoding::Gamma2)?;
    Ok(())
}
