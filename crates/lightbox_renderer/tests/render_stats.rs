//! Whole-image behaviour: convergence, reproducibility, energy and
//! cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use lightbox_core::{presets, Material, PointLight};
use lightbox_renderer::{
    render, render_pixel, render_with_cancel, Camera, Color, Plane, RenderConfig, RenderError,
    Scene, Shading, Sphere, Tracer, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn diffuse_scene(background: Color) -> Scene {
    Scene::new(
        Plane::new(Vec3::new(0.0, -0.3, 0.0), Vec3::Y, Material::diffuse(Vec3::splat(0.5))),
        PointLight {
            position: Vec3::new(-3.0, 10.0, 5.0),
            intensity: Vec3::ONE,
        },
        background,
    )
    .with_sphere(Sphere::new(
        Vec3::new(0.0, 0.0, -2.0),
        0.5,
        Material::diffuse(Vec3::new(0.8, 0.6, 0.4)),
    ))
}

fn config(samples_per_pixel: u32, seed: u64) -> RenderConfig {
    RenderConfig {
        samples_per_pixel,
        max_depth: 8,
        seed,
        bucket_size: 8,
        shading: Shading::default(),
    }
}

fn std_dev(values: &[f32]) -> f32 {
    let mean = values.iter().sum::<f32>() / values.len() as f32;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / values.len() as f32;
    var.sqrt()
}

/// Luminance-ish estimate of one pixel for each seed.
fn pixel_estimates(scene: &Scene, camera: &Camera, samples: u32, seeds: u64) -> Vec<f32> {
    (0..seeds)
        .map(|seed| {
            let config = config(samples, seed);
            let tracer = Tracer::new(scene, config.max_depth, config.shading);
            let mut rng = StdRng::seed_from_u64(seed);
            let c = render_pixel(camera, &tracer, 16, 16, &config, &mut rng);
            c.x + c.y + c.z
        })
        .collect()
}

#[test]
fn test_more_samples_reduce_spread() {
    let scene = diffuse_scene(Color::new(0.5, 0.7, 1.0));
    let camera = Camera::new(Vec3::new(0.0, 0.0, 1.0), 32, 32);

    let coarse = std_dev(&pixel_estimates(&scene, &camera, 4, 24));
    let fine = std_dev(&pixel_estimates(&scene, &camera, 64, 24));

    assert!(coarse > 0.0);
    assert!(fine < coarse, "fine {fine} should be below coarse {coarse}");
}

#[test]
fn test_same_seed_same_image() {
    let scene = diffuse_scene(Color::new(0.5, 0.7, 1.0));
    let camera = Camera::new(Vec3::new(0.0, 0.0, 1.0), 24, 12);

    let a = render(&camera, &scene, &config(4, 11));
    let b = render(&camera, &scene, &config(4, 11));
    assert_eq!(a, b);

    let c = render(&camera, &scene, &config(4, 12));
    assert_ne!(a, c);
}

#[test]
fn test_thread_count_does_not_change_image() {
    let scene = diffuse_scene(Color::new(0.5, 0.7, 1.0));
    let camera = Camera::new(Vec3::new(0.0, 0.0, 1.0), 24, 12);
    let config = config(4, 3);

    let render_on = |threads: usize| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
            .install(|| render(&camera, &scene, &config))
    };

    assert_eq!(render_on(1), render_on(4));
}

#[test]
fn test_no_emitters_renders_black() {
    let scene = diffuse_scene(Color::ZERO);
    let camera = Camera::new(Vec3::new(0.0, 0.0, 1.0), 16, 8);
    let config = RenderConfig {
        shading: Shading {
            direct_light: None,
            ..Shading::default()
        },
        ..config(4, 5)
    };

    let image = render(&camera, &scene, &config);
    assert!(image.pixels.iter().all(|c| *c == Color::ZERO));
}

#[test]
fn test_preset_renders_finite() {
    let mut desc = presets::lightbox();
    desc.settings.width = 32;
    desc.settings.height = 16;
    desc.settings.samples_per_pixel = 2;

    let scene = Scene::from_description(&desc);
    let camera = Camera::from_description(&desc);
    let image = render(&camera, &scene, &RenderConfig::from(&desc.settings));

    assert_eq!(image.pixels.len(), 32 * 16);
    assert!(image.pixels.iter().all(|c| c.is_finite()));
}

#[test]
fn test_cancel_mid_render() {
    let _ = env_logger::builder().is_test(true).try_init();

    let desc = presets::lightbox();
    let scene = Scene::from_description(&desc);
    let camera = Camera::new(desc.camera.position, 512, 256);
    let config = RenderConfig {
        samples_per_pixel: 256,
        bucket_size: 8,
        ..RenderConfig::from(&desc.settings)
    };

    let cancel = Arc::new(AtomicBool::new(false));
    let timer = {
        let cancel = Arc::clone(&cancel);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            cancel.store(true, Ordering::Relaxed);
        })
    };

    let result = render_with_cancel(&camera, &scene, &config, &cancel);
    timer.join().unwrap();

    match result {
        Err(RenderError::Cancelled { completed, total }) => assert!(completed < total),
        other => panic!("expected cancellation, got {other:?}"),
    }
}
