//! Simple ray tracer example.
//!
//! Builds a small scene in code, renders it with claimed blocks on every
//! available core and saves it as BMP.

use std::error::Error;

use weft_core::{write_bmp, Camera, Light, Material, Plane, Scene, Shape, Sphere, Surface};
use weft_renderer::{Colour, RenderConfig, Renderer, Strategy, Vec3};

fn main() -> Result<(), Box<dyn Error>> {
    println!("Weft Ray Tracer - Simple Example");
    println!("================================");

    let scene = build_scene();
    let workers = std::thread::available_parallelism().map_or(1, |n| n.get());

    let config = RenderConfig {
        width: 800,
        height: 450,
        aa_level: 2,
        workers,
        strategy: Strategy::BlockClaim { block_size: 32 },
        colour_rise: false,
    };

    println!(
        "Rendering {}x{} @ {}x{} AA on {} threads...",
        config.width, config.height, config.aa_level, config.aa_level, workers
    );

    let start = std::time::Instant::now();
    let mut renderer = Renderer::new(config)?;
    renderer.render(&scene)?;
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.bmp";
    let buffer = renderer.buffer();
    write_bmp(
        filename,
        &buffer.pixels,
        buffer.width as u32,
        buffer.height as u32,
        buffer.stride(),
    )?;
    println!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> Scene {
    let mut scene = Scene::new(Camera {
        position: Vec3::new(0.0, 1.0, -6.0),
        field_of_view: 50.0,
        ..Camera::default()
    });
    scene.set_sky(Material::new(Colour::new(0.2, 0.3, 0.6)));

    let ground = scene.add_material(Material::new(Colour::new(0.4, 0.4, 0.4)));
    let glass = scene.add_material(
        Material::new(Colour::new(0.05, 0.05, 0.05))
            .with_specular(Colour::WHITE, 80.0)
            .with_surface(Surface::Refractive {
                coefficient: 0.9,
                density: 1.5,
            }),
    );
    let mirror = scene.add_material(
        Material::new(Colour::new(0.1, 0.1, 0.1))
            .with_specular(Colour::WHITE, 60.0)
            .with_surface(Surface::Reflective { coefficient: 0.8 }),
    );
    let clay = scene.add_material(
        Material::new(Colour::new(0.8, 0.4, 0.2)).with_specular(Colour::new(0.3, 0.3, 0.3), 20.0),
    );

    // Ground
    scene.add_object(Shape::Plane(Plane::new(Vec3::Y, -1.0)), ground);

    // Three main spheres
    scene.add_object(
        Shape::Sphere(Sphere {
            centre: Vec3::new(0.0, 0.0, 0.0),
            radius: 1.0,
        }),
        glass,
    );
    scene.add_object(
        Shape::Sphere(Sphere {
            centre: Vec3::new(-2.2, 0.0, 1.0),
            radius: 1.0,
        }),
        clay,
    );
    scene.add_object(
        Shape::Sphere(Sphere {
            centre: Vec3::new(2.2, 0.0, 1.0),
            radius: 1.0,
        }),
        mirror,
    );

    scene.add_light(Light::new(Vec3::new(-4.0, 6.0, -4.0), Colour::new(0.8, 0.8, 0.8)));
    scene.add_light(Light::new(Vec3::new(5.0, 3.0, -2.0), Colour::new(0.3, 0.3, 0.4)));
    scene
}
