//! Example: Load and inspect a JSON scene file.
//!
//! Run with: cargo run --example load_scene -- scenes/spheres.json

use std::env;

use weft_core::{load_scene, Shape, Surface};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_scene <path-to-scene-file>");
        println!("\nExamples:");
        println!("  cargo run --example load_scene -- scenes/spheres.json");
        println!("  cargo run --example load_scene -- scenes/pyramid.json");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(scene) => {
            let camera = &scene.camera;
            println!("\n=== Scene ===");
            println!(
                "Camera: position {:?}, yaw {:.1}°, fov {:.1}°, exposure {}",
                camera.position,
                camera.rotation.to_degrees(),
                camera.field_of_view,
                camera.exposure
            );
            println!("Materials: {}", scene.materials.len());
            println!("Lights: {}", scene.lights.len());
            println!("Objects: {}", scene.objects.len());
            println!("Triangles: {}", scene.triangle_count());

            println!("\n--- Materials ---");
            for (id, material) in scene.materials.iter().enumerate() {
                let surface = match material.surface {
                    Surface::Opaque => "opaque".to_string(),
                    Surface::Reflective { coefficient } => format!("reflective {:.2}", coefficient),
                    Surface::Refractive { coefficient, density } => {
                        format!("refractive {:.2}, density {:.2}", coefficient, density)
                    }
                };
                println!("  [{}] diffuse {:?}, {}", id, material.diffuse, surface);
            }

            let spheres = scene
                .objects
                .iter()
                .filter(|o| matches!(o.shape, Shape::Sphere(_)))
                .count();
            let planes = scene
                .objects
                .iter()
                .filter(|o| matches!(o.shape, Shape::Plane(_)))
                .count();
            println!("\n--- Objects ---");
            println!("  Spheres: {}", spheres);
            println!("  Planes: {}", planes);
        }
        Err(e) => {
            eprintln!("Error loading scene: {}", e);
            std::process::exit(1);
        }
    }
}
