//! JSON scene loading.
//!
//! Scene files describe the camera, material table, lights and objects.
//! Raw records are deserialised with serde and then validated and converted
//! into the [`Scene`] model.
//!
//! ```json
//! {
//!   "camera": { "position": [0, 0, -10], "rotation": 0, "field_of_view": 45, "exposure": -1 },
//!   "sky_material": 0,
//!   "materials": [
//!     { "diffuse": [0.1, 0.1, 0.3] },
//!     { "diffuse": [1, 0, 0], "specular": [1, 1, 1], "power": 60, "reflection": 0.5 }
//!   ],
//!   "lights": [ { "position": [0, 5, -5], "intensity": [1, 1, 1] } ],
//!   "objects": [
//!     { "type": "sphere", "centre": [0, 0, 0], "radius": 1, "material": 1 },
//!     { "type": "mesh", "path": "bunny.obj", "scale": 10, "material": 1 }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use weft_math::{Colour, Interval, Vec3};

use crate::mesh::{self, MeshTransform};
use crate::scene::{
    Camera, Light, Material, MaterialId, Plane, Scene, Shape, Sphere, Surface, Triangle,
};

/// Errors that can occur while loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("OBJ error: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("Object {object} references unknown material {material}")]
    UnknownMaterial { object: usize, material: MaterialId },

    #[error("Sky material {0} is not in the material table")]
    UnknownSky(MaterialId),

    #[error("Invalid object {object}: {reason}")]
    InvalidObject { object: usize, reason: String },

    #[error("Invalid material {material}: {reason}")]
    InvalidMaterial { material: usize, reason: String },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, SceneError>;

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct RawScene {
    #[serde(default)]
    camera: RawCamera,
    #[serde(default)]
    sky_material: MaterialId,
    materials: Vec<RawMaterial>,
    #[serde(default)]
    lights: Vec<RawLight>,
    #[serde(default)]
    objects: Vec<RawObject>,
}

#[derive(Deserialize, Debug)]
#[serde(default, deny_unknown_fields)]
struct RawCamera {
    position: [f32; 3],
    /// Degrees
    rotation: f32,
    field_of_view: f32,
    exposure: f32,
}

impl Default for RawCamera {
    fn default() -> Self {
        let camera = Camera::default();
        Self {
            position: camera.position.to_array(),
            rotation: camera.rotation.to_degrees(),
            field_of_view: camera.field_of_view,
            exposure: camera.exposure,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct RawMaterial {
    diffuse: [f32; 3],
    #[serde(default)]
    specular: [f32; 3],
    #[serde(default = "default_power")]
    power: f32,
    #[serde(default)]
    reflection: f32,
    #[serde(default)]
    refraction: f32,
    #[serde(default = "default_density")]
    density: f32,
}

fn default_power() -> f32 {
    60.0
}

fn default_density() -> f32 {
    1.0
}

fn default_scale() -> f32 {
    1.0
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct RawLight {
    position: [f32; 3],
    intensity: [f32; 3],
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawObject {
    Sphere {
        centre: [f32; 3],
        radius: f32,
        material: MaterialId,
    },
    Plane {
        normal: [f32; 3],
        offset: f32,
        material: MaterialId,
    },
    Triangle {
        vertices: [[f32; 3]; 3],
        material: MaterialId,
    },
    Mesh {
        path: PathBuf,
        material: MaterialId,
        #[serde(default = "default_scale")]
        scale: f32,
        #[serde(default)]
        translation: [f32; 3],
    },
}

impl RawObject {
    fn material(&self) -> MaterialId {
        match self {
            RawObject::Sphere { material, .. }
            | RawObject::Plane { material, .. }
            | RawObject::Triangle { material, .. }
            | RawObject::Mesh { material, .. } => *material,
        }
    }
}

fn colour(c: [f32; 3]) -> Colour {
    Colour::new(c[0], c[1], c[2])
}

/// Load a scene file from disk.
///
/// Relative mesh paths resolve against the scene file's directory.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));

    let scene = load_scene_from_str(&text, base)?;
    log::info!(
        "Loaded scene {}: {} objects ({} triangles), {} materials, {} lights",
        path.display(),
        scene.objects.len(),
        scene.triangle_count(),
        scene.materials.len(),
        scene.lights.len()
    );
    Ok(scene)
}

/// Parse a scene from JSON text. `base` is used to resolve mesh paths.
pub fn load_scene_from_str(text: &str, base: &Path) -> LoadResult<Scene> {
    let raw: RawScene = serde_json::from_str(text)?;

    let camera = Camera {
        position: Vec3::from_array(raw.camera.position),
        rotation: raw.camera.rotation.to_radians(),
        field_of_view: raw.camera.field_of_view,
        exposure: raw.camera.exposure,
    };
    let mut scene = Scene::new(camera);

    for (index, m) in raw.materials.iter().enumerate() {
        scene.add_material(convert_material(index, m)?);
    }

    if raw.sky_material >= scene.materials.len() {
        return Err(SceneError::UnknownSky(raw.sky_material));
    }
    scene.sky_material = raw.sky_material;

    for l in &raw.lights {
        scene.add_light(Light::new(Vec3::from_array(l.position), colour(l.intensity)));
    }

    for (index, object) in raw.objects.into_iter().enumerate() {
        let material = object.material();
        if material >= scene.materials.len() {
            return Err(SceneError::UnknownMaterial { object: index, material });
        }

        match object {
            RawObject::Sphere { centre, radius, .. } => {
                if radius <= 0.0 {
                    return Err(SceneError::InvalidObject {
                        object: index,
                        reason: format!("sphere radius must be positive, got {}", radius),
                    });
                }
                let sphere = Sphere {
                    centre: Vec3::from_array(centre),
                    radius,
                };
                scene.add_object(Shape::Sphere(sphere), material);
            }
            RawObject::Plane { normal, offset, .. } => {
                let normal = Vec3::from_array(normal);
                if normal.length_squared() == 0.0 {
                    return Err(SceneError::InvalidObject {
                        object: index,
                        reason: "plane normal must be non-zero".to_string(),
                    });
                }
                scene.add_object(Shape::Plane(Plane::new(normal, offset)), material);
            }
            RawObject::Triangle { vertices, .. } => {
                let [a, b, c] = vertices.map(Vec3::from_array);
                scene.add_object(Shape::Triangle(Triangle::new(a, b, c)), material);
            }
            RawObject::Mesh {
                path,
                scale,
                translation,
                ..
            } => {
                let transform = MeshTransform {
                    scale,
                    translation: Vec3::from_array(translation),
                };
                scene.add_mesh(mesh::load_obj(base.join(path), transform)?, material);
            }
        }
    }

    Ok(scene)
}

fn convert_material(index: usize, m: &RawMaterial) -> LoadResult<Material> {
    if !Interval::UNIT.contains(m.reflection) || !Interval::UNIT.contains(m.refraction) {
        return Err(SceneError::InvalidMaterial {
            material: index,
            reason: format!(
                "reflection and refraction must lie in [0, 1], got {} and {}",
                m.reflection, m.refraction
            ),
        });
    }
    if m.refraction > 0.0 && m.reflection <= 0.0 && m.density <= 0.0 {
        return Err(SceneError::InvalidMaterial {
            material: index,
            reason: format!("refractive density must be positive, got {}", m.density),
        });
    }

    Ok(Material {
        diffuse: colour(m.diffuse),
        specular: colour(m.specular),
        power: m.power,
        surface: Surface::from_coefficients(m.reflection, m.refraction, m.density),
    })
}
