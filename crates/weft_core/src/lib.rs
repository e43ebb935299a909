//! Weft Core - scene model and file IO for the Weft ray tracer.
//!
//! This crate provides:
//!
//! - **Scene model**: `Scene`, `Camera`, `Material`, `Surface`, `Light`, shapes
//! - **Scene loading**: JSON scene files with OBJ meshes
//! - **Image output**: packed pixel buffers written as BMP
//!
//! # Example
//!
//! ```ignore
//! use weft_core::load_scene;
//!
//! let scene = load_scene("scenes/spheres.json")?;
//! println!("Loaded {} objects", scene.objects.len());
//! ```

pub mod loader;
pub mod mesh;
pub mod output;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, LoadResult, SceneError};
pub use mesh::MeshTransform;
pub use output::{write_bmp, ImageError};
pub use scene::{
    Camera, Light, Material, MaterialId, Object, Plane, Scene, Shape, Sphere, Surface, Triangle,
};
