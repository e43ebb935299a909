//! Triangle mesh loading for Weft scenes.
//!
//! Meshes are flattened into independent [`Triangle`]s when the scene is
//! loaded; the tracer has no acceleration structure, so a mesh is just a
//! run of triangles sharing one material.

use std::io::BufRead;
use std::path::Path;

use weft_math::Vec3;

use crate::loader::SceneError;
use crate::scene::Triangle;

/// Uniform scale followed by translation, applied to every vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshTransform {
    pub scale: f32,
    pub translation: Vec3,
}

impl Default for MeshTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translation: Vec3::ZERO,
        }
    }
}

impl MeshTransform {
    #[inline]
    fn apply(&self, p: Vec3) -> Vec3 {
        p * self.scale + self.translation
    }
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    }
}

/// Load an OBJ file into world-space triangles.
pub fn load_obj<P: AsRef<Path>>(
    path: P,
    transform: MeshTransform,
) -> Result<Vec<Triangle>, SceneError> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(path, &load_options())?;
    let triangles = triangles_from_models(&models, transform);

    if triangles.is_empty() {
        log::warn!("OBJ file {} contains no triangles", path.display());
    } else {
        log::info!(
            "Loaded {} triangles from {} model(s) in {}",
            triangles.len(),
            models.len(),
            path.display()
        );
    }

    Ok(triangles)
}

/// Load OBJ data from a reader. Material libraries are ignored.
pub fn load_obj_buf<R: BufRead>(
    reader: &mut R,
    transform: MeshTransform,
) -> Result<Vec<Triangle>, SceneError> {
    let (models, _materials) =
        tobj::load_obj_buf(reader, &load_options(), |_| Err(tobj::LoadError::OpenFileFailed))?;
    Ok(triangles_from_models(&models, transform))
}

/// Flatten every model's indexed faces into triangles.
fn triangles_from_models(models: &[tobj::Model], transform: MeshTransform) -> Vec<Triangle> {
    let mut triangles = Vec::new();

    for model in models {
        let mesh = &model.mesh;
        let vertex = |i: u32| {
            let i = i as usize * 3;
            transform.apply(Vec3::new(
                mesh.positions[i],
                mesh.positions[i + 1],
                mesh.positions[i + 2],
            ))
        };

        for face in mesh.indices.chunks_exact(3) {
            triangles.push(Triangle::new(vertex(face[0]), vertex(face[1]), vertex(face[2])));
        }
    }

    triangles
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";

    #[test]
    fn test_quad_is_triangulated() {
        let triangles = load_obj_buf(&mut QUAD.as_bytes(), MeshTransform::default()).unwrap();
        assert_eq!(triangles.len(), 2);

        for tri in &triangles {
            assert!((tri.normal - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn test_transform_applied() {
        let transform = MeshTransform {
            scale: 2.0,
            translation: Vec3::new(0.0, 0.0, 5.0),
        };
        let triangles = load_obj_buf(&mut QUAD.as_bytes(), transform).unwrap();

        assert_eq!(triangles[0].v0, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(triangles[0].v1, Vec3::new(2.0, 0.0, 5.0));
    }

    #[test]
    fn test_load_obj_from_file() {
        let path = std::env::temp_dir().join(format!("weft_mesh_test_{}.obj", std::process::id()));
        std::fs::write(&path, QUAD).unwrap();

        let triangles = load_obj(&path, MeshTransform::default()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(triangles.len(), 2);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_obj("/definitely/not/here.obj", MeshTransform::default());
        assert!(matches!(result, Err(SceneError::Obj(_))));
    }
}
