//! Scene model for Weft.
//!
//! A `Scene` is a read-only snapshot for one render: camera, objects,
//! material table, lights and the designated sky material. Objects refer to
//! materials by index into the table.

use weft_math::{normalise, Colour, Vec3};

/// Index into [`Scene::materials`].
pub type MaterialId = usize;

/// Camera parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Eye position
    pub position: Vec3,

    /// Yaw about the +Y axis, in radians
    pub rotation: f32,

    /// Horizontal field of view, in degrees
    pub field_of_view: f32,

    /// Exposure applied when mapping colours to pixels (negative)
    pub exposure: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: 0.0,
            field_of_view: 45.0,
            exposure: -1.0,
        }
    }
}

/// How a surface transports light beyond local shading.
///
/// Reflection and refraction never combine: a surface either mirrors,
/// transmits, or stops the ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Surface {
    Opaque,
    Reflective { coefficient: f32 },
    Refractive { coefficient: f32, density: f32 },
}

impl Surface {
    /// Build a surface from raw coefficients. Reflection wins when both
    /// are positive.
    pub fn from_coefficients(reflection: f32, refraction: f32, density: f32) -> Self {
        if reflection > 0.0 {
            Surface::Reflective { coefficient: reflection }
        } else if refraction > 0.0 {
            Surface::Refractive {
                coefficient: refraction,
                density,
            }
        } else {
            Surface::Opaque
        }
    }
}

/// A Phong-style material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Diffuse colour (also the environment colour for the sky material)
    pub diffuse: Colour,

    /// Specular highlight colour
    pub specular: Colour,

    /// Specular exponent
    pub power: f32,

    /// Reflection/refraction behaviour
    pub surface: Surface,
}

/// Material used when the scene has no valid sky entry.
const VOID: Material = Material {
    diffuse: Colour::BLACK,
    specular: Colour::BLACK,
    power: 0.0,
    surface: Surface::Opaque,
};

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Colour::new(0.5, 0.5, 0.5), // Grey default
            specular: Colour::BLACK,
            power: 60.0,
            surface: Surface::Opaque,
        }
    }
}

impl Material {
    /// Create an opaque material with just a diffuse colour.
    pub fn new(diffuse: Colour) -> Self {
        Self {
            diffuse,
            ..Default::default()
        }
    }

    /// Set the specular colour and exponent.
    pub fn with_specular(mut self, specular: Colour, power: f32) -> Self {
        self.specular = specular;
        self.power = power;
        self
    }

    /// Set the transport behaviour.
    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surface = surface;
        self
    }
}

/// A point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub intensity: Colour,
}

impl Light {
    pub fn new(position: Vec3, intensity: Colour) -> Self {
        Self { position, intensity }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub centre: Vec3,
    pub radius: f32,
}

/// Infinite plane of points `p` with `p · normal = offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub offset: f32,
}

impl Plane {
    pub fn new(normal: Vec3, offset: f32) -> Self {
        Self {
            normal: normalise(normal),
            offset,
        }
    }
}

/// A triangle with counter-clockwise winding defining its outward normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    /// Pre-computed face normal (unit length unless degenerate)
    pub normal: Vec3,
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let normal = normalise((v1 - v0).cross(v2 - v0));
        Self { v0, v1, v2, normal }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
}

/// A shape bound to a material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Object {
    pub shape: Shape,
    pub material: MaterialId,
    /// Whether the object bounds a volume a ray can start inside of.
    /// Spheres and the faces of a closed mesh are solid; planes and lone
    /// triangles are open surfaces.
    pub solid: bool,
}

impl Object {
    /// Bind a shape to a material, solid only if the shape encloses a
    /// volume on its own.
    pub fn new(shape: Shape, material: MaterialId) -> Self {
        Self {
            shape,
            material,
            solid: matches!(shape, Shape::Sphere(_)),
        }
    }

    /// A face of a closed mesh.
    pub fn mesh_face(triangle: Triangle, material: MaterialId) -> Self {
        Self {
            shape: Shape::Triangle(triangle),
            material,
            solid: true,
        }
    }
}

/// A complete scene.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub camera: Camera,

    pub objects: Vec<Object>,

    /// Material table indexed by [`MaterialId`]
    pub materials: Vec<Material>,

    pub lights: Vec<Light>,

    /// Material whose diffuse colour is seen where rays escape
    pub sky_material: MaterialId,
}

impl Scene {
    /// Create an empty scene with the given camera.
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            ..Default::default()
        }
    }

    /// Add a material to the scene and return its ID.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = self.materials.len();
        self.materials.push(material);
        id
    }

    /// Add a shape using an existing material.
    pub fn add_object(&mut self, shape: Shape, material: MaterialId) {
        self.objects.push(Object::new(shape, material));
    }

    /// Add the faces of a closed mesh sharing one material.
    pub fn add_mesh<I>(&mut self, triangles: I, material: MaterialId)
    where
        I: IntoIterator<Item = Triangle>,
    {
        self.objects
            .extend(triangles.into_iter().map(|t| Object::mesh_face(t, material)));
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Add a material and mark it as the sky.
    pub fn set_sky(&mut self, material: Material) -> MaterialId {
        self.sky_material = self.add_material(material);
        self.sky_material
    }

    /// Get a material by ID, falling back to black for unknown IDs.
    pub fn material(&self, id: MaterialId) -> &Material {
        self.materials.get(id).unwrap_or(&VOID)
    }

    /// The environment material.
    pub fn sky(&self) -> &Material {
        self.material(self.sky_material)
    }

    /// Number of triangles across all objects.
    pub fn triangle_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|o| matches!(o.shape, Shape::Triangle(_)))
            .count()
    }
}
