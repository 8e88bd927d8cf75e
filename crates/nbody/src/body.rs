use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Display tag carried by a body
///
/// Opaque to the physics; merges combine it channel by channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Channel-wise average, used when two bodies merge
    pub fn average(&self, other: &Color) -> Color {
        Color::new(
            (self.r + other.r) / 2.0,
            (self.g + other.g) / 2.0,
            (self.b + other.b) / 2.0,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub mass: f64,
    pub position: Point3<f64>,
    pub velocity: Vector3<f64>,
    pub color: Color,
}

impl Body {
    /// Creates a body with a placeholder id, for examples and tests
    ///
    /// Bodies that live inside a simulation get their id from
    /// [`SystemState::add_body`](crate::state::SystemState::add_body).
    pub fn new(mass: f64, position: [f64; 3], velocity: [f64; 3]) -> Self {
        Body {
            id: BodyId(0),
            mass,
            position: Point3::from(position),
            velocity: Vector3::from(velocity),
            color: Color::default(),
        }
    }

    pub fn momentum(&self) -> Vector3<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).magnitude()
    }

    pub fn distance_squared_to(&self, other: &Body) -> f64 {
        (self.position - other.position).magnitude_squared()
    }

    /// Radius of a uniform sphere of this mass at the given density
    ///
    /// `radius = cbrt(mass / density)`, so doubling the mass grows the
    /// radius by a factor of about 1.26.
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::body::Body;
    ///
    /// let body = Body::new(8.0, [0.0; 3], [0.0; 3]);
    /// assert!((body.radius(1.0) - 2.0).abs() < 1e-12);
    /// ```
    pub fn radius(&self, density: f64) -> f64 {
        (self.mass / density).cbrt()
    }
}
