//! KD-tree accelerated Monte Carlo path tracer.
//!
//! The scene is a collection of primitives indexed once into a [`KdTree`];
//! during rendering the tree is shared read-only across worker threads,
//! each tracing jittered camera rays through the iterative integrator.

mod camera;
mod film;
mod hittable;
mod integrator;
mod kdtree;
mod material;
mod sphere;

pub use camera::Camera;
pub use film::{render, render_pixel, Film, RenderConfig, BAND_ROWS};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use integrator::{ray_color, MAX_DEPTH};
pub use kdtree::KdTree;
pub use material::{Color, Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use sphere::Sphere;

/// Re-export the math types the renderer API surfaces.
pub use glint_math::{Aabb, DVec3, GeometryError, Interval, Ray};

use rand::RngCore;

/// Uniform random f64 in [0, 1) from a type-erased RNG handle.
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rand::Rng::gen(rng)
}
