//! Material trait for surface scattering.

use crate::{gen_f64, hittable::HitRecord};
use glint_math::{DVec3, Ray};
use rand::RngCore;

/// Color type alias (RGB reflectance, components in [0, 1])
pub type Color = DVec3;

/// Outcome of a successful scatter: the bounced ray and the color
/// multiplier applied to whatever that ray goes on to see.
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
///
/// Materials hold no mutable state; every random decision draws from the
/// caller-supplied generator, so a scene can be shared freely across
/// render threads that each own an independent RNG.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `Some(ScatterResult)` if the ray scatters, or `None` if it
    /// is absorbed.
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult>;
}

/// Lambertian (diffuse) material.
#[derive(Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        // Bounce toward a random point in the unit sphere sitting on the
        // surface normal.
        let mut scatter_direction = rec.normal + random_in_unit_sphere(rng);

        // Catch degenerate scatter direction
        if scatter_direction.length_squared() < 1e-12 {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.point, scatter_direction),
        })
    }
}

/// Metal (specular reflector) material.
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction.normalize(), rec.normal);
        let scattered_dir = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Fuzz can push the bounce below the horizon; rough metal absorbs
        // those rays.
        if scattered_dir.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.point, scattered_dir),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
pub struct Dielectric {
    /// Index of refraction
    refraction_index: f64,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `refraction_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn new(refraction_index: f64) -> Self {
        Self { refraction_index }
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let d_dot_n = ray_in.direction.dot(rec.normal);

        // The stored normal points outward; the sign of d.n says whether
        // the ray is entering or exiting the medium.
        let (outward_normal, ni_over_nt, cosine) = if d_dot_n > 0.0 {
            (
                -rec.normal,
                self.refraction_index,
                self.refraction_index * d_dot_n / ray_in.direction.length(),
            )
        } else {
            (
                rec.normal,
                1.0 / self.refraction_index,
                -d_dot_n / ray_in.direction.length(),
            )
        };

        let direction = match refract(ray_in.direction, outward_normal, ni_over_nt) {
            Some(refracted) => {
                if gen_f64(rng) < schlick(cosine, self.refraction_index) {
                    reflect(ray_in.direction, rec.normal)
                } else {
                    refracted
                }
            }
            // Total internal reflection
            None => reflect(ray_in.direction, rec.normal),
        };

        Some(ScatterResult {
            // Glass absorbs nothing
            attenuation: Color::ONE,
            scattered: Ray::new(rec.point, direction),
        })
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: DVec3, n: DVec3) -> DVec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through a surface via Snell's law.
///
/// Returns `None` when no real refraction exists (total internal
/// reflection).
fn refract(v: DVec3, n: DVec3, ni_over_nt: f64) -> Option<DVec3> {
    let uv = v.normalize();
    let dt = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some(ni_over_nt * (uv - n * dt) - n * discriminant.sqrt())
    } else {
        None
    }
}

/// Schlick's approximation for Fresnel reflectance.
fn schlick(cosine: f64, refraction_index: f64) -> f64 {
    let r0 = ((1.0 - refraction_index) / (1.0 + refraction_index)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Rejection-sample a point inside the unit sphere: draw from [-1,1]^3
/// until the squared length is below one.
pub(crate) fn random_in_unit_sphere(rng: &mut dyn RngCore) -> DVec3 {
    loop {
        let p = 2.0 * DVec3::new(gen_f64(rng), gen_f64(rng), gen_f64(rng)) - DVec3::ONE;
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
