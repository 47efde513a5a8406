//! Camera for ray generation.

use crate::gen_f64;
use glint_math::{DVec3, Ray};
use rand::RngCore;

/// A thin-lens camera mapping normalized image-plane coordinates to
/// world-space rays.
///
/// The viewport rectangle sits at the focus distance; ray origins are
/// jittered across a lens disk of radius aperture/2, which defocuses
/// everything off the focus plane.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: DVec3,
    lower_left_corner: DVec3,
    horizontal: DVec3,
    vertical: DVec3,
    u: DVec3,
    v: DVec3,
    lens_radius: f64,
}

impl Camera {
    /// Create a camera.
    ///
    /// - `look_from` / `look_at` / `vup`: eye position, target, and up hint
    /// - `vfov`: vertical field of view in degrees
    /// - `aspect`: viewport width over height
    /// - `aperture`: lens diameter (0 disables depth of field)
    /// - `focus_dist`: distance to the plane of perfect focus
    pub fn new(
        look_from: DVec3,
        look_at: DVec3,
        vup: DVec3,
        vfov: f64,
        aspect: f64,
        aperture: f64,
        focus_dist: f64,
    ) -> Self {
        let theta = vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = aspect * half_height;

        let w = (look_from - look_at).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        let lower_left_corner = look_from
            - half_width * focus_dist * u
            - half_height * focus_dist * v
            - focus_dist * w;

        Self {
            origin: look_from,
            lower_left_corner,
            horizontal: 2.0 * half_width * focus_dist * u,
            vertical: 2.0 * half_height * focus_dist * v,
            u,
            v,
            lens_radius: aperture / 2.0,
        }
    }

    /// Generate the ray through normalized viewport coordinates (s, t),
    /// with s, t in [0, 1] and (0, 0) the lower-left corner.
    pub fn ray(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            DVec3::ZERO
        };

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical
                - self.origin
                - offset,
        )
    }
}

/// Rejection-sample a point in the unit disk on the lens plane.
fn random_in_unit_disk(rng: &mut dyn RngCore) -> DVec3 {
    loop {
        let p = 2.0 * DVec3::new(gen_f64(rng), gen_f64(rng), 0.0) - DVec3::new(1.0, 1.0, 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
