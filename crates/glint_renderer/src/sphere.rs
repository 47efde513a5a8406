//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use glint_math::{Aabb, DVec3, GeometryError, Interval, Ray};

/// A sphere primitive.
pub struct Sphere<M: Material> {
    center: DVec3,
    radius: f64,
    material: M,
    bbox: Aabb,
}

impl<M: Material> Sphere<M> {
    /// Create a new sphere.
    ///
    /// Fails with [`GeometryError::NonPositiveRadius`] for zero or negative
    /// radii; a sphere without volume cannot be bounded or hit.
    pub fn new(center: DVec3, radius: f64, material: M) -> Result<Self, GeometryError> {
        if radius <= 0.0 {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        let rvec = DVec3::splat(radius);
        let bbox = Aabb::from_corners(center - rvec, center + rvec)?;

        Ok(Self {
            center,
            radius,
            material,
            bbox,
        })
    }
}

impl<M: Material + 'static> Hittable for Sphere<M> {
    fn hit<'a>(&'a self, ray: &Ray, window: Interval) -> Option<HitRecord<'a>> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - a * c;
        if discriminant <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Nearest root first; fall back to the far root when the near one
        // lies outside the window (origin inside the sphere).
        let mut root = (-b - sqrtd) / a;
        if !window.surrounds(root) {
            root = (-b + sqrtd) / a;
            if !window.surrounds(root) {
                return None;
            }
        }

        let point = ray.at(root);
        Some(HitRecord {
            t: root,
            point,
            normal: (point - self.center) / self.radius,
            material: &self.material,
        })
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
