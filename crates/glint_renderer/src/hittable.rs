//! Hittable trait and HitRecord for ray-object intersection.

use crate::Material;
use glint_math::{Aabb, DVec3, Interval, Ray};

/// Record of a ray-object intersection.
///
/// The normal is the geometric outward unit normal of the surface;
/// materials that care whether the ray arrived from inside derive that
/// from the sign of `direction . normal`.
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Point of intersection
    pub point: DVec3,
    /// Outward unit normal at the intersection
    pub normal: DVec3,
    /// Material of the hit object
    pub material: &'a dyn Material,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object strictly inside the given open
    /// parameter window, returning the closest such hit.
    fn hit<'a>(&'a self, ray: &Ray, window: Interval) -> Option<HitRecord<'a>>;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;
}

/// A flat list of hittable objects, scanned linearly.
///
/// The KD-tree replaces this on the render path; the list remains the
/// reference implementation for closest-hit queries.
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.bbox = self.bbox.union(&object.bounding_box());
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, window: Interval) -> Option<HitRecord<'a>> {
        let mut closest_so_far = window.max;
        let mut best = None;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, Interval::new(window.min, closest_so_far)) {
                closest_so_far = rec.t;
                best = Some(rec);
            }
        }

        best
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Lambertian, Sphere};

    #[test]
    fn test_list_returns_closest_hit() {
        let mut list = HittableList::new();
        // Far sphere added first so list order cannot masquerade as
        // distance order.
        list.add(Box::new(
            Sphere::new(
                DVec3::new(0.0, 0.0, -10.0),
                0.5,
                Lambertian::new(Color::new(0.1, 0.1, 0.1)),
            )
            .unwrap(),
        ));
        list.add(Box::new(
            Sphere::new(
                DVec3::new(0.0, 0.0, -2.0),
                0.5,
                Lambertian::new(Color::new(0.9, 0.9, 0.9)),
            )
            .unwrap(),
        ));

        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let rec = list
            .hit(&ray, Interval::new(0.001, f64::INFINITY))
            .expect("ray through both spheres must hit");
        assert!((rec.t - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_list_bounding_box_grows() {
        let mut list = HittableList::new();
        list.add(Box::new(
            Sphere::new(
                DVec3::new(0.0, 0.0, 0.0),
                1.0,
                Lambertian::new(Color::splat(0.5)),
            )
            .unwrap(),
        ));
        list.add(Box::new(
            Sphere::new(
                DVec3::new(5.0, 0.0, 0.0),
                1.0,
                Lambertian::new(Color::splat(0.5)),
            )
            .unwrap(),
        ));

        let bbox = list.bounding_box();
        assert_eq!(bbox.x.min, -1.0);
        assert_eq!(bbox.x.max, 6.0);
        assert_eq!(list.len(), 2);
        assert!(!list.is_empty());
    }
}
