use crate::DVec3;

/// A ray in 3D space: a half-line starting at `origin` and traveling in
/// `direction`. The direction is not required to be unit length, but must
/// be non-zero for intersection queries to be meaningful.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(DVec3::ZERO, DVec3::X);

        assert_eq!(ray.at(0.0), DVec3::ZERO);
        assert_eq!(ray.at(1.0), DVec3::X);
        assert_eq!(ray.at(2.0), DVec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), DVec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_at_scales_direction() {
        let ray = Ray::new(DVec3::new(1.0, 2.0, 3.0), DVec3::new(0.0, -2.0, 0.0));
        assert_eq!(ray.at(0.5), DVec3::new(1.0, 1.0, 3.0));
    }
}
