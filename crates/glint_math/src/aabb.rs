use crate::{DVec3, GeometryError, Interval, Ray};

/// Axis-aligned bounding box used by the spatial index to cheaply reject
/// rays that cannot intersect anything in a subtree.
///
/// The box is three intervals, one per axis. Corner ordering is strict:
/// a box with `max <= min` on any axis is rejected at construction rather
/// than repaired, so malformed scene geometry surfaces immediately.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create an AABB from its min and max corners.
    ///
    /// Fails with [`GeometryError::InvertedCorners`] if any axis has
    /// `max <= min`.
    pub fn from_corners(min: DVec3, max: DVec3) -> Result<Self, GeometryError> {
        for axis in 0..3 {
            if max[axis] <= min[axis] {
                return Err(GeometryError::InvertedCorners {
                    axis,
                    min: min[axis],
                    max: max[axis],
                });
            }
        }
        Ok(Self {
            x: Interval::new(min.x, max.x),
            y: Interval::new(min.y, max.y),
            z: Interval::new(min.z, max.z),
        })
    }

    /// Compute the union bounding box over a collection of boxes.
    ///
    /// Fails with [`GeometryError::EmptyCollection`] when the collection is
    /// empty; no sensible bounding box exists.
    pub fn enclosing<I>(boxes: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = Aabb>,
    {
        boxes
            .into_iter()
            .reduce(|acc, b| acc.union(&b))
            .ok_or(GeometryError::EmptyCollection)
    }

    /// The smallest box covering both `self` and `other`.
    ///
    /// Returns `self` unchanged when it already contains `other`.
    pub fn union(&self, other: &Aabb) -> Aabb {
        if self.contains(other) {
            return *self;
        }
        Aabb {
            x: Interval::union(&self.x, &other.x),
            y: Interval::union(&self.y, &other.y),
            z: Interval::union(&self.z, &other.z),
        }
    }

    /// True if `other` lies entirely within `self`.
    pub fn contains(&self, other: &Aabb) -> bool {
        self.x.min <= other.x.min
            && other.x.max <= self.x.max
            && self.y.min <= other.y.min
            && other.y.max <= self.y.max
            && self.z.min <= other.z.min
            && other.z.max <= self.z.max
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// The min corner.
    pub fn min(&self) -> DVec3 {
        DVec3::new(self.x.min, self.y.min, self.z.min)
    }

    /// The max corner.
    pub fn max(&self) -> DVec3 {
        DVec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Test if a ray intersects this AABB within the given parameter window.
    ///
    /// Slab method: per axis, the ray enters the slab at
    /// `(min - origin) / direction` and exits at `(max - origin) / direction`;
    /// the box is hit iff the latest entry precedes the earliest exit. Zero
    /// direction components divide to ±infinity per IEEE semantics, which
    /// the per-axis comparison handles without special cases.
    pub fn hit(&self, ray: &Ray, mut window: Interval) -> bool {
        for a in 0..3 {
            let slab = self.axis(a);
            let inv = 1.0 / ray.direction[a];
            let mut t0 = (slab.min - ray.origin[a]) * inv;
            let mut t1 = (slab.max - ray.origin[a]) * inv;
            if inv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            window.min = t0.max(window.min);
            window.max = t1.min(window.max);
            if window.max <= window.min {
                return false;
            }
        }
        true
    }

    /// Returns the index (0=X, 1=Y, 2=Z) of the axis with the smallest
    /// extent. The spatial index splits on this axis so subtree boxes stay
    /// close to cubical.
    pub fn shortest_axis(&self) -> usize {
        let x_size = self.x.size();
        let y_size = self.y.size();
        let z_size = self.z.size();

        if x_size < y_size && x_size < z_size {
            0
        } else if y_size < z_size {
            1
        } else {
            2
        }
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> DVec3 {
        DVec3::new(
            (self.x.min + self.x.max) * 0.5,
            (self.y.min + self.y.max) * 0.5,
            (self.z.min + self.z.max) * 0.5,
        )
    }

    /// The identity element for [`Aabb::union`]: contains nothing, misses
    /// every ray. Aggregate containers use it as their fold seed; it is not
    /// a constructible box and never satisfies the corner invariant.
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}
