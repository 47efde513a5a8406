// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod error;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use error::GeometryError;
pub use interval::Interval;
pub use ray::Ray;
