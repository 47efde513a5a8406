use thiserror::Error;

/// Errors raised by geometry construction.
///
/// These all fail fast at scene-build time; silently repairing malformed
/// bounds would mask scene-authoring bugs, so nothing here is clamped.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// Box corners are inverted or degenerate on some axis.
    #[error("inverted bounding box corners on axis {axis}: min {min} >= max {max}")]
    InvertedCorners { axis: usize, min: f64, max: f64 },

    /// No bounding box exists for an empty collection.
    #[error("cannot compute a bounding box over an empty collection")]
    EmptyCollection,

    /// Sphere radii must be strictly positive.
    #[error("sphere radius must be positive, got {0}")]
    NonPositiveRadius(f64),
}
