//! KD-tree acceleration structure.
//!
//! A binary space partition built once over the scene's primitives;
//! queries prune whole subtrees whose bounding box the ray misses.

use crate::{HitRecord, Hittable};
use glint_math::{Aabb, Interval, Ray};

/// Maximum primitives per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 4;

/// KD-tree node - either a branch with two children or a leaf with
/// primitives.
///
/// The tree is immutable after construction and holds exclusive ownership
/// of the primitives handed to [`KdTree::new`]; concurrent readers share
/// it freely.
pub enum KdTree {
    /// Internal node with two children.
    Branch {
        left: Box<KdTree>,
        right: Box<KdTree>,
        bbox: Aabb,
    },
    /// Leaf node with a small number of primitives.
    Leaf {
        objects: Vec<Box<dyn Hittable>>,
        bbox: Aabb,
    },
    /// Index over zero primitives: every query misses.
    Empty,
}

#[derive(Default)]
struct BuildStats {
    nodes: usize,
    leaves: usize,
    max_depth: usize,
}

impl KdTree {
    /// Build a KD-tree from a list of hittable objects.
    pub fn new(objects: Vec<Box<dyn Hittable>>) -> Self {
        if objects.is_empty() {
            log::warn!("kd-tree built over an empty scene; every query will miss");
            return KdTree::Empty;
        }

        let count = objects.len();
        let mut stats = BuildStats::default();
        let root = Self::build(objects, 0, &mut stats);
        log::info!(
            "kd-tree built: {} primitives, {} nodes ({} leaves), max depth {}",
            count,
            stats.nodes,
            stats.leaves,
            stats.max_depth
        );
        root
    }

    /// Recursive median-split construction.
    ///
    /// Splits on the node box's narrowest axis so subtree boxes stay close
    /// to cubical: objects are sorted by bounding-box centroid along that
    /// axis and divided at the median index.
    fn build(mut objects: Vec<Box<dyn Hittable>>, depth: usize, stats: &mut BuildStats) -> Self {
        stats.nodes += 1;
        stats.max_depth = stats.max_depth.max(depth);

        let bbox = objects
            .iter()
            .fold(Aabb::EMPTY, |acc, o| acc.union(&o.bounding_box()));

        if objects.len() <= LEAF_MAX_SIZE {
            stats.leaves += 1;
            return KdTree::Leaf { objects, bbox };
        }

        let axis = bbox.shortest_axis();
        objects.sort_unstable_by(|a, b| {
            let a_mid = a.bounding_box().centroid()[axis];
            let b_mid = b.bounding_box().centroid()[axis];
            a_mid.partial_cmp(&b_mid).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mid = objects.len() / 2;
        let right_objects = objects.split_off(mid);
        let left_objects = objects;

        KdTree::Branch {
            left: Box::new(Self::build(left_objects, depth + 1, stats)),
            right: Box::new(Self::build(right_objects, depth + 1, stats)),
            bbox,
        }
    }
}

impl Hittable for KdTree {
    fn hit<'a>(&'a self, ray: &Ray, window: Interval) -> Option<HitRecord<'a>> {
        match self {
            KdTree::Empty => None,

            KdTree::Leaf { objects, bbox } => {
                if !bbox.hit(ray, window) {
                    return None;
                }

                let mut closest = window.max;
                let mut best = None;
                for obj in objects {
                    if let Some(rec) = obj.hit(ray, Interval::new(window.min, closest)) {
                        closest = rec.t;
                        best = Some(rec);
                    }
                }
                best
            }

            KdTree::Branch { left, right, bbox } => {
                if !bbox.hit(ray, window) {
                    return None;
                }

                let left_hit = left.hit(ray, window);

                // Only search the right subtree up to the best hit so far;
                // any hit it returns is therefore the closer one.
                let right_max = left_hit.as_ref().map_or(window.max, |rec| rec.t);
                let right_hit = right.hit(ray, Interval::new(window.min, right_max));

                right_hit.or(left_hit)
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            KdTree::Empty => Aabb::EMPTY,
            KdTree::Leaf { bbox, .. } => *bbox,
            KdTree::Branch { bbox, .. } => *bbox,
        }
    }
}
