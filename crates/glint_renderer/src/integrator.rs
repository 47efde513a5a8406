//! Path integrator: radiance estimation along a bounced ray path.

use crate::{Color, Hittable};
use glint_math::{Interval, Ray};
use rand::RngCore;

/// Default bounce cap. An engineering cutoff, not a physical one: it
/// trades a little energy loss in very long paths for guaranteed
/// termination.
pub const MAX_DEPTH: u32 = 50;

/// Lower bound of every hit query. Scattered rays start exactly on a
/// surface; accepting hits closer than this re-intersects the origin
/// surface and produces shadow acne.
const T_MIN: f64 = 0.001;

/// Estimate the color seen along a ray.
///
/// Written as a loop rather than recursion: each bounce folds the
/// material's attenuation into a running throughput, so the depth cap can
/// never grow the stack. A ray that escapes the scene is shaded by the sky
/// gradient; absorption or an exhausted bounce budget yields black.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    max_depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut throughput = Color::ONE;
    let mut current = *ray;

    for _ in 0..max_depth {
        match world.hit(&current, Interval::new(T_MIN, f64::INFINITY)) {
            Some(rec) => match rec.material.scatter(&current, &rec, rng) {
                Some(scatter) => {
                    throughput *= scatter.attenuation;
                    current = scatter.scattered;
                }
                None => return Color::ZERO,
            },
            None => return throughput * sky_gradient(&current),
        }
    }

    // Bounce budget exhausted
    Color::ZERO
}

/// Background term: vertical gradient between white and sky blue.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction.normalize();
    let t = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - t) * white + t * blue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KdTree, Lambertian, Metal, Sphere};
    use glint_math::DVec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sky_gradient_extremes() {
        let up = Ray::new(DVec3::ZERO, DVec3::new(0.0, 1.0, 0.0));
        assert_eq!(sky_gradient(&up), Color::new(0.5, 0.7, 1.0));

        let down = Ray::new(DVec3::ZERO, DVec3::new(0.0, -1.0, 0.0));
        assert_eq!(sky_gradient(&down), Color::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_miss_returns_sky() {
        let world = KdTree::new(vec![]);
        let mut rng = StdRng::seed_from_u64(3);

        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 1.0, 0.0));
        assert_eq!(
            ray_color(&ray, &world, MAX_DEPTH, &mut rng),
            Color::new(0.5, 0.7, 1.0)
        );
    }

    #[test]
    fn test_mirror_corridor_terminates_black() {
        // Two perfect mirrors face each other; a ray fired along their
        // axis bounces forever. The bounce cap must end the path at exact
        // black without unbounded recursion.
        let mirror = || Metal::new(Color::new(1.0, 1.0, 1.0), 0.0);
        let world = KdTree::new(vec![
            Box::new(Sphere::new(DVec3::new(0.0, 0.0, 10.0), 1.0, mirror()).unwrap()) as _,
            Box::new(Sphere::new(DVec3::new(0.0, 0.0, -10.0), 1.0, mirror()).unwrap()) as _,
        ]);
        let mut rng = StdRng::seed_from_u64(5);

        let ray = Ray::new(DVec3::new(0.0, 0.0, 0.0), DVec3::new(0.0, 0.0, 1.0));
        assert_eq!(ray_color(&ray, &world, MAX_DEPTH, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_absorbed_path_is_black() {
        // A mirror hit from behind reflects into the surface and absorbs.
        let world = KdTree::new(vec![Box::new(
            Sphere::new(
                DVec3::new(0.0, 0.0, -5.0),
                4.0,
                Metal::new(Color::ONE, 0.0),
            )
            .unwrap(),
        ) as _]);
        let mut rng = StdRng::seed_from_u64(7);

        // Origin inside the sphere: the exit hit sees the ray leaving
        // along the outward normal.
        let ray = Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::new(0.0, 0.0, 1.0));
        assert_eq!(ray_color(&ray, &world, MAX_DEPTH, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_diffuse_bounce_attenuates_sky() {
        let world = KdTree::new(vec![Box::new(
            Sphere::new(
                DVec3::new(0.0, 0.0, -2.0),
                0.5,
                Lambertian::new(Color::splat(0.5)),
            )
            .unwrap(),
        ) as _]);
        let mut rng = StdRng::seed_from_u64(11);

        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let color = ray_color(&ray, &world, MAX_DEPTH, &mut rng);

        // Whatever the path did, the first bounce halved the radiance and
        // the sky never exceeds one per channel.
        assert!(color.max_element() <= 0.5 + 1e-12);
        assert!(color.min_element() >= 0.0);
    }
}
