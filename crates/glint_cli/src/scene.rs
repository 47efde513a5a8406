//! Scene population: the randomized sphere field.

use glint_renderer::{
    gen_f64, Color, DVec3, Dielectric, GeometryError, Hittable, KdTree, Lambertian, Metal,
    Sphere,
};
use rand::RngCore;

/// Build the classic randomized scene: a huge matte ground sphere, a
/// 22x22 jittered grid of small spheres with randomized materials, and
/// three large hero spheres, all indexed into a KD-tree.
pub fn random_scene(rng: &mut dyn RngCore) -> Result<KdTree, GeometryError> {
    let mut objects: Vec<Box<dyn Hittable>> = Vec::new();

    objects.push(Box::new(Sphere::new(
        DVec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Lambertian::new(Color::splat(0.5)),
    )?));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f64(rng);
            let center = DVec3::new(
                a as f64 + 0.9 * gen_f64(rng),
                0.2,
                b as f64 + 0.9 * gen_f64(rng),
            );

            // Keep the hero spheres' spot clear.
            if center.distance(DVec3::new(4.0, 0.2, 0.0)) <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                let albedo = Color::new(
                    gen_f64(rng) * gen_f64(rng),
                    gen_f64(rng) * gen_f64(rng),
                    gen_f64(rng) * gen_f64(rng),
                );
                objects.push(Box::new(Sphere::new(
                    center,
                    0.2,
                    Lambertian::new(albedo),
                )?));
            } else if choose_mat < 0.95 {
                let albedo = Color::new(
                    0.5 * (1.0 + gen_f64(rng)),
                    0.5 * (1.0 + gen_f64(rng)),
                    0.5 * (1.0 + gen_f64(rng)),
                );
                let fuzz = gen_f64(rng);
                objects.push(Box::new(Sphere::new(center, 0.2, Metal::new(albedo, fuzz))?));
            } else {
                objects.push(Box::new(Sphere::new(center, 0.2, Dielectric::new(1.5))?));
            }
        }
    }

    objects.push(Box::new(Sphere::new(
        DVec3::new(0.0, 1.0, 0.0),
        1.0,
        Dielectric::new(1.5),
    )?));
    objects.push(Box::new(Sphere::new(
        DVec3::new(-4.0, 1.0, 0.0),
        1.0,
        Lambertian::new(Color::new(0.4, 0.2, 0.1)),
    )?));
    objects.push(Box::new(Sphere::new(
        DVec3::new(4.0, 1.0, 0.0),
        1.0,
        Metal::new(Color::new(0.7, 0.6, 0.5), 0.0),
    )?));

    log::info!("scene populated with {} spheres", objects.len());
    Ok(KdTree::new(objects))
}
