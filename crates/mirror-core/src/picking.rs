use crate::camera::Camera;
use crate::scene::{HitTarget, SceneGraph};
use glam::{Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

/// World-space ray through pixel `(sx, sy)` of a `width` x `height` viewport.
pub fn screen_ray(camera: &Camera, sx: f32, sy: f32, width: f32, height: f32) -> Ray {
    let width = width.max(1.0);
    let height = height.max(1.0);
    let ndc_x = (2.0 * sx / width) - 1.0;
    let ndc_y = 1.0 - (2.0 * sy / height);
    let inv = camera.view_proj().inverse();
    let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let p1: Vec3 = p_far.truncate() / p_far.w;
    Ray {
        origin: camera.eye,
        dir: (p1 - camera.eye).normalize(),
    }
}

/// Distance along the ray to a double-sided disc, if hit in front of the origin.
#[inline]
pub fn ray_disc(ray: Ray, center: Vec3, normal: Vec3, radius: f32) -> Option<f32> {
    let denom = normal.dot(ray.dir);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = (center - ray.origin).dot(normal) / denom;
    if t < 0.0 {
        return None;
    }
    let hit = ray.origin + ray.dir * t;
    ((hit - center).length_squared() <= radius * radius).then_some(t)
}

/// Nearest hit target along the ray.
pub fn pick(graph: &SceneGraph, ray: Ray) -> Option<HitTarget> {
    let mut best = None::<(HitTarget, f32)>;
    for m in graph.hit_markers() {
        if let Some(t) = ray_disc(ray, m.center, m.normal, m.radius) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((m.target, t)),
            }
        }
    }
    best.map(|(target, _)| target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_disc_hit_and_miss() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            dir: Vec3::new(0.0, 0.0, -1.0),
        };
        assert_eq!(ray_disc(ray, Vec3::ZERO, Vec3::Z, 0.5), Some(5.0));
        assert_eq!(ray_disc(ray, Vec3::new(1.0, 0.0, 0.0), Vec3::Z, 0.5), None);
        // behind the origin
        assert_eq!(ray_disc(ray, Vec3::new(0.0, 0.0, 6.0), Vec3::Z, 0.5), None);
        // parallel
        assert_eq!(ray_disc(ray, Vec3::ZERO, Vec3::X, 0.5), None);
    }

    #[test]
    fn center_pixel_ray_points_at_target() {
        let cam = Camera {
            eye: Vec3::new(5.0, 0.0, 0.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.5,
            fovy_radians: 0.7,
            znear: 0.1,
            zfar: 100.0,
        };
        let ray = screen_ray(&cam, 300.0, 200.0, 600.0, 400.0);
        assert!((ray.dir - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-3);
    }
}
