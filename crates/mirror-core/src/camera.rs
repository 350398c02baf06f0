//! Camera pose and orbit/pan/zoom control.
//!
//! The orbit pose is spherical around a target: `polar` is measured from +Y
//! and `azimuth` around Y starting at +Z. View presets snap (or ease) the
//! angles only; distance and target stay under the user's control.

use crate::constants::{
    camera_target_vec3, CAMERA_DISTANCE, CAMERA_FOV_DEG, CAMERA_ZFAR, CAMERA_ZNEAR,
};
use glam::{Mat4, Vec3};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};
use std::str::FromStr;
use std::time::Duration;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewPreset {
    Top,
    Left,
    Right,
    Front,
}

impl ViewPreset {
    pub const ALL: [ViewPreset; 4] = [
        ViewPreset::Top,
        ViewPreset::Left,
        ViewPreset::Right,
        ViewPreset::Front,
    ];

    /// `(azimuth, polar)` of the preset. The mirror faces +X.
    pub fn angles(self) -> (f32, f32) {
        match self {
            ViewPreset::Top => (FRAC_PI_2, 0.35),
            ViewPreset::Left => (FRAC_PI_2 + FRAC_PI_4, FRAC_PI_2),
            ViewPreset::Right => (FRAC_PI_4, FRAC_PI_2),
            ViewPreset::Front => (FRAC_PI_2, FRAC_PI_2),
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            ViewPreset::Top => "top",
            ViewPreset::Left => "left",
            ViewPreset::Right => "right",
            ViewPreset::Front => "front",
        }
    }
}

impl FromStr for ViewPreset {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewPreset::ALL
            .iter()
            .copied()
            .find(|v| v.id() == s)
            .ok_or(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_distance: 1.0,
            max_distance: 10.0,
            min_polar: 0.1,
            max_polar: PI / 1.8,
            rotate_speed: 0.7,
            zoom_speed: 0.7,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitPose {
    pub target: Vec3,
    pub distance: f32,
    pub azimuth: f32,
    pub polar: f32,
}

impl OrbitPose {
    pub fn eye(&self) -> Vec3 {
        let (sp, cp) = self.polar.sin_cos();
        let (sa, ca) = self.azimuth.sin_cos();
        self.target + Vec3::new(sp * sa, cp, sp * ca) * self.distance
    }
}

/// Wrap an angle difference into `(-PI, PI]`.
#[inline]
fn wrap_angle(a: f32) -> f32 {
    let r = (a + PI).rem_euclid(TAU) - PI;
    if r <= -PI {
        r + TAU
    } else {
        r
    }
}

#[inline]
fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ViewTransition {
    from: OrbitPose,
    to_azimuth: f32,
    to_polar: f32,
    elapsed: f32,
    duration: f32,
}

#[derive(Clone, Debug)]
pub struct OrbitController {
    pose: OrbitPose,
    limits: OrbitLimits,
    fovy_radians: f32,
    transition: Option<ViewTransition>,
}

impl Default for OrbitController {
    fn default() -> Self {
        let (azimuth, polar) = ViewPreset::Front.angles();
        Self {
            pose: OrbitPose {
                target: camera_target_vec3(),
                distance: CAMERA_DISTANCE,
                azimuth,
                polar,
            },
            limits: OrbitLimits::default(),
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            transition: None,
        }
    }
}

impl OrbitController {
    pub fn new(limits: OrbitLimits) -> Self {
        let mut c = Self {
            limits,
            ..Self::default()
        };
        c.clamp_pose();
        c
    }

    pub fn pose(&self) -> OrbitPose {
        self.pose
    }

    pub fn limits(&self) -> &OrbitLimits {
        &self.limits
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    fn clamp_pose(&mut self) {
        self.pose.polar = self
            .pose
            .polar
            .clamp(self.limits.min_polar, self.limits.max_polar);
        self.pose.distance = self
            .pose
            .distance
            .clamp(self.limits.min_distance, self.limits.max_distance);
        self.pose.azimuth = wrap_angle(self.pose.azimuth);
    }

    /// Drag-orbit by a pointer delta in pixels over a viewport of `viewport_h` pixels.
    pub fn rotate(&mut self, dx_px: f32, dy_px: f32, viewport_h: f32) {
        self.transition = None;
        let h = viewport_h.max(1.0);
        self.pose.azimuth -= TAU * dx_px / h * self.limits.rotate_speed;
        self.pose.polar -= TAU * dy_px / h * self.limits.rotate_speed;
        self.clamp_pose();
    }

    /// Move the target in the view plane so the scene follows the pointer.
    pub fn pan(&mut self, dx_px: f32, dy_px: f32, viewport_h: f32) {
        self.transition = None;
        let eye = self.pose.eye();
        let forward = (self.pose.target - eye).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        let world_per_px =
            2.0 * self.pose.distance * (self.fovy_radians * 0.5).tan() / viewport_h.max(1.0);
        self.pose.target += (-right * dx_px + up * dy_px) * world_per_px;
    }

    /// Positive steps move closer.
    pub fn zoom(&mut self, steps: f32) {
        self.transition = None;
        let scale = 0.95_f32.powf(self.limits.zoom_speed);
        self.pose.distance *= scale.powf(steps);
        self.clamp_pose();
    }

    /// Snap the view angles to `preset`, dropping any running transition.
    pub fn apply_view(&mut self, preset: ViewPreset) {
        let (azimuth, polar) = preset.angles();
        self.transition = None;
        self.pose.azimuth = azimuth;
        self.pose.polar = polar;
        self.clamp_pose();
    }

    /// Ease toward `preset` over `duration`. Any user input cancels the motion.
    pub fn animate_view(&mut self, preset: ViewPreset, duration: Duration) {
        let secs = duration.as_secs_f32();
        if secs <= 0.0 {
            self.apply_view(preset);
            return;
        }
        let (azimuth, polar) = preset.angles();
        self.transition = Some(ViewTransition {
            from: self.pose,
            to_azimuth: azimuth,
            to_polar: polar.clamp(self.limits.min_polar, self.limits.max_polar),
            elapsed: 0.0,
            duration: secs,
        });
    }

    /// Advance a running transition. Returns `true` while still moving.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(mut tr) = self.transition else {
            return false;
        };
        tr.elapsed += dt.as_secs_f32();
        let t = smoothstep(tr.elapsed / tr.duration);
        let d_az = wrap_angle(tr.to_azimuth - tr.from.azimuth);
        self.pose.azimuth = tr.from.azimuth + d_az * t;
        self.pose.polar = tr.from.polar + (tr.to_polar - tr.from.polar) * t;
        if tr.elapsed >= tr.duration {
            self.transition = None;
            self.clamp_pose();
            false
        } else {
            self.transition = Some(tr);
            true
        }
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.pose.eye(),
            target: self.pose.target,
            up: Vec3::Y,
            aspect: aspect.max(1e-4),
            fovy_radians: self.fovy_radians,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_eye_matches_front_view() {
        let c = OrbitController::default();
        let eye = c.pose().eye();
        assert!((eye - Vec3::new(CAMERA_DISTANCE, 1.1, 0.0)).length() < 1e-4);
    }

    #[test]
    fn polar_is_bounded() {
        let mut c = OrbitController::default();
        c.rotate(0.0, 100_000.0, 800.0);
        assert!(c.pose().polar >= c.limits().min_polar - 1e-6);
        c.rotate(0.0, -100_000.0, 800.0);
        assert!(c.pose().polar <= c.limits().max_polar + 1e-6);
    }

    #[test]
    fn zoom_is_bounded() {
        let mut c = OrbitController::default();
        c.zoom(1000.0);
        assert_eq!(c.pose().distance, c.limits().min_distance);
        c.zoom(-1000.0);
        assert_eq!(c.pose().distance, c.limits().max_distance);
    }

    #[test]
    fn wrap_angle_stays_in_range() {
        for a in [-10.0_f32, -PI, 0.0, PI, 3.5, 10.0] {
            let w = wrap_angle(a);
            assert!(w > -PI - 1e-6 && w <= PI + 1e-6, "{a} -> {w}");
        }
    }

    #[test]
    fn animated_view_reaches_preset_and_can_be_cancelled() {
        let mut c = OrbitController::default();
        c.animate_view(ViewPreset::Right, Duration::from_millis(200));
        assert!(c.tick(Duration::from_millis(100)));
        assert!(!c.tick(Duration::from_millis(150)));
        let (az, polar) = ViewPreset::Right.angles();
        assert!((c.pose().azimuth - az).abs() < 1e-5);
        assert!((c.pose().polar - polar).abs() < 1e-5);

        c.animate_view(ViewPreset::Left, Duration::from_secs(1));
        c.tick(Duration::from_millis(100));
        let mid = c.pose();
        c.zoom(1.0);
        assert!(!c.is_animating());
        assert!((c.pose().azimuth - mid.azimuth).abs() < 1e-6);
    }

    #[test]
    fn presets_parse_from_ids() {
        for v in ViewPreset::ALL {
            assert_eq!(v.id().parse::<ViewPreset>(), Ok(v));
        }
    }
}
