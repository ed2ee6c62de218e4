use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

use crate::camera::CameraConfig;

/// Extension trait for `PanOrbitCamera` providing convenience methods.
pub trait PanOrbitCameraExt {
    /// Allows for precise control during animations.
    fn disable_interpolation(&mut self);

    /// Enables interpolation for smooth transitions.
    fn enable_interpolation(&mut self, camera_config: &CameraConfig);

    /// Places the camera at `position` looking at `focus`, applied this frame.
    fn look_from(&mut self, position: Vec3, focus: Vec3);
}

impl PanOrbitCameraExt for PanOrbitCamera {
    fn disable_interpolation(&mut self) {
        self.zoom_smoothness = 0.0;
        self.pan_smoothness = 0.0;
        self.orbit_smoothness = 0.0;
    }

    fn enable_interpolation(&mut self, camera_config: &CameraConfig) {
        self.zoom_smoothness = camera_config.zoom_smoothness;
        self.pan_smoothness = camera_config.pan_smoothness;
        self.orbit_smoothness = camera_config.orbit_smoothness;
    }

    fn look_from(&mut self, position: Vec3, focus: Vec3) {
        let Some(angles) = OrbitAngles::from_offset(position - focus) else {
            warn!("camera position {position} coincides with its focus, ignoring");
            return;
        };

        // set current and target together so nothing is left to interpolate
        self.focus = focus;
        self.target_focus = focus;
        self.radius = Some(angles.radius);
        self.target_radius = angles.radius;
        self.yaw = Some(angles.yaw);
        self.target_yaw = angles.yaw;
        self.pitch = Some(angles.pitch);
        self.target_pitch = angles.pitch;
        self.force_update = true;
    }
}

/// Orbit parameters describing a camera offset from its focus point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitAngles {
    pub radius: f32,
    pub yaw:    f32,
    pub pitch:  f32,
}

impl OrbitAngles {
    /// `None` when the offset is too short to define a direction
    pub fn from_offset(offset: Vec3) -> Option<Self> {
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return None;
        }
        let horizontal_dist = offset.x.hypot(offset.z);
        Some(Self {
            radius,
            yaw: offset.x.atan2(offset.z),
            pitch: offset.y.atan2(horizontal_dist),
        })
    }

    /// Inverse of `from_offset`, matching how the orbit camera positions itself
    pub fn offset(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(-self.pitch) * Vec3::Z * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Vec3, expected: Vec3) {
        assert!(
            actual.distance(expected) < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn offset_straight_back_is_zero_yaw_and_pitch() {
        let angles = OrbitAngles::from_offset(Vec3::new(0.0, 0.0, 3.0)).unwrap();

        assert!((angles.radius - 3.0).abs() < 1e-6);
        assert!(angles.yaw.abs() < 1e-6);
        assert!(angles.pitch.abs() < 1e-6);
    }

    #[test]
    fn camera_above_focus_has_positive_pitch() {
        let angles = OrbitAngles::from_offset(Vec3::new(0.0, 2.0, 2.0)).unwrap();
        assert!((angles.pitch - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn angles_reproduce_the_offset() {
        for offset in [
            Vec3::new(1.0, 2.0, 0.5),
            Vec3::new(-4.0, -1.0, 3.0),
            Vec3::new(0.0, 0.5, -6.0),
        ] {
            let angles = OrbitAngles::from_offset(offset).unwrap();
            assert_close(angles.offset(), offset);
        }
    }

    #[test]
    fn zero_offset_has_no_angles() {
        assert!(OrbitAngles::from_offset(Vec3::ZERO).is_none());
    }

    #[test]
    fn look_from_sets_current_and_target_values() {
        let mut pan_orbit = PanOrbitCamera::default();
        let focus = Vec3::new(50.0, 0.0, 0.0);
        let position = Vec3::new(50.0, 0.0, 2.2);

        pan_orbit.look_from(position, focus);

        assert_eq!(pan_orbit.focus, focus);
        assert_eq!(pan_orbit.target_focus, focus);
        assert_eq!(pan_orbit.radius, Some(pan_orbit.target_radius));
        assert!((pan_orbit.target_radius - 2.2).abs() < 1e-5);
        assert!(pan_orbit.force_update);
    }
}
