//! Eased camera flight toward the selected planet. Each frame the camera and
//! its orbit focus cover a fixed fraction of the remaining distance, then snap
//! onto the target once close enough.

use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

use super::config::CameraConfig;
use super::config::TransitionConfig;
use super::pan_orbit_ext::PanOrbitCameraExt;
use crate::schedule::FrameSet;

pub struct TransitionPlugin;

impl Plugin for TransitionPlugin {
    fn build(&self, app: &mut App) {
        // Update always precedes the orbit camera's PostUpdate systems, so
        // the pose written here is applied in the same frame
        app.init_resource::<CameraTransition>().add_systems(
            Update,
            advance_camera_transition.in_set(FrameSet::Camera),
        );
    }
}

/// Where the camera is and what it orbits around
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub focus:    Vec3,
}

#[derive(Resource, Reflect, Debug, Clone, Copy, PartialEq, Default)]
#[reflect(Resource)]
pub struct CameraTransition {
    pub camera_target: Vec3,
    pub focus_target:  Vec3,
    pub is_animating:  bool,
}

impl CameraTransition {
    /// Starts (or redirects) a transition. The newest target always wins.
    pub const fn retarget(&mut self, camera_target: Vec3, focus_target: Vec3) {
        self.camera_target = camera_target;
        self.focus_target = focus_target;
        self.is_animating = true;
    }

    /// Advances `pose` by one frame. Returns it unchanged when idle.
    pub fn step(&mut self, pose: CameraPose, config: &TransitionConfig) -> CameraPose {
        if !self.is_animating {
            return pose;
        }

        let position = pose.position.lerp(self.camera_target, config.lerp_factor);
        let focus = pose.focus.lerp(self.focus_target, config.lerp_factor);

        // a fractional lerp never lands exactly, so finish by snapping
        if position.distance(self.camera_target) < config.snap_distance {
            self.is_animating = false;
            return CameraPose {
                position: self.camera_target,
                focus:    self.focus_target,
            };
        }

        CameraPose { position, focus }
    }
}

fn advance_camera_transition(
    mut transition: ResMut<CameraTransition>,
    transition_config: Res<TransitionConfig>,
    camera_config: Res<CameraConfig>,
    camera: Single<(&mut PanOrbitCamera, &Transform)>,
) {
    if !transition.is_animating {
        return;
    }

    let (mut pan_orbit, transform) = camera.into_inner();
    let pose = CameraPose {
        position: transform.translation,
        focus:    pan_orbit.target_focus,
    };

    let next = transition.step(pose, &transition_config);

    pan_orbit.disable_interpolation();
    pan_orbit.look_from(next.position, next.focus);

    if !transition.is_animating {
        pan_orbit.enable_interpolation(&camera_config);
        debug!(
            "camera transition finished at {} looking at {}",
            next.position, next.focus
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: CameraPose = CameraPose {
        position: Vec3::new(0.0, 0.0, 3.0),
        focus:    Vec3::ZERO,
    };

    fn run_to_completion(
        transition: &mut CameraTransition,
        mut pose: CameraPose,
        config: &TransitionConfig,
    ) -> (CameraPose, usize) {
        let mut steps = 0;
        while transition.is_animating {
            pose = transition.step(pose, config);
            steps += 1;
            assert!(steps < 10_000, "transition never converged");
        }
        (pose, steps)
    }

    #[test]
    fn idle_transition_leaves_pose_alone() {
        let mut transition = CameraTransition::default();
        let pose = transition.step(START, &TransitionConfig::default());

        assert_eq!(pose, START);
        assert!(!transition.is_animating);
    }

    #[test]
    fn each_step_moves_five_percent_of_the_remaining_distance() {
        let mut transition = CameraTransition::default();
        transition.retarget(Vec3::new(0.0, 0.0, 13.0), Vec3::new(10.0, 0.0, 0.0));

        let pose = transition.step(START, &TransitionConfig::default());

        assert!((pose.position.z - 3.5).abs() < 1e-5);
        assert!((pose.focus.x - 0.5).abs() < 1e-5);
        assert!(transition.is_animating);
    }

    #[test]
    fn distance_strictly_decreases_until_snap() {
        let config = TransitionConfig::default();
        let target = Vec3::new(1.0, 2.0, 0.5);
        let mut transition = CameraTransition::default();
        transition.retarget(target, Vec3::ZERO);

        let mut pose = START;
        let mut distance = pose.position.distance(target);
        while transition.is_animating {
            pose = transition.step(pose, &config);
            let next_distance = pose.position.distance(target);
            assert!(next_distance < distance);
            distance = next_distance;
        }

        assert_eq!(pose.position, target);
        assert_eq!(pose.focus, Vec3::ZERO);
    }

    #[test]
    fn convergence_is_deterministic_and_exact() {
        let config = TransitionConfig::default();
        let target = Vec3::new(1.0, 2.0, 0.5);
        let focus_target = Vec3::new(0.5, 0.5, 0.0);

        let mut first = CameraTransition::default();
        first.retarget(target, focus_target);
        let (pose, steps) = run_to_completion(&mut first, START, &config);

        let mut second = CameraTransition::default();
        second.retarget(target, focus_target);
        let (_, repeat_steps) = run_to_completion(&mut second, START, &config);

        // initial distance is about 3.35, and 0.95^n * 3.35 drops below 0.05 near n = 82
        assert_eq!(steps, repeat_steps);
        assert!((80..=84).contains(&steps), "took {steps} steps");
        assert_eq!(pose.position, target);
        assert_eq!(pose.focus, focus_target);
        assert!(!first.is_animating);
    }

    #[test]
    fn newer_target_supersedes_the_old_one() {
        let config = TransitionConfig::default();
        let mut transition = CameraTransition::default();
        transition.retarget(Vec3::new(100.0, 0.0, 3.0), Vec3::new(100.0, 0.0, 0.0));

        let mut pose = START;
        for _ in 0..10 {
            pose = transition.step(pose, &config);
        }

        transition.retarget(Vec3::new(-50.0, 0.0, 3.0), Vec3::new(-50.0, 0.0, 0.0));
        let (pose, _) = run_to_completion(&mut transition, pose, &config);

        assert_eq!(pose.position, Vec3::new(-50.0, 0.0, 3.0));
        assert_eq!(pose.focus, Vec3::new(-50.0, 0.0, 0.0));
    }

    #[test]
    fn start_within_snap_distance_finishes_in_one_step() {
        let mut transition = CameraTransition::default();
        transition.retarget(Vec3::new(0.0, 0.0, 3.01), Vec3::ZERO);

        let pose = transition.step(START, &TransitionConfig::default());

        assert_eq!(pose.position, Vec3::new(0.0, 0.0, 3.01));
        assert!(!transition.is_animating);
    }
}
