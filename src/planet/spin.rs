use bevy::prelude::*;

use crate::schedule::FrameSet;

pub struct SpinPlugin;

impl Plugin for SpinPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Spin>()
            .add_systems(Update, spin_layers.in_set(FrameSet::Animate));
    }
}

/// Rotation about the local Y axis, in radians per frame. Every layer of every
/// planet spins, visible or not.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct Spin {
    pub speed: f32,
}

fn spin_layers(mut layers: Query<(&Spin, &mut Transform)>) {
    for (spin, mut transform) in &mut layers {
        transform.rotate_y(spin.speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_accumulate_rotation_each_frame() {
        let mut app = App::new();
        app.add_systems(Update, spin_layers);

        let clouds = app
            .world_mut()
            .spawn((Spin { speed: 0.0023 }, Transform::default()))
            .id();
        let still = app
            .world_mut()
            .spawn((Spin { speed: 0.0 }, Transform::default()))
            .id();

        for _ in 0..100 {
            app.update();
        }

        let (axis, angle) = app
            .world()
            .get::<Transform>(clouds)
            .unwrap()
            .rotation
            .to_axis_angle();
        assert!((axis - Vec3::Y).length() < 1e-4);
        assert!((angle - 0.23).abs() < 1e-4);

        assert_eq!(
            app.world().get::<Transform>(still).unwrap().rotation,
            Quat::IDENTITY
        );
    }

    #[test]
    fn scale_is_untouched_by_spin() {
        let mut app = App::new();
        app.add_systems(Update, spin_layers);

        let layer = app
            .world_mut()
            .spawn((Spin { speed: 0.1 }, Transform::from_scale(Vec3::splat(1.003))))
            .id();
        app.update();

        let transform = app.world().get::<Transform>(layer).unwrap();
        assert_eq!(transform.scale, Vec3::splat(1.003));
    }
}
