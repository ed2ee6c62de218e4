use bevy::camera::Exposure;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::light::AmbientLight;
use bevy::post_process::bloom::Bloom;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;
use bevy_panorbit_camera::PanOrbitCameraPlugin;

use super::config::CameraConfig;
use super::pan_orbit_ext::PanOrbitCameraExt;
use super::transition::CameraTransition;
use crate::planet::PlanetConfig;
use crate::planet::PlanetTable;
use crate::viewport::ViewportSize;

pub struct CamerasPlugin;

impl Plugin for CamerasPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PanOrbitCameraPlugin)
            .add_systems(Startup, spawn_viewer_camera)
            .add_systems(
                Update,
                (
                    update_bloom_settings,
                    update_clear_color,
                    update_exposure,
                    update_smoothing,
                )
                    .run_if(resource_changed::<CameraConfig>),
            );
    }
}

#[derive(Component, Reflect)]
#[reflect(Component)]
pub struct ViewerCamera;

// the camera starts in front of the home planet, a little further out on
// narrow windows so the whole body fits
fn spawn_viewer_camera(
    mut commands: Commands,
    camera_config: Res<CameraConfig>,
    planet_config: Res<PlanetConfig>,
    table: Res<PlanetTable>,
    viewport: Res<ViewportSize>,
) {
    let distance = camera_config.initial_distance_for(viewport.0.x);
    let focus = table
        .home(&planet_config.default_planet)
        .map_or(Vec3::ZERO, |record| record.position);

    let mut pan_orbit = PanOrbitCamera::default();
    pan_orbit.enable_interpolation(&camera_config);
    pan_orbit.look_from(focus + Vec3::Z * distance, focus);

    debug!("spawning viewer camera {distance} units in front of {focus}");

    commands.spawn((
        Name::new("Viewer Camera"),
        ViewerCamera,
        pan_orbit,
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: camera_config.fov_radians(),
            near: camera_config.near,
            far: camera_config.far,
            ..default()
        }),
        Tonemapping::AcesFitted,
        camera_config.exposure(),
        get_bloom_settings(&camera_config),
        // per-camera override of the global ambient light so the night side
        // of a planet stays dark
        AmbientLight {
            brightness: camera_config.ambient_brightness,
            ..default()
        },
        Transform::from_translation(focus + Vec3::Z * distance).looking_at(focus, Vec3::Y),
    ));
}

// propagate bloom settings back to the camera
fn update_bloom_settings(
    camera_config: Res<CameraConfig>,
    mut bloom: Single<&mut Bloom, With<ViewerCamera>>,
) {
    **bloom = get_bloom_settings(&camera_config);
}

fn get_bloom_settings(camera_config: &CameraConfig) -> Bloom {
    let mut new_bloom_settings = Bloom::NATURAL;

    new_bloom_settings.intensity = camera_config.bloom_intensity;
    new_bloom_settings.low_frequency_boost = camera_config.bloom_low_frequency_boost;
    new_bloom_settings.high_pass_frequency = camera_config.bloom_high_pass_frequency;
    new_bloom_settings
}

// this allows us to use Inspector reflection to manually update ClearColor to
// different values while the viewer is running
fn update_clear_color(camera_config: Res<CameraConfig>, mut clear_color: ResMut<ClearColor>) {
    clear_color.0 = camera_config.clear_color;
}

fn update_exposure(
    camera_config: Res<CameraConfig>,
    mut exposure: Single<&mut Exposure, With<ViewerCamera>>,
) {
    **exposure = camera_config.exposure();
}

// a running transition owns the smoothing values and restores them itself
fn update_smoothing(
    camera_config: Res<CameraConfig>,
    transition: Res<CameraTransition>,
    mut pan_orbit: Single<&mut PanOrbitCamera, With<ViewerCamera>>,
) {
    if !transition.is_animating {
        pan_orbit.enable_interpolation(&camera_config);
    }
}
