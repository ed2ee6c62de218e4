use bevy::prelude::*;
use bevy_inspector_egui::InspectorOptions;
use bevy_inspector_egui::inspector_options::ReflectInspectorOptions;
use bevy_inspector_egui::inspector_options::std_options::NumberDisplay;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;

use crate::input::ViewerAction;
use crate::input::toggle_active;

pub struct SunLightPlugin;

impl Plugin for SunLightPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            ResourceInspectorPlugin::<SunLightConfig>::default()
                .run_if(toggle_active(false, ViewerAction::SunLightInspector)),
        )
        .init_resource::<SunLightConfig>()
        .add_systems(Startup, spawn_sun_light)
        .add_systems(
            Update,
            update_sun_light.run_if(resource_changed::<SunLightConfig>),
        );
    }
}

/// The single directional light. It shines from `position` toward the origin,
/// so every planet is lit from the same side.
#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone)]
#[reflect(Resource, InspectorOptions)]
struct SunLightConfig {
    color:       Color,
    #[inspector(min = 0.0, max = 100_000.0, display = NumberDisplay::Slider)]
    illuminance: f32,
    position:    Vec3,
}

impl Default for SunLightConfig {
    fn default() -> Self {
        Self {
            color:       Color::WHITE,
            illuminance: 8_000.0,
            position:    Vec3::new(-2.0, 0.5, 1.5),
        }
    }
}

#[derive(Component)]
struct Sun;

fn spawn_sun_light(mut commands: Commands, config: Res<SunLightConfig>) {
    commands.spawn((
        Name::new("Sun"),
        Sun,
        DirectionalLight {
            color: config.color,
            illuminance: config.illuminance,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(config.position).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn update_sun_light(
    config: Res<SunLightConfig>,
    mut sun: Single<(&mut DirectionalLight, &mut Transform), With<Sun>>,
) {
    let (ref mut light, ref mut transform) = *sun;
    light.color = config.color;
    light.illuminance = config.illuminance;
    **transform = Transform::from_translation(config.position).looking_at(Vec3::ZERO, Vec3::Y);

    debug!(
        "sun light updated to {} lux from {}",
        config.illuminance, config.position
    );
}
