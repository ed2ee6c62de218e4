use std::ops::Range;

use bevy::camera::Exposure;
use bevy::color::palettes::tailwind;
use bevy::prelude::*;
use bevy_inspector_egui::inspector_options::std_options::NumberDisplay;
use bevy_inspector_egui::prelude::*;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;

use crate::input::ViewerAction;
use crate::input::toggle_active;

pub struct CameraConfigPlugin;

impl Plugin for CameraConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            ResourceInspectorPlugin::<CameraConfig>::default()
                .run_if(toggle_active(false, ViewerAction::CameraConfigInspector)),
        )
        .init_resource::<CameraConfig>()
        .add_plugins(
            ResourceInspectorPlugin::<TransitionConfig>::default()
                .run_if(toggle_active(false, ViewerAction::TransitionInspector)),
        )
        .init_resource::<TransitionConfig>()
        .add_plugins(
            ResourceInspectorPlugin::<StarConfig>::default()
                .run_if(toggle_active(false, ViewerAction::StarConfigInspector)),
        )
        .init_resource::<StarConfig>();
    }
}

#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone, Copy)]
#[reflect(Resource, InspectorOptions)]
pub struct CameraConfig {
    pub clear_color:               Color,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub bloom_intensity:           f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub bloom_low_frequency_boost: f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub bloom_high_pass_frequency: f32,
    /// brightness multiplier applied after tonemapping, 1.0 is the engine default
    #[inspector(min = 0.05, max = 2.0, display = NumberDisplay::Slider)]
    pub exposure:                  f32,
    /// vertical field of view in degrees
    #[inspector(min = 30.0, max = 120.0, display = NumberDisplay::Slider)]
    pub fov_degrees:               f32,
    pub near:                      f32,
    pub far:                       f32,
    /// orbit camera damping, 0.0 stops instantly
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub orbit_smoothness:          f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub pan_smoothness:            f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub zoom_smoothness:           f32,
    pub ambient_brightness:        f32,
    /// starting distance from the home planet
    pub initial_distance:          f32,
    /// starting distance when the window is narrower than `narrow_viewport_width`
    pub narrow_initial_distance:   f32,
    pub narrow_viewport_width:     f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            clear_color:               Color::from(tailwind::SLATE_950).darker(0.05),
            bloom_intensity:           0.3,
            bloom_low_frequency_boost: 0.5,
            bloom_high_pass_frequency: 0.5,
            exposure:                  0.6,
            fov_degrees:               75.0,
            near:                      0.1,
            far:                       1000.0,
            orbit_smoothness:          0.05,
            pan_smoothness:            0.05,
            zoom_smoothness:           0.05,
            ambient_brightness:        0.0,
            initial_distance:          3.0,
            narrow_initial_distance:   4.0,
            narrow_viewport_width:     600.0,
        }
    }
}

impl CameraConfig {
    /// Initial camera distance for a window of the given logical width
    pub fn initial_distance_for(&self, viewport_width: f32) -> f32 {
        if viewport_width < self.narrow_viewport_width {
            self.narrow_initial_distance
        } else {
            self.initial_distance
        }
    }

    /// Camera exposure scaling the engine default brightness by `exposure`.
    /// Non-positive values keep the default.
    pub fn exposure(&self) -> Exposure {
        let default = Exposure::default();
        if self.exposure <= 0.0 {
            return default;
        }
        Exposure {
            ev100: default.ev100 - self.exposure.log2(),
        }
    }

    pub const fn fov_radians(&self) -> f32 { self.fov_degrees.to_radians() }
}

#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone, Copy)]
#[reflect(Resource, InspectorOptions)]
pub struct TransitionConfig {
    /// fraction of the remaining distance covered each frame
    #[inspector(min = 0.01, max = 0.5, display = NumberDisplay::Slider)]
    pub lerp_factor:   f32,
    /// below this camera-to-target distance the transition snaps and ends
    #[inspector(min = 0.001, max = 1.0, display = NumberDisplay::Slider)]
    pub snap_distance: f32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            lerp_factor:   0.05,
            snap_distance: 0.05,
        }
    }
}

#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone)]
#[reflect(Resource, InspectorOptions)]
pub struct StarConfig {
    pub seed:                         u64,
    #[inspector(min = 0, max = 20_000)]
    pub star_count:                   usize,
    pub inner_radius:                 f32,
    pub outer_radius:                 f32,
    pub star_radius_min:              f32,
    pub star_radius_max:              f32,
    pub star_color:                   Range<f32>,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub star_color_white_probability: f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub star_color_white_start_ratio: f32,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            seed:                         0x5747_4152,
            star_count:                   5000,
            inner_radius:                 25.0,
            outer_radius:                 50.0,
            star_radius_min:              0.02,
            star_radius_max:              0.09,
            star_color:                   0.5..6.0,
            star_color_white_probability: 0.85,
            star_color_white_start_ratio: 0.7,
        }
    }
}
