//! Orrery - an interactive 3D solar system viewer built with Bevy 0.18
//!
//! - One textured, layered mesh group per planet, driven by a RON table
//! - Eased camera flights between planets with orbit controls in between
//! - A seeded starfield that follows the camera
//! - Bevy Remote Protocol (BRP) support for debugging

mod asset_loader;
mod camera;
mod input;
mod planet;
mod schedule;
mod ui;
mod viewport;

use bevy::prelude::*;
#[cfg(target_arch = "wasm32")]
use bevy::window::PresentMode;
use bevy_brp_extras::BrpExtrasPlugin;
use bevy_inspector_egui::bevy_egui::EguiPlugin;

use crate::asset_loader::AssetLoaderPlugin;
use crate::camera::CameraPlugin;
use crate::input::InputPlugin;
use crate::planet::PlanetPlugin;
use crate::schedule::SchedulePlugin;
use crate::ui::UiPlugin;
use crate::viewport::ViewportPlugin;

fn main() {
    let mut app = App::new();

    // Get effective port from BrpExtrasPlugin to include in window title if non-default
    let brp_plugin = BrpExtrasPlugin::default();
    let (effective_port, _) = brp_plugin.get_effective_port();
    let window_title = if effective_port == bevy_brp_extras::DEFAULT_REMOTE_PORT {
        "orrery".to_string()
    } else {
        format!("orrery - {effective_port}")
    };

    #[cfg(not(target_arch = "wasm32"))]
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: window_title,
            ..default()
        }),
        ..default()
    }));

    #[cfg(target_arch = "wasm32")]
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: window_title,
            present_mode: PresentMode::AutoNoVsync,
            fit_canvas_to_parent: true,
            ..default()
        }),
        ..default()
    }));

    app.add_plugins((
        EguiPlugin::default(),
        AssetLoaderPlugin,
        brp_plugin,
        CameraPlugin,
        InputPlugin,
        PlanetPlugin,
        SchedulePlugin,
        UiPlugin,
        ViewportPlugin,
    ))
    .run();
}
