//! Keeps the camera projection matched to the primary window

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy::window::WindowResized;

use crate::camera::ViewerCamera;

pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewportSize>()
            .register_type::<ViewportSize>()
            // the camera reads the size at Startup to pick its initial distance
            .add_systems(PreStartup, init_viewport_size)
            .add_systems(PreUpdate, track_window_resize);
    }
}

/// Logical size of the primary window
#[derive(Resource, Reflect, Debug, Clone, Copy, PartialEq, Default)]
#[reflect(Resource)]
pub struct ViewportSize(pub Vec2);

/// Sets a perspective projection's aspect ratio to `size.x / size.y`.
/// Zero-height sizes, as reported while minimized, are skipped.
pub fn apply_viewport(projection: &mut Projection, size: Vec2) -> bool {
    if size.y <= 0.0 {
        return false;
    }
    match projection {
        Projection::Perspective(perspective) => {
            perspective.aspect_ratio = size.x / size.y;
            true
        },
        _ => false,
    }
}

fn init_viewport_size(
    window: Option<Single<&Window, With<PrimaryWindow>>>,
    mut viewport: ResMut<ViewportSize>,
) {
    if let Some(window) = window {
        viewport.0 = window.size();
    }
}

fn track_window_resize(
    mut resized: MessageReader<WindowResized>,
    primary: Option<Single<Entity, With<PrimaryWindow>>>,
    mut viewport: ResMut<ViewportSize>,
    mut projection: Option<Single<&mut Projection, With<ViewerCamera>>>,
) {
    let Some(primary) = primary.map(|primary| *primary) else {
        resized.clear();
        return;
    };

    for event in resized.read().filter(|event| event.window == primary) {
        let size = Vec2::new(event.width, event.height);
        viewport.set_if_neq(ViewportSize(size));

        if let Some(projection) = projection.as_deref_mut()
            && !apply_viewport(projection, size)
        {
            debug!("skipping projection update for {}x{}", event.width, event.height);
        }
    }
}
