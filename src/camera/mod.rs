mod cameras;
mod config;
mod lights;
mod pan_orbit_ext;
mod stars;
mod transition;

use bevy::prelude::*;
pub use cameras::ViewerCamera;
use cameras::CamerasPlugin;
pub use config::CameraConfig;
use config::CameraConfigPlugin;
use lights::SunLightPlugin;
use stars::StarsPlugin;
pub use transition::CameraTransition;
use transition::TransitionPlugin;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(CameraConfigPlugin)
            .add_plugins(SunLightPlugin)
            .add_plugins(CamerasPlugin)
            .add_plugins(StarsPlugin)
            .add_plugins(TransitionPlugin);
    }
}
