mod builder;
mod record;
mod scene;
mod selection;
mod spin;

use bevy::prelude::*;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;
use builder::Planet;
pub use builder::PlanetConfig;
pub use record::InfoKey;
pub use record::PLANETS_RON;
pub use record::PlanetRecord;
pub use record::PlanetTable;
pub use scene::SelectedPlanet;
pub use selection::SelectPlanet;
pub use selection::apply_selection;

use crate::input::ViewerAction;
use crate::input::toggle_active;

pub struct PlanetPlugin;

impl Plugin for PlanetPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            ResourceInspectorPlugin::<PlanetConfig>::default()
                .run_if(toggle_active(false, ViewerAction::PlanetConfigInspector)),
        )
        .init_resource::<PlanetConfig>()
        .register_type::<Planet>()
        .add_plugins((
            scene::ScenePlugin,
            selection::SelectionPlugin,
            spin::SpinPlugin,
        ));
    }
}
