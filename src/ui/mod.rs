//! On-screen panel with the selected planet's facts and a button per planet
mod buttons;
mod panel;

use bevy::prelude::*;

use crate::planet::SelectedPlanet;
use crate::planet::apply_selection;
use crate::schedule::FrameSet;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (panel::spawn_info_panel, buttons::spawn_planet_buttons),
        )
        .add_systems(
            Update,
            buttons::select_from_buttons.in_set(FrameSet::UserInput),
        )
        .add_systems(
            Update,
            (
                panel::refresh_info_panel.run_if(resource_changed::<SelectedPlanet>),
                buttons::style_planet_buttons,
            )
                .in_set(FrameSet::Selection)
                .after(apply_selection),
        );
    }
}
