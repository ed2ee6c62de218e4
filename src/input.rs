//! Keyboard actions for the viewer and the run conditions built on them
use bevy::prelude::*;
use leafwing_input_manager::prelude::*;
use strum::EnumIter;
use strum::IntoEnumIterator;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        // global actions aren't attached to any entity so they live in a resource
        app.add_plugins(InputManagerPlugin::<ViewerAction>::default())
            .init_resource::<ActionState<ViewerAction>>()
            .insert_resource(ViewerAction::generate_input_map());
    }
}

#[derive(Actionlike, EnumIter, PartialEq, Eq, Clone, Copy, Hash, Debug, Reflect)]
pub enum ViewerAction {
    CameraConfigInspector,
    HomePlanet,
    NextPlanet,
    PlanetConfigInspector,
    PreviousPlanet,
    StarConfigInspector,
    SunLightInspector,
    TransitionInspector,
}

impl ViewerAction {
    pub fn generate_input_map() -> InputMap<Self> {
        Self::iter().fold(InputMap::default(), |input_map, action| match action {
            Self::CameraConfigInspector => input_map.with(action, KeyCode::F1),
            Self::TransitionInspector => input_map.with(action, KeyCode::F2),
            Self::StarConfigInspector => input_map.with(action, KeyCode::F3),
            Self::SunLightInspector => input_map.with(action, KeyCode::F4),
            Self::PlanetConfigInspector => input_map.with(action, KeyCode::F5),
            Self::HomePlanet => input_map.with(action, KeyCode::KeyH),
            Self::NextPlanet => input_map
                .with(action, KeyCode::ArrowRight)
                .with(action, KeyCode::KeyD),
            Self::PreviousPlanet => input_map
                .with(action, KeyCode::ArrowLeft)
                .with(action, KeyCode::KeyA),
        })
    }
}

/// Run condition: true on the frame `action` is pressed
pub fn just_pressed(
    action: ViewerAction,
) -> impl Fn(Res<ActionState<ViewerAction>>) -> bool + Clone {
    move |user_input| user_input.just_pressed(&action)
}

/// Run condition that flips between on and off each time `action` is pressed
pub fn toggle_active(
    default: bool,
    action: ViewerAction,
) -> impl FnMut(Res<ActionState<ViewerAction>>) -> bool + Clone {
    let mut active = default;
    move |user_input| {
        if user_input.just_pressed(&action) {
            active = !active;
        }
        active
    }
}
