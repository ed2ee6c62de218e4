//! Selection requests and what they change: which planet is visible, where the
//! camera flies, and the `SelectedPlanet` the panel reads.

use bevy::prelude::*;

use super::builder::Planet;
use super::builder::PlanetConfig;
use super::record::PlanetTable;
use super::scene::PlanetRegistry;
use super::scene::SelectedPlanet;
use super::scene::home_id;
use crate::camera::CameraTransition;
use crate::input::ViewerAction;
use crate::input::just_pressed;
use crate::schedule::FrameSet;

pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SelectPlanet>()
            .add_systems(
                Update,
                (
                    select_next.run_if(just_pressed(ViewerAction::NextPlanet)),
                    select_previous.run_if(just_pressed(ViewerAction::PreviousPlanet)),
                    select_home.run_if(just_pressed(ViewerAction::HomePlanet)),
                )
                    .in_set(FrameSet::UserInput),
            )
            .add_systems(Update, apply_selection.in_set(FrameSet::Selection));
    }
}

/// Request to show the planet with this id
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct SelectPlanet(pub String);

fn select_next(
    table: Res<PlanetTable>,
    selected: Res<SelectedPlanet>,
    mut requests: MessageWriter<SelectPlanet>,
) {
    let Some(current) = selected.id() else {
        return;
    };
    if let Some(next) = table.next_after(current) {
        requests.write(SelectPlanet(next.id.clone()));
    }
}

fn select_previous(
    table: Res<PlanetTable>,
    selected: Res<SelectedPlanet>,
    mut requests: MessageWriter<SelectPlanet>,
) {
    let Some(current) = selected.id() else {
        return;
    };
    if let Some(previous) = table.previous_before(current) {
        requests.write(SelectPlanet(previous.id.clone()));
    }
}

fn select_home(
    table: Res<PlanetTable>,
    config: Res<PlanetConfig>,
    mut requests: MessageWriter<SelectPlanet>,
) {
    if let Some(id) = home_id(&table, &config) {
        requests.write(SelectPlanet(id));
    }
}

pub fn apply_selection(
    mut requests: MessageReader<SelectPlanet>,
    table: Res<PlanetTable>,
    registry: Res<PlanetRegistry>,
    mut planets: Query<(Entity, &mut Visibility), With<Planet>>,
    mut transition: ResMut<CameraTransition>,
    mut selected: ResMut<SelectedPlanet>,
) {
    for SelectPlanet(id) in requests.read() {
        let (Some(record), Some(group)) = (table.get(id), registry.get(id)) else {
            debug!("ignoring selection of unknown planet '{id}'");
            continue;
        };

        for (entity, mut visibility) in &mut planets {
            let wanted = if entity == group {
                Visibility::Visible
            } else {
                Visibility::Hidden
            };
            visibility.set_if_neq(wanted);
        }

        transition.retarget(record.camera, record.position);
        selected.set_if_neq(SelectedPlanet(Some(id.clone())));
        debug!("selected planet '{id}'");
    }
}

#[cfg(test)]
mod tests {
    use leafwing_input_manager::prelude::ActionState;

    use super::*;
    use crate::planet::record::PLANETS_RON;

    fn setup() -> App {
        let mut app = App::new();
        app.add_message::<SelectPlanet>()
            .insert_resource(PlanetTable::from_ron(PLANETS_RON).unwrap())
            .init_resource::<PlanetRegistry>()
            .init_resource::<PlanetConfig>()
            .init_resource::<CameraTransition>()
            .insert_resource(SelectedPlanet(Some("earth".to_string())))
            .add_systems(Update, apply_selection);

        let ids: Vec<String> = app
            .world()
            .resource::<PlanetTable>()
            .iter()
            .map(|record| record.id.clone())
            .collect();
        for id in ids {
            let visibility = if id == "earth" {
                Visibility::Visible
            } else {
                Visibility::Hidden
            };
            let group = app
                .world_mut()
                .spawn((Planet { id: id.clone() }, visibility))
                .id();
            app.world_mut()
                .resource_mut::<PlanetRegistry>()
                .insert(id, group);
        }
        app
    }

    fn visible(app: &mut App) -> Vec<String> {
        let mut query = app.world_mut().query::<(&Planet, &Visibility)>();
        query
            .iter(app.world())
            .filter(|(_, visibility)| **visibility == Visibility::Visible)
            .map(|(planet, _)| planet.id.clone())
            .collect()
    }

    #[test]
    fn selecting_a_planet_shows_only_that_planet() {
        let mut app = setup();

        app.world_mut().write_message(SelectPlanet("mars".to_string()));
        app.update();

        assert_eq!(visible(&mut app), vec!["mars"]);
        assert_eq!(
            app.world().resource::<SelectedPlanet>().id(),
            Some("mars")
        );

        let transition = app.world().resource::<CameraTransition>();
        assert!(transition.is_animating);
        assert_eq!(transition.camera_target, Vec3::new(50.0, 0.0, 2.2));
        assert_eq!(transition.focus_target, Vec3::new(50.0, 0.0, 0.0));
    }

    #[test]
    fn unknown_planet_changes_nothing() {
        let mut app = setup();

        app.world_mut().write_message(SelectPlanet("pluto".to_string()));
        app.update();

        assert_eq!(visible(&mut app), vec!["earth"]);
        assert_eq!(
            app.world().resource::<SelectedPlanet>().id(),
            Some("earth")
        );
        assert_eq!(
            *app.world().resource::<CameraTransition>(),
            CameraTransition::default()
        );
    }

    #[test]
    fn latest_request_in_a_frame_wins() {
        let mut app = setup();

        app.world_mut().write_message(SelectPlanet("moon".to_string()));
        app.world_mut().write_message(SelectPlanet("venus".to_string()));
        app.update();

        assert_eq!(visible(&mut app), vec!["venus"]);
        assert_eq!(
            app.world().resource::<CameraTransition>().focus_target,
            Vec3::new(-50.0, 0.0, 0.0)
        );
    }

    #[test]
    fn next_key_wraps_past_the_last_planet() {
        let mut app = setup();
        app.init_resource::<ActionState<ViewerAction>>()
            .add_systems(
                Update,
                select_next
                    .run_if(just_pressed(ViewerAction::NextPlanet))
                    .before(apply_selection),
            );
        app.insert_resource(SelectedPlanet(Some("neptune".to_string())));

        app.world_mut()
            .resource_mut::<ActionState<ViewerAction>>()
            .press(&ViewerAction::NextPlanet);
        app.update();

        assert_eq!(visible(&mut app), vec!["mercury"]);
    }
}
