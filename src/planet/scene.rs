//! Builds every planet in the table once at startup, hidden except for the
//! home planet.

use bevy::prelude::*;
use bevy::platform::collections::HashMap;

use super::builder::PlanetBlueprint;
use super::builder::PlanetConfig;
use super::builder::PlanetSpawner;
use super::record::PlanetTable;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlanetRegistry>()
            .init_resource::<SelectedPlanet>()
            .register_type::<SelectedPlanet>()
            .add_systems(Startup, assemble_planets);
    }
}

/// Group entity of every spawned planet, by id
#[derive(Resource, Debug, Default)]
pub struct PlanetRegistry {
    groups: HashMap<String, Entity>,
}

impl PlanetRegistry {
    pub fn insert(&mut self, id: impl Into<String>, group: Entity) {
        self.groups.insert(id.into(), group);
    }

    pub fn get(&self, id: &str) -> Option<Entity> { self.groups.get(id).copied() }

    pub fn len(&self) -> usize { self.groups.len() }

    pub fn is_empty(&self) -> bool { self.groups.is_empty() }
}

/// Id of the planet currently shown. `None` only when the table is empty.
#[derive(Resource, Reflect, Debug, Clone, PartialEq, Eq, Default)]
#[reflect(Resource)]
pub struct SelectedPlanet(pub Option<String>);

impl SelectedPlanet {
    pub fn id(&self) -> Option<&str> { self.0.as_deref() }
}

/// Pairs each planet id with its starting visibility. Only the home planet is
/// visible.
pub fn visibility_plan(table: &PlanetTable, preferred: &str) -> Vec<(String, Visibility)> {
    let home = table.home(preferred).map(|record| record.id.as_str());
    table
        .iter()
        .map(|record| {
            let visibility = if Some(record.id.as_str()) == home {
                Visibility::Visible
            } else {
                Visibility::Hidden
            };
            (record.id.clone(), visibility)
        })
        .collect()
}

fn assemble_planets(
    table: Res<PlanetTable>,
    mut spawner: PlanetSpawner,
    mut registry: ResMut<PlanetRegistry>,
    mut selected: ResMut<SelectedPlanet>,
) {
    if table.is_empty() {
        warn!("planet table is empty, nothing to show");
        return;
    }

    let preferred = spawner.config().default_planet.clone();
    if table.get(&preferred).is_none() {
        warn!("default planet '{preferred}' is not in the table, using the first entry");
    }

    for (record, (id, visibility)) in table.iter().zip(visibility_plan(&table, &preferred)) {
        let group = spawner.spawn(&PlanetBlueprint::from_record(record), visibility);
        registry.insert(id, group);
    }

    selected.0 = table.home(&preferred).map(|record| record.id.clone());
    info!(
        "assembled {} planets, showing {:?}",
        registry.len(),
        selected.id()
    );
}

/// Used by the camera and panel at startup to agree on the home planet
pub fn home_id(table: &PlanetTable, config: &PlanetConfig) -> Option<String> {
    table
        .home(&config.default_planet)
        .map(|record| record.id.clone())
}
