use bevy::asset::LoadState;
/// the planet table is embedded, textures stream in from the asset server
use bevy::prelude::*;

use crate::planet::PLANETS_RON;
use crate::planet::PlanetTable;

pub struct AssetLoaderPlugin;

impl Plugin for AssetLoaderPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<TexturesState>() // lets us stop polling once every texture settles
            .init_resource::<PlanetTable>()
            .init_resource::<TextureTracker>()
            // the table must exist before anything at Startup spawns from it
            .add_systems(PreStartup, load_planet_table)
            .add_systems(
                Update,
                check_texture_loading.run_if(in_state(TexturesState::Loading)),
            );
    }
}

#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum TexturesState {
    #[default]
    Loading,
    Settled,
}

pub fn load_planet_table(mut table: ResMut<PlanetTable>) {
    *table = parse_planet_table(PLANETS_RON);
}

fn parse_planet_table(source: &str) -> PlanetTable {
    match PlanetTable::from_ron(source) {
        Ok(table) => {
            info!("loaded {} planets", table.len());
            table
        },
        Err(error) => {
            error!("could not parse the planet table: {error}");
            PlanetTable::default()
        },
    }
}

/// Every texture requested while building planets, by asset path
#[derive(Resource, Debug, Default)]
pub struct TextureTracker {
    textures: Vec<(String, Handle<Image>)>,
}

/// Outcome once no texture is still loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureReport {
    pub loaded: usize,
    pub failed: Vec<String>,
}

impl TextureTracker {
    pub fn track(&mut self, path: String, handle: Handle<Image>) {
        if self.textures.iter().all(|(tracked, _)| *tracked != path) {
            self.textures.push((path, handle));
        }
    }

    pub fn len(&self) -> usize { self.textures.len() }

    pub fn is_empty(&self) -> bool { self.textures.is_empty() }

    /// `None` while any texture is still in flight
    pub fn report(
        &self,
        load_state: impl Fn(&Handle<Image>) -> Option<LoadState>,
    ) -> Option<TextureReport> {
        let mut report = TextureReport {
            loaded: 0,
            failed: Vec::new(),
        };

        for (path, handle) in &self.textures {
            match load_state(handle) {
                Some(LoadState::Loaded) => report.loaded += 1,
                Some(LoadState::Failed(_)) => report.failed.push(path.clone()),
                _ => return None,
            }
        }
        Some(report)
    }
}

pub fn check_texture_loading(
    mut next_state: ResMut<NextState<TexturesState>>,
    asset_server: Res<AssetServer>,
    tracker: Res<TextureTracker>,
) {
    let Some(report) = tracker.report(|handle| asset_server.get_load_state(handle.id())) else {
        return;
    };

    for path in &report.failed {
        warn!("texture '{path}' failed to load, its layer keeps a default material");
    }
    info!(
        "textures settled: {} of {} loaded",
        report.loaded,
        tracker.len()
    );
    next_state.set(TexturesState::Settled);
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use bevy::asset::AssetLoadError;
    use bevy::asset::io::AssetReaderError;

    use super::*;

    fn tracker(paths: &[&str]) -> TextureTracker {
        let mut tracker = TextureTracker::default();
        for path in paths {
            tracker.track((*path).to_string(), Handle::default());
        }
        tracker
    }

    #[test]
    fn builtin_table_parses() {
        assert_eq!(parse_planet_table(PLANETS_RON).len(), 9);
    }

    #[test]
    fn malformed_table_becomes_empty() {
        assert!(parse_planet_table("[ (id: ").is_empty());
    }

    #[test]
    fn shared_textures_are_tracked_once() {
        let tracker = tracker(&["earth/day.jpg", "earth/day.jpg", "earth/night.jpg"]);
        assert_eq!(tracker.len(), 2);
        assert!(!tracker.is_empty());
        assert!(TextureTracker::default().is_empty());
    }

    #[test]
    fn report_waits_for_textures_in_flight() {
        let tracker = tracker(&["a.jpg", "b.jpg"]);
        assert_eq!(tracker.report(|_| Some(LoadState::Loading)), None);
        assert_eq!(tracker.report(|_| None), None);
    }

    #[test]
    fn report_counts_loaded_and_names_failures() {
        let mut tracker = TextureTracker::default();
        tracker.track("missing.jpg".to_string(), Handle::default());

        let failed = LoadState::Failed(Arc::new(AssetLoadError::AssetReaderError(
            AssetReaderError::NotFound(PathBuf::from("missing.jpg")),
        )));
        let report = tracker.report(|_| Some(failed.clone()));

        assert_eq!(report, Some(TextureReport {
            loaded: 0,
            failed: vec!["missing.jpg".to_string()],
        }));
    }

    #[test]
    fn empty_tracker_settles_immediately() {
        assert_eq!(
            TextureTracker::default().report(|_| None),
            Some(TextureReport {
                loaded: 0,
                failed: Vec::new(),
            })
        );
    }
}
