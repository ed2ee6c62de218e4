use bevy::color::palettes::tailwind;
use bevy::prelude::*;
use strum::IntoEnumIterator;

use crate::planet::InfoKey;
use crate::planet::PlanetRecord;
use crate::planet::PlanetTable;
use crate::planet::SelectedPlanet;

const PANEL_BACKGROUND: Color = Color::srgba(0.02, 0.03, 0.08, 0.75);
const TITLE_SIZE: f32 = 28.0;
const ROW_SIZE: f32 = 15.0;

#[derive(Component)]
pub struct InfoPanel;

#[derive(Component)]
pub struct PanelTitle;

/// Parent of the fact rows, which are replaced on every selection
#[derive(Component)]
pub struct FactList;

#[derive(Component)]
pub struct FactRow;

pub fn spawn_info_panel(mut commands: Commands) {
    commands.spawn((
        InfoPanel,
        Name::new("Info Panel"),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            left: Val::Px(16.0),
            max_width: Val::Px(360.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(6.0),
            padding: UiRect::all(Val::Px(12.0)),
            ..default()
        },
        BackgroundColor(PANEL_BACKGROUND),
        children![
            (
                PanelTitle,
                Text::default(),
                TextFont {
                    font_size: TITLE_SIZE,
                    ..default()
                },
            ),
            (
                FactList,
                Node {
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(2.0),
                    ..default()
                },
            ),
        ],
    ));
}

/// Label and value for each fact, always all ten in the same order
pub fn fact_rows(record: &PlanetRecord) -> Vec<(String, String)> {
    InfoKey::iter()
        .map(|key| (format!("{}: ", key.label()), record.info.get(key).to_string()))
        .collect()
}

pub fn refresh_info_panel(
    mut commands: Commands,
    selected: Res<SelectedPlanet>,
    table: Res<PlanetTable>,
    mut title: Single<&mut Text, With<PanelTitle>>,
    fact_list: Single<Entity, With<FactList>>,
) {
    let fact_list = *fact_list;
    commands.entity(fact_list).despawn_related::<Children>();

    let Some(record) = selected.id().and_then(|id| table.get(id)) else {
        title.0.clear();
        return;
    };

    title.0.clone_from(&record.name);

    for (label, value) in fact_rows(record) {
        commands.spawn((
            FactRow,
            Text::new(label),
            TextFont {
                font_size: ROW_SIZE,
                ..default()
            },
            ChildOf(fact_list),
            children![(
                TextSpan::new(value),
                TextFont {
                    font_size: ROW_SIZE,
                    ..default()
                },
                TextColor(tailwind::AMBER_300.into()),
            )],
        ));
    }
}
