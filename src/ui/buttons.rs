use bevy::color::palettes::tailwind;
use bevy::prelude::*;

use crate::planet::PlanetTable;
use crate::planet::SelectPlanet;
use crate::planet::SelectedPlanet;

const BUTTON_SIZE: f32 = 14.0;

#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct PlanetButton {
    pub id: String,
}

pub fn spawn_planet_buttons(mut commands: Commands, table: Res<PlanetTable>) {
    let bar = commands
        .spawn((
            Name::new("Planet Buttons"),
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(16.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                flex_wrap: FlexWrap::Wrap,
                column_gap: Val::Px(8.0),
                row_gap: Val::Px(8.0),
                ..default()
            },
        ))
        .id();

    for record in table.iter() {
        commands.spawn((
            PlanetButton {
                id: record.id.clone(),
            },
            Button,
            Node {
                padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(button_color(false, Interaction::None)),
            ChildOf(bar),
            children![(
                Text::new(record.name.clone()),
                TextFont {
                    font_size: BUTTON_SIZE,
                    ..default()
                },
            )],
        ));
    }
}

/// The selected planet's button stays highlighted whatever the pointer does
pub fn button_color(is_active: bool, interaction: Interaction) -> Color {
    match (is_active, interaction) {
        (true, _) => tailwind::SKY_600.into(),
        (false, Interaction::Pressed) => tailwind::SKY_800.into(),
        (false, Interaction::Hovered) => tailwind::SLATE_600.into(),
        (false, Interaction::None) => tailwind::SLATE_800.into(),
    }
}

pub fn select_from_buttons(
    buttons: Query<(&Interaction, &PlanetButton), Changed<Interaction>>,
    mut requests: MessageWriter<SelectPlanet>,
) {
    for (interaction, button) in &buttons {
        if *interaction == Interaction::Pressed {
            requests.write(SelectPlanet(button.id.clone()));
        }
    }
}

pub fn style_planet_buttons(
    selected: Res<SelectedPlanet>,
    mut buttons: Query<(&PlanetButton, &Interaction, &mut BackgroundColor)>,
) {
    for (button, interaction, mut background) in &mut buttons {
        let is_active = selected.id() == Some(button.id.as_str());
        background.set_if_neq(BackgroundColor(button_color(is_active, *interaction)));
    }
}
