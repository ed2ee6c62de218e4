//! Turns a planet record into a group entity with one shaded mesh per layer.
//!
//! Construction happens in two steps: `PlanetBlueprint::from_record` resolves
//! the record into plain data (transform, per-layer shading, scale and spin),
//! then `PlanetSpawner` creates the mesh, materials and entities from it.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_inspector_egui::prelude::*;

use super::record::LayerKind;
use super::record::PlanetRecord;
use super::record::Surface;
use super::spin::Spin;
use crate::asset_loader::TextureTracker;

const FALLBACK_COLOR: Color = Color::srgb(0.5, 0.5, 0.5);

#[derive(Resource, Reflect, InspectorOptions, Debug, Clone, PartialEq)]
#[reflect(Resource, InspectorOptions)]
pub struct PlanetConfig {
    /// planet shown at startup and when returning home
    pub default_planet:   String,
    /// prefix for every texture path in the planet table
    pub texture_root:     String,
    #[inspector(min = 1, max = 64)]
    pub ico_subdivisions: u32,
    /// lifts the night layer over the coincident day surface
    pub night_depth_bias: f32,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            default_planet:   "earth".to_string(),
            texture_root:     "textures".to_string(),
            ico_subdivisions: 16,
            night_depth_bias: 10.0,
        }
    }
}

/// Marks the group entity of a planet. Layer meshes are its children.
#[derive(Component, Reflect, Debug, Clone, PartialEq, Eq)]
#[reflect(Component)]
pub struct Planet {
    pub id: String,
}

/// How a single layer is shaded
#[derive(Debug, Clone, PartialEq)]
pub enum Shading {
    /// opaque and lit, like sunlit terrain
    Day {
        map:          String,
        specular_map: Option<String>,
        normal_map:   Option<String>,
    },
    /// additive and unlit, like city lights
    Night { map: String },
    /// additive and lit
    Clouds { map: String },
    /// opaque and lit single layer
    Flat(FlatFill),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlatFill {
    Texture(String),
    Color(Color),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerBlueprint {
    pub shading: Shading,
    pub scale:   f32,
    /// radians per frame
    pub spin:    f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanetBlueprint {
    pub id:        String,
    pub name:      String,
    pub radius:    f32,
    pub transform: Transform,
    pub layers:    Vec<LayerBlueprint>,
}

impl PlanetBlueprint {
    pub fn from_record(record: &PlanetRecord) -> Self {
        let transform = Transform::from_translation(record.position)
            .with_rotation(Quat::from_rotation_z(record.tilt_radians()));

        let layers = match &record.surface {
            Surface::Layered(layers) => layers
                .iter()
                .map(|layer| LayerBlueprint {
                    shading: Shading::from(&layer.kind),
                    scale:   layer.scale.unwrap_or(1.0),
                    spin:    layer.rotation_speed.unwrap_or(record.rotation_speed),
                })
                .collect(),
            Surface::Texture(path) => vec![LayerBlueprint {
                shading: Shading::Flat(FlatFill::Texture(path.clone())),
                scale:   1.0,
                spin:    record.rotation_speed,
            }],
            Surface::Flat(hex) => vec![LayerBlueprint {
                shading: Shading::Flat(FlatFill::Color(parse_hex_color(&record.id, hex))),
                scale:   1.0,
                spin:    record.rotation_speed,
            }],
        };

        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            radius: record.radius,
            transform,
            layers,
        }
    }
}

impl From<&LayerKind> for Shading {
    fn from(kind: &LayerKind) -> Self {
        match kind {
            LayerKind::Day {
                map,
                specular_map,
                normal_map,
            } => Self::Day {
                map:          map.clone(),
                specular_map: specular_map.clone(),
                normal_map:   normal_map.clone(),
            },
            LayerKind::Night { map } => Self::Night { map: map.clone() },
            LayerKind::Clouds { map } => Self::Clouds { map: map.clone() },
        }
    }
}

fn parse_hex_color(id: &str, hex: &str) -> Color {
    match Srgba::hex(hex) {
        Ok(color) => Color::from(color),
        Err(error) => {
            warn!("planet '{id}' has an invalid color '{hex}' ({error}), using grey");
            FALLBACK_COLOR
        },
    }
}

impl Shading {
    /// Builds the material, loading each referenced texture through `load`
    pub fn material(
        &self,
        config: &PlanetConfig,
        mut load: impl FnMut(&str) -> Handle<Image>,
    ) -> StandardMaterial {
        match self {
            Self::Day {
                map,
                specular_map,
                normal_map,
            } => StandardMaterial {
                base_color_texture: Some(load(map)),
                specular_texture: specular_map.as_deref().map(&mut load),
                normal_map_texture: normal_map.as_deref().map(&mut load),
                ..default()
            },
            Self::Night { map } => StandardMaterial {
                base_color_texture: Some(load(map)),
                alpha_mode: AlphaMode::Add,
                unlit: true,
                depth_bias: config.night_depth_bias,
                ..default()
            },
            Self::Clouds { map } => StandardMaterial {
                base_color_texture: Some(load(map)),
                alpha_mode: AlphaMode::Add,
                ..default()
            },
            Self::Flat(FlatFill::Texture(path)) => StandardMaterial {
                base_color_texture: Some(load(path)),
                ..default()
            },
            Self::Flat(FlatFill::Color(color)) => StandardMaterial {
                base_color: *color,
                ..default()
            },
        }
    }
}

/// Joins a table path onto the texture root with exactly one separator
pub fn texture_path(root: &str, path: &str) -> String {
    let root = root.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if root.is_empty() {
        path.to_string()
    } else {
        format!("{root}/{path}")
    }
}

/// One icosphere per planet, shared by all of its layers
fn planet_mesh(radius: f32, subdivisions: u32) -> Mesh {
    let sphere = Sphere::new(radius);
    let mut mesh = match sphere.mesh().ico(subdivisions) {
        Ok(mesh) => mesh,
        Err(error) => {
            warn!("icosphere with {subdivisions} subdivisions failed ({error}), using a UV sphere");
            sphere.mesh().uv(64, 32)
        },
    };

    // normal maps need tangents
    if let Err(error) = mesh.generate_tangents() {
        warn!("could not generate planet mesh tangents: {error}");
    }
    mesh
}

#[derive(SystemParam)]
pub struct PlanetSpawner<'w, 's> {
    commands:     Commands<'w, 's>,
    meshes:       ResMut<'w, Assets<Mesh>>,
    materials:    ResMut<'w, Assets<StandardMaterial>>,
    asset_server: Res<'w, AssetServer>,
    textures:     ResMut<'w, TextureTracker>,
    config:       Res<'w, PlanetConfig>,
}

impl PlanetSpawner<'_, '_> {
    pub fn config(&self) -> &PlanetConfig { &self.config }

    /// Spawns the group and its layers, returning the group entity
    pub fn spawn(&mut self, blueprint: &PlanetBlueprint, visibility: Visibility) -> Entity {
        let mesh = self
            .meshes
            .add(planet_mesh(blueprint.radius, self.config.ico_subdivisions));

        let group = self
            .commands
            .spawn((
                Name::new(blueprint.name.clone()),
                Planet {
                    id: blueprint.id.clone(),
                },
                blueprint.transform,
                visibility,
            ))
            .id();

        for (index, layer) in blueprint.layers.iter().enumerate() {
            let material = layer.shading.material(&self.config, |path| {
                let full_path = texture_path(&self.config.texture_root, path);
                let handle: Handle<Image> = self.asset_server.load(full_path.clone());
                self.textures.track(full_path, handle.clone());
                handle
            });

            // insertion order is draw order for the additive layers
            self.commands.spawn((
                Name::new(format!("{} layer {index}", blueprint.name)),
                Spin { speed: layer.spin },
                Mesh3d(mesh.clone()),
                MeshMaterial3d(self.materials.add(material)),
                Transform::from_scale(Vec3::splat(layer.scale)),
                ChildOf(group),
            ));
        }

        debug!(
            "spawned planet '{}' with {} layer(s)",
            blueprint.id,
            blueprint.layers.len()
        );
        group
    }
}
