//! Declarative planet table: one immutable record per body, deserialized from
//! RON. The builder and the UI only ever read these records.

use bevy::prelude::*;
use serde::Deserialize;
use strum::EnumIter;

/// Built-in planet table, embedded so the viewer never starts without data
pub const PLANETS_RON: &str = include_str!("../../assets/planets.ron");

/// All planet records in display order
#[derive(Resource, Debug, Clone, Default)]
pub struct PlanetTable {
    records: Vec<PlanetRecord>,
}

impl PlanetTable {
    pub fn from_ron(source: &str) -> Result<Self, ron::error::SpannedError> {
        let records: Vec<PlanetRecord> = ron::from_str(source)?;
        Ok(Self { records })
    }

    pub fn get(&self, id: &str) -> Option<&PlanetRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlanetRecord> { self.records.iter() }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// The preferred record if present, otherwise the first one in the table
    pub fn home(&self, preferred: &str) -> Option<&PlanetRecord> {
        self.get(preferred).or_else(|| self.records.first())
    }

    /// Record after `id` in table order, wrapping at the end
    pub fn next_after(&self, id: &str) -> Option<&PlanetRecord> {
        let index = self.index_of(id)?;
        self.records.get((index + 1) % self.records.len())
    }

    /// Record before `id` in table order, wrapping at the start
    pub fn previous_before(&self, id: &str) -> Option<&PlanetRecord> {
        let index = self.index_of(id)?;
        let len = self.records.len();
        self.records.get((index + len - 1) % len)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PlanetRecord {
    pub id:             String,
    pub name:           String,
    pub position:       Vec3,
    pub radius:         f32,
    /// radians per frame, around the local Y axis
    pub rotation_speed: f32,
    /// degrees, applied about Z to the whole group
    pub axial_tilt:     f32,
    /// where the camera goes when this planet is selected
    pub camera:         Vec3,
    pub surface:        Surface,
    #[serde(default)]
    pub info:           PlanetInfo,
}

impl PlanetRecord {
    pub const fn tilt_radians(&self) -> f32 { self.axial_tilt.to_radians() }
}

/// How a body's surface is drawn
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub enum Surface {
    /// Ordered stack of shaded layers sharing one mesh
    Layered(Vec<LayerRecord>),
    /// Single opaque textured layer
    Texture(String),
    /// Single opaque layer with a flat hex color such as `"#8c8680"`
    Flat(String),
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LayerRecord {
    pub kind:           LayerKind,
    #[serde(default)]
    pub scale:          Option<f32>,
    #[serde(default)]
    pub rotation_speed: Option<f32>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub enum LayerKind {
    /// Sunlit terrain
    Day {
        map:          String,
        #[serde(default)]
        specular_map: Option<String>,
        #[serde(default)]
        normal_map:   Option<String>,
    },
    /// City lights, added on top of the day layer
    Night { map: String },
    /// Cloud shell, usually scaled slightly above the surface
    Clouds { map: String },
}

/// Display strings for the fact panel. Missing entries render empty.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PlanetInfo {
    pub distance_from_sun: String,
    pub radius:            String,
    pub day_length:        String,
    pub orbital_speed:     String,
    pub axial_tilt:        String,
    pub gravity:           String,
    pub moons:             String,
    pub atmosphere:        String,
    pub temperature:       String,
    pub age:               String,
}

impl PlanetInfo {
    pub fn get(&self, key: InfoKey) -> &str {
        match key {
            InfoKey::DistanceFromSun => &self.distance_from_sun,
            InfoKey::Radius => &self.radius,
            InfoKey::DayLength => &self.day_length,
            InfoKey::OrbitalSpeed => &self.orbital_speed,
            InfoKey::AxialTilt => &self.axial_tilt,
            InfoKey::Gravity => &self.gravity,
            InfoKey::Moons => &self.moons,
            InfoKey::Atmosphere => &self.atmosphere,
            InfoKey::Temperature => &self.temperature,
            InfoKey::Age => &self.age,
        }
    }
}

/// Fact panel rows. Declaration order is display order.
#[derive(EnumIter, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoKey {
    DistanceFromSun,
    Radius,
    DayLength,
    OrbitalSpeed,
    AxialTilt,
    Gravity,
    Moons,
    Atmosphere,
    Temperature,
    Age,
}

impl InfoKey {
    pub const fn label(self) -> &'static str {
        match self {
            Self::DistanceFromSun => "Distance from Sun",
            Self::Radius => "Radius",
            Self::DayLength => "Day length",
            Self::OrbitalSpeed => "Orbital speed",
            Self::AxialTilt => "Axial tilt",
            Self::Gravity => "Surface gravity",
            Self::Moons => "Moons",
            Self::Atmosphere => "Atmosphere",
            Self::Temperature => "Temperature",
            Self::Age => "Age",
        }
    }
}
