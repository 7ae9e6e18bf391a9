//! Terrain-aware speed lookup for units.
use serde::{Deserialize, Serialize};

/// Terrain categories a unit's speed multipliers are keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementTerrain {
    Plain,
    Mountain,
    Forest,
    Water,
    Road,
}

impl MovementTerrain {
    pub const ALL: [MovementTerrain; 5] = [
        MovementTerrain::Plain,
        MovementTerrain::Mountain,
        MovementTerrain::Forest,
        MovementTerrain::Water,
        MovementTerrain::Road,
    ];
}

/// Per-terrain speed multipliers of one unit type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainMultipliers {
    pub plain: f32,
    pub mountain: f32,
    pub forest: f32,
    pub water: f32,
    pub road: f32,
}

impl Default for TerrainMultipliers {
    fn default() -> Self {
        Self { plain: 1.0, mountain: 1.0, forest: 1.0, water: 1.0, road: 1.0 }
    }
}

impl TerrainMultipliers {
    #[inline]
    pub fn get(&self, terrain: MovementTerrain) -> f32 {
        match terrain {
            MovementTerrain::Plain => self.plain,
            MovementTerrain::Mountain => self.mountain,
            MovementTerrain::Forest => self.forest,
            MovementTerrain::Water => self.water,
            MovementTerrain::Road => self.road,
        }
    }
}

/// The slice of a unit's catalogue entry that movement needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedProfile {
    pub max_speed: f32,
    pub can_fly: bool,
    pub multipliers: TerrainMultipliers,
}

impl SpeedProfile {
    pub fn ground(max_speed: f32, multipliers: TerrainMultipliers) -> Self {
        Self { max_speed, can_fly: false, multipliers }
    }

    pub fn flying(max_speed: f32) -> Self {
        Self { max_speed, can_fly: true, multipliers: TerrainMultipliers::default() }
    }
}

/// Speed of `unit` on `terrain`. Flying units ignore terrain.
#[inline]
pub fn effective_speed(unit: &SpeedProfile, terrain: MovementTerrain) -> f32 {
    if unit.can_fly {
        unit.max_speed
    } else {
        unit.max_speed * unit.multipliers.get(terrain)
    }
}
