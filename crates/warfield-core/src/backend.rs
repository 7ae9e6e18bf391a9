//! One read interface over both terrain representations.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::biome::{BiomeGrid, BiomeTag};
use crate::error::Error;
use crate::movement::MovementTerrain;
use crate::palette::{Glyph, Palette, RenderMode};
use crate::terrain::{TerrainCell, TerrainClass, TerrainFlags, TerrainGrid};

/// What the simulation and renderer need from a generated map.
pub trait TerrainBackend {
    /// `(width, height)` in cells.
    fn dimensions(&self) -> (usize, usize);

    /// Movement category at `(x, y)`, `None` off the map.
    fn movement_terrain_at(&self, x: usize, y: usize) -> Option<MovementTerrain>;

    fn glyph_at(&self, x: usize, y: usize, palette: &Palette) -> Option<Glyph>;
}

/// Movement category of a continuous cell. Road, river and forest flags take
/// priority over the height class.
pub fn movement_terrain_of_cell(cell: &TerrainCell) -> MovementTerrain {
    let flags = cell.flags();
    if flags.contains(TerrainFlags::ROAD) {
        return MovementTerrain::Road;
    }
    if flags.contains(TerrainFlags::RIVER) {
        return MovementTerrain::Water;
    }
    if flags.contains(TerrainFlags::FOREST) {
        return MovementTerrain::Forest;
    }
    match cell.class() {
        TerrainClass::Water => MovementTerrain::Water,
        TerrainClass::Flat | TerrainClass::Hill1 => MovementTerrain::Plain,
        TerrainClass::Hill2 | TerrainClass::Hill3 | TerrainClass::Mountain1 | TerrainClass::Mountain2 => {
            MovementTerrain::Mountain
        }
    }
}

impl From<BiomeTag> for MovementTerrain {
    fn from(tag: BiomeTag) -> Self {
        match tag {
            BiomeTag::Plain => MovementTerrain::Plain,
            BiomeTag::Forest => MovementTerrain::Forest,
            BiomeTag::Mountain => MovementTerrain::Mountain,
            BiomeTag::Water => MovementTerrain::Water,
            BiomeTag::Road => MovementTerrain::Road,
        }
    }
}

impl TerrainBackend for TerrainGrid {
    fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    fn movement_terrain_at(&self, x: usize, y: usize) -> Option<MovementTerrain> {
        self.get(x, y).map(movement_terrain_of_cell)
    }

    fn glyph_at(&self, x: usize, y: usize, palette: &Palette) -> Option<Glyph> {
        self.get(x, y).map(|c| palette.cell_glyph(c, RenderMode::Normal))
    }
}

impl TerrainBackend for BiomeGrid {
    fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    fn movement_terrain_at(&self, x: usize, y: usize) -> Option<MovementTerrain> {
        self.get(x, y).map(|&t| t.into())
    }

    fn glyph_at(&self, x: usize, y: usize, palette: &Palette) -> Option<Glyph> {
        self.get(x, y).map(|&t| palette.biome_glyph(t))
    }
}

/// Which backend to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    #[default]
    Continuous,
    Biome,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Continuous => f.write_str("continuous"),
            BackendKind::Biome => f.write_str("biome"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continuous" | "height" => Ok(BackendKind::Continuous),
            "biome" | "discrete" => Ok(BackendKind::Biome),
            _ => Err(Error::InvalidConfig(format!("unknown backend '{s}'"))),
        }
    }
}

/// A generated map from either backend.
#[derive(Debug, Clone, PartialEq)]
pub enum TerrainMap {
    Continuous(TerrainGrid),
    Biome(BiomeGrid),
}

impl TerrainMap {
    pub fn kind(&self) -> BackendKind {
        match self {
            TerrainMap::Continuous(_) => BackendKind::Continuous,
            TerrainMap::Biome(_) => BackendKind::Biome,
        }
    }

    fn backend(&self) -> &dyn TerrainBackend {
        match self {
            TerrainMap::Continuous(g) => g as &dyn TerrainBackend,
            TerrainMap::Biome(g) => g as &dyn TerrainBackend,
        }
    }
}

impl TerrainBackend for TerrainMap {
    fn dimensions(&self) -> (usize, usize) {
        self.backend().dimensions()
    }

    fn movement_terrain_at(&self, x: usize, y: usize) -> Option<MovementTerrain> {
        self.backend().movement_terrain_at(x, y)
    }

    fn glyph_at(&self, x: usize, y: usize, palette: &Palette) -> Option<Glyph> {
        self.backend().glyph_at(x, y, palette)
    }
}

impl From<TerrainGrid> for TerrainMap {
    fn from(grid: TerrainGrid) -> Self {
        TerrainMap::Continuous(grid)
    }
}

impl From<BiomeGrid> for TerrainMap {
    fn from(grid: BiomeGrid) -> Self {
        TerrainMap::Biome(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::{effective_speed, SpeedProfile, TerrainMultipliers};
    use crate::palette::{BLOCK, ROAD_SYMBOL};

    fn cell(height: f32, flags: TerrainFlags) -> TerrainCell {
        let mut c = TerrainCell::with_height(height);
        c.flags = flags;
        c
    }

    #[test]
    fn flags_take_priority_over_class() {
        assert_eq!(movement_terrain_of_cell(&cell(4.8, TerrainFlags::ROAD)), MovementTerrain::Road);
        assert_eq!(
            movement_terrain_of_cell(&cell(3.0, TerrainFlags::RIVER | TerrainFlags::ROAD)),
            MovementTerrain::Road
        );
        assert_eq!(movement_terrain_of_cell(&cell(3.0, TerrainFlags::RIVER)), MovementTerrain::Water);
        assert_eq!(movement_terrain_of_cell(&cell(0.0, TerrainFlags::FOREST)), MovementTerrain::Forest);
        assert_eq!(movement_terrain_of_cell(&cell(0.0, TerrainFlags::CLIFF)), MovementTerrain::Plain);
    }

    #[test]
    fn classes_map_to_plain_mountain_or_water() {
        assert_eq!(movement_terrain_of_cell(&cell(-2.0, TerrainFlags::NONE)), MovementTerrain::Water);
        assert_eq!(movement_terrain_of_cell(&cell(1.0, TerrainFlags::NONE)), MovementTerrain::Plain);
        assert_eq!(movement_terrain_of_cell(&cell(2.0, TerrainFlags::NONE)), MovementTerrain::Mountain);
    }

    #[test]
    fn both_backends_answer_through_the_map() {
        let mut biome = BiomeGrid::new(4, 3, BiomeTag::Plain).unwrap();
        *biome.get_mut(1, 2).unwrap() = BiomeTag::Road;
        let terrain = TerrainGrid::new(5, 2, TerrainCell::with_height(-2.0)).unwrap();
        let palette = Palette::default();

        let maps = [TerrainMap::from(biome), TerrainMap::from(terrain)];
        assert_eq!(maps[0].dimensions(), (4, 3));
        assert_eq!(maps[0].movement_terrain_at(1, 2), Some(MovementTerrain::Road));
        assert_eq!(maps[0].glyph_at(1, 2, &palette).map(|g| g.symbol), Some(ROAD_SYMBOL));
        assert_eq!(maps[0].movement_terrain_at(4, 0), None);

        assert_eq!(maps[1].kind(), BackendKind::Continuous);
        assert_eq!(maps[1].movement_terrain_at(0, 0), Some(MovementTerrain::Water));
        assert_eq!(maps[1].glyph_at(4, 1, &palette).map(|g| g.symbol), Some(BLOCK));
        assert_eq!(maps[1].glyph_at(0, 2, &palette), None);
    }

    #[test]
    fn speed_is_backend_independent() {
        let boat = SpeedProfile::ground(10.0, TerrainMultipliers { water: 2.0, ..Default::default() });
        let biome = BiomeGrid::new(2, 2, BiomeTag::Water).unwrap();
        let terrain = TerrainGrid::new(2, 2, TerrainCell::with_height(-2.5)).unwrap();
        for map in [TerrainMap::from(biome), TerrainMap::from(terrain)] {
            let t = map.movement_terrain_at(1, 1).unwrap();
            assert_eq!(effective_speed(&boat, t), 20.0);
        }
    }

    #[test]
    fn backend_names_parse() {
        assert_eq!("biome".parse::<BackendKind>().unwrap(), BackendKind::Biome);
        assert_eq!("Continuous".parse::<BackendKind>().unwrap(), BackendKind::Continuous);
        assert!("voxel".parse::<BackendKind>().is_err());
    }
}
