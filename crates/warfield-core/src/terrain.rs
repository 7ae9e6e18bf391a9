//! Continuous-height terrain cells, their discrete classes and feature flags.
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::grid::Grid;

pub const MIN_HEIGHT: f32 = -3.0;
pub const MAX_HEIGHT: f32 = 5.0;

/// Height-derived terrain class, ordered from lowest to highest ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TerrainClass {
    Water,
    Flat,
    Hill1,
    Hill2,
    Hill3,
    Mountain1,
    Mountain2,
}

impl TerrainClass {
    pub const ALL: [TerrainClass; 7] = [
        TerrainClass::Water,
        TerrainClass::Flat,
        TerrainClass::Hill1,
        TerrainClass::Hill2,
        TerrainClass::Hill3,
        TerrainClass::Mountain1,
        TerrainClass::Mountain2,
    ];

    /// Bucket a height into its class. Monotonic in `height`.
    pub fn from_height(height: f32) -> Self {
        if height < -1.0 {
            TerrainClass::Water
        } else if height < 0.5 {
            TerrainClass::Flat
        } else if height < 1.5 {
            TerrainClass::Hill1
        } else if height < 2.5 {
            TerrainClass::Hill2
        } else if height < 3.5 {
            TerrainClass::Hill3
        } else if height < 4.5 {
            TerrainClass::Mountain1
        } else {
            TerrainClass::Mountain2
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TerrainClass::Water => "water",
            TerrainClass::Flat => "flatland",
            TerrainClass::Hill1 => "low hills",
            TerrainClass::Hill2 => "rolling hills",
            TerrainClass::Hill3 => "high hills",
            TerrainClass::Mountain1 => "low mountains",
            TerrainClass::Mountain2 => "high mountains",
        }
    }
}

/// Independent feature tags carried by a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerrainFlags(u8);

impl TerrainFlags {
    pub const NONE: TerrainFlags = TerrainFlags(0);
    pub const RIVER: TerrainFlags = TerrainFlags(0b0001);
    pub const FOREST: TerrainFlags = TerrainFlags(0b0010);
    pub const CLIFF: TerrainFlags = TerrainFlags(0b0100);
    pub const ROAD: TerrainFlags = TerrainFlags(0b1000);

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn contains(self, other: TerrainFlags) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: TerrainFlags) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: TerrainFlags) {
        self.0 &= !other.0;
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TerrainFlags {
    type Output = TerrainFlags;

    fn bitor(self, rhs: TerrainFlags) -> TerrainFlags {
        TerrainFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for TerrainFlags {
    fn bitor_assign(&mut self, rhs: TerrainFlags) {
        self.0 |= rhs.0;
    }
}

/// One cell of the continuous-height backend.
///
/// `height` and `class` are private so that every write goes through
/// [`TerrainCell::set_height`], which clamps and reclassifies. Cells can be
/// serialised for inspection but not deserialised, since a decoded class
/// could disagree with its height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TerrainCell {
    height: f32,
    class: TerrainClass,
    pub flags: TerrainFlags,
    /// Display-only, `[0, 1]`.
    pub moisture: f32,
    /// Display-only, `[0, 1]`.
    pub temperature: f32,
}

impl Default for TerrainCell {
    fn default() -> Self {
        Self {
            height: 0.0,
            class: TerrainClass::Flat,
            flags: TerrainFlags::NONE,
            moisture: 0.5,
            temperature: 0.5,
        }
    }
}

impl TerrainCell {
    pub fn with_height(height: f32) -> Self {
        let mut cell = Self::default();
        cell.set_height(height);
        cell
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn class(&self) -> TerrainClass {
        self.class
    }

    #[inline]
    pub fn flags(&self) -> TerrainFlags {
        self.flags
    }

    /// Clamp to `[MIN_HEIGHT, MAX_HEIGHT]` and re-derive the class.
    #[inline]
    pub fn set_height(&mut self, height: f32) {
        let h = if height.is_nan() { 0.0 } else { height.clamp(MIN_HEIGHT, MAX_HEIGHT) };
        self.height = h;
        self.class = TerrainClass::from_height(h);
    }

    #[inline]
    pub fn has_flag(&self, flag: TerrainFlags) -> bool {
        self.flags.contains(flag)
    }
}

/// Grid of continuous-height cells.
pub type TerrainGrid = Grid<TerrainCell>;

/// Walking cost of stepping from `from` onto `to`; never below 1.
///
/// Base cost is one plus the height difference. Water triples it; forest,
/// cliffs and rivers add fixed penalties and a road takes half a point off.
pub fn movement_difficulty(from: &TerrainCell, to: &TerrainCell) -> f32 {
    let mut difficulty = (to.height() - from.height()).abs() + 1.0;

    if to.class() == TerrainClass::Water {
        difficulty *= 3.0;
    }
    if to.has_flag(TerrainFlags::FOREST) {
        difficulty += 1.5;
    }
    if to.has_flag(TerrainFlags::CLIFF) {
        difficulty += 5.0;
    }
    if to.has_flag(TerrainFlags::RIVER) {
        difficulty += 2.0;
    }
    if to.has_flag(TerrainFlags::ROAD) {
        difficulty -= 0.5;
    }

    difficulty.max(1.0)
}
