//! Display glyphs and colours for terrain cells.
//!
//! Colours use the 16-entry console palette (`index()`), and convert to ANSI
//! SGR foreground codes for terminals (`ansi_fg()`). A [`Palette`] is plain
//! data passed to whoever renders; [`Palette::default`] is the stock scheme.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::biome::BiomeTag;
use crate::error::Error;
use crate::terrain::{TerrainCell, TerrainClass, TerrainFlags, MAX_HEIGHT, MIN_HEIGHT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
    BrightBlue,
    BrightGreen,
    BrightCyan,
    BrightRed,
    BrightMagenta,
    BrightYellow,
    BrightWhite,
}

impl Color {
    /// 16-colour console attribute index.
    pub fn index(self) -> u8 {
        match self {
            Color::Blue => 1,
            Color::Green => 2,
            Color::Cyan => 3,
            Color::Red => 4,
            Color::Magenta => 5,
            Color::Yellow => 6,
            Color::White => 7,
            Color::BrightBlue => 9,
            Color::BrightGreen => 10,
            Color::BrightCyan => 11,
            Color::BrightRed => 12,
            Color::BrightMagenta => 13,
            Color::BrightYellow => 14,
            Color::BrightWhite => 15,
        }
    }

    /// ANSI SGR foreground code.
    pub fn ansi_fg(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Magenta => 35,
            Color::Cyan => 36,
            Color::White => 37,
            Color::BrightRed => 91,
            Color::BrightGreen => 92,
            Color::BrightYellow => 93,
            Color::BrightBlue => 94,
            Color::BrightMagenta => 95,
            Color::BrightCyan => 96,
            Color::BrightWhite => 97,
        }
    }
}

/// A symbol and the colour to draw it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub symbol: &'static str,
    pub color: Color,
}

impl Glyph {
    pub const fn new(symbol: &'static str, color: Color) -> Self {
        Self { symbol, color }
    }
}

/// Writes the symbol wrapped in ANSI colour escapes.
impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\x1b[{}m{}\x1b[0m", self.color.ansi_fg(), self.symbol)
    }
}

pub const BLOCK: &str = "█";
pub const RIVER_SYMBOL: &str = "≈";
pub const FOREST_SYMBOL: &str = "♣";
pub const CLIFF_SYMBOL: &str = "▲";
pub const ROAD_SYMBOL: &str = "=";
pub const CONTOUR_FILL: &str = "·";

const CONTOUR_LABELS: [&str; 9] = ["-3", "-2", "-1", "0", "1", "2", "3", "4", "5"];

/// Alternate views of a continuous map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    #[default]
    Normal,
    Height,
    Topographic,
    Moisture,
    Temperature,
}

impl FromStr for RenderMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(RenderMode::Normal),
            "height" => Ok(RenderMode::Height),
            "topo" | "topographic" => Ok(RenderMode::Topographic),
            "moisture" => Ok(RenderMode::Moisture),
            "temperature" => Ok(RenderMode::Temperature),
            _ => Err(Error::InvalidConfig(format!("unknown render mode '{s}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Deep to shallow.
    pub water: [Color; 4],
    pub flat: Color,
    pub hills: [Color; 3],
    pub mountains: [Color; 2],
    pub river: Color,
    pub forest: Color,
    pub cliff: Color,
    pub road: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            water: [Color::Blue, Color::BrightBlue, Color::Cyan, Color::BrightCyan],
            flat: Color::Green,
            hills: [Color::BrightGreen, Color::Yellow, Color::BrightYellow],
            mountains: [Color::Red, Color::BrightRed],
            river: Color::BrightBlue,
            forest: Color::Green,
            cliff: Color::Magenta,
            road: Color::White,
        }
    }
}

impl Palette {
    /// Block glyph for a class; water uses its deepest tier.
    pub fn class_glyph(&self, class: TerrainClass) -> Glyph {
        let color = match class {
            TerrainClass::Water => self.water[0],
            TerrainClass::Flat => self.flat,
            TerrainClass::Hill1 => self.hills[0],
            TerrainClass::Hill2 => self.hills[1],
            TerrainClass::Hill3 => self.hills[2],
            TerrainClass::Mountain1 => self.mountains[0],
            TerrainClass::Mountain2 => self.mountains[1],
        };
        Glyph::new(BLOCK, color)
    }

    /// Glyph of the highest-priority flag: river, forest, cliff, then road.
    pub fn flag_glyph(&self, flags: TerrainFlags) -> Option<Glyph> {
        if flags.contains(TerrainFlags::RIVER) {
            Some(Glyph::new(RIVER_SYMBOL, self.river))
        } else if flags.contains(TerrainFlags::FOREST) {
            Some(Glyph::new(FOREST_SYMBOL, self.forest))
        } else if flags.contains(TerrainFlags::CLIFF) {
            Some(Glyph::new(CLIFF_SYMBOL, self.cliff))
        } else if flags.contains(TerrainFlags::ROAD) {
            Some(Glyph::new(ROAD_SYMBOL, self.road))
        } else {
            None
        }
    }

    pub fn biome_glyph(&self, tag: BiomeTag) -> Glyph {
        match tag {
            BiomeTag::Plain => Glyph::new(BLOCK, self.flat),
            BiomeTag::Forest => Glyph::new(FOREST_SYMBOL, self.forest),
            BiomeTag::Mountain => Glyph::new(CLIFF_SYMBOL, self.mountains[0]),
            BiomeTag::Water => Glyph::new(RIVER_SYMBOL, self.water[0]),
            BiomeTag::Road => Glyph::new(ROAD_SYMBOL, self.road),
        }
    }

    fn water_tier(&self, height: f32) -> Color {
        if height <= MIN_HEIGHT + 0.75 {
            self.water[0]
        } else if height <= MIN_HEIGHT + 1.5 {
            self.water[1]
        } else if height <= MIN_HEIGHT + 2.25 {
            self.water[2]
        } else {
            self.water[3]
        }
    }

    /// Glyph for a continuous cell under `mode`.
    pub fn cell_glyph(&self, cell: &TerrainCell, mode: RenderMode) -> Glyph {
        match mode {
            RenderMode::Normal => self.flag_glyph(cell.flags()).unwrap_or_else(|| {
                if cell.class() == TerrainClass::Water {
                    Glyph::new(BLOCK, self.water_tier(cell.height()))
                } else {
                    self.class_glyph(cell.class())
                }
            }),
            RenderMode::Height => Glyph::new(BLOCK, height_color(cell.height())),
            RenderMode::Topographic => {
                let h = cell.height();
                let nearest = h.round();
                if (h - nearest).abs() < 0.1 {
                    let label = (nearest - MIN_HEIGHT) as usize;
                    Glyph::new(CONTOUR_LABELS[label.min(CONTOUR_LABELS.len() - 1)], Color::White)
                } else {
                    Glyph::new(CONTOUR_FILL, height_color(h))
                }
            }
            RenderMode::Moisture => Glyph::new(BLOCK, moisture_color(cell.moisture)),
            RenderMode::Temperature => Glyph::new(BLOCK, temperature_color(cell.temperature)),
        }
    }
}

fn height_color(height: f32) -> Color {
    let t = (height - MIN_HEIGHT) / (MAX_HEIGHT - MIN_HEIGHT);
    if t < 0.25 {
        Color::Blue
    } else if t < 0.5 {
        Color::Green
    } else if t < 0.75 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Dry (white) to wet (blue).
fn moisture_color(m: f32) -> Color {
    if m < 0.25 {
        Color::White
    } else if m < 0.5 {
        Color::Cyan
    } else if m < 0.75 {
        Color::BrightBlue
    } else {
        Color::Blue
    }
}

/// Cold (blue) to hot (red).
fn temperature_color(t: f32) -> Color {
    if t < 0.25 {
        Color::Blue
    } else if t < 0.5 {
        Color::Green
    } else if t < 0.75 {
        Color::Yellow
    } else {
        Color::Red
    }
}

pub fn glyph_for_class(class: TerrainClass) -> Glyph {
    Palette::default().class_glyph(class)
}

pub fn glyph_for_flags(flags: TerrainFlags) -> Option<Glyph> {
    Palette::default().flag_glyph(flags)
}

pub fn glyph_for_biome(tag: BiomeTag) -> Glyph {
    Palette::default().biome_glyph(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_colours_match_console_indices() {
        let indices: Vec<u8> = TerrainClass::ALL.iter().map(|&c| glyph_for_class(c).color.index()).collect();
        assert_eq!(indices, vec![1, 2, 10, 6, 14, 4, 12]);
    }

    #[test]
    fn river_outranks_other_flags() {
        let all = TerrainFlags::RIVER | TerrainFlags::FOREST | TerrainFlags::CLIFF | TerrainFlags::ROAD;
        assert_eq!(glyph_for_flags(all).map(|g| g.symbol), Some(RIVER_SYMBOL));
        let g = glyph_for_flags(TerrainFlags::CLIFF | TerrainFlags::ROAD).unwrap();
        assert_eq!((g.symbol, g.color), (CLIFF_SYMBOL, Color::Magenta));
        assert_eq!(glyph_for_flags(TerrainFlags::NONE), None);
    }

    #[test]
    fn deep_water_is_darker_than_shallow() {
        let p = Palette::default();
        let deep = p.cell_glyph(&TerrainCell::with_height(-3.0), RenderMode::Normal);
        let shallow = p.cell_glyph(&TerrainCell::with_height(-1.1), RenderMode::Normal);
        assert_eq!(deep.color, Color::Blue);
        assert_eq!(shallow.color, Color::Cyan);
    }

    #[test]
    fn topographic_labels_contours() {
        let p = Palette::default();
        let on = p.cell_glyph(&TerrainCell::with_height(2.05), RenderMode::Topographic);
        assert_eq!(on.symbol, "2");
        let low = p.cell_glyph(&TerrainCell::with_height(-3.0), RenderMode::Topographic);
        assert_eq!(low.symbol, "-3");
        let off = p.cell_glyph(&TerrainCell::with_height(2.5), RenderMode::Topographic);
        assert_eq!(off.symbol, CONTOUR_FILL);
    }

    #[test]
    fn moisture_view_highlights_rivers() {
        let p = Palette::default();
        let mut cell = TerrainCell::default();
        assert_eq!(p.cell_glyph(&cell, RenderMode::Moisture).color, Color::BrightBlue);
        cell.moisture = 1.0;
        assert_eq!(p.cell_glyph(&cell, RenderMode::Moisture).color, Color::Blue);
    }

    #[test]
    fn render_modes_parse() {
        assert_eq!("topo".parse::<RenderMode>().unwrap(), RenderMode::Topographic);
        assert_eq!("Moisture".parse::<RenderMode>().unwrap(), RenderMode::Moisture);
        assert!("xray".parse::<RenderMode>().is_err());
    }

    #[test]
    fn display_wraps_in_ansi_escape() {
        let g = glyph_for_biome(BiomeTag::Road);
        assert_eq!(g.to_string(), "\x1b[37m=\x1b[0m");
    }
}
