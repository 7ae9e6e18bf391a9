//! Terrain core for a turn-based grid wargame.
//!
//! Two generation backends share one read interface ([`TerrainBackend`]):
//!
//! - [`HeightfieldGenerator`] samples seeded noise into a continuous height
//!   field, classifies it into seven [`TerrainClass`]es and shapes it with
//!   water limiting, rivers, cliffs and smoothing.
//! - [`BiomeGenerator`] paints discrete [`BiomeTag`]s directly, refines them
//!   with neighbour rules, lakes and a road network, and retries with the next
//!   seed until every tag meets its coverage floor.
//!
//! [`effective_speed`] turns a unit's terrain multipliers into a speed on
//! whichever [`MovementTerrain`] either backend reports.
pub mod backend;
pub mod biome;
pub mod deployment;
pub mod error;
pub mod generator;
pub mod grid;
pub mod movement;
pub mod noise;
pub mod palette;
pub mod shaping;
pub mod terrain;

pub use backend::{BackendKind, TerrainBackend, TerrainMap};
pub use biome::{BiomeConfig, BiomeGeneration, BiomeGenerator, BiomeGrid, BiomeTag};
pub use deployment::{DeploymentZones, Team};
pub use error::{Error, Result};
pub use generator::{generate_terrain, generate_terrain_with, GeneratorConfig, HeightfieldGenerator, NoiseAlgorithm};
pub use grid::Grid;
pub use movement::{effective_speed, MovementTerrain, SpeedProfile, TerrainMultipliers};
pub use palette::{glyph_for_biome, glyph_for_class, glyph_for_flags, Glyph, Palette, RenderMode};
pub use terrain::{TerrainCell, TerrainClass, TerrainFlags, TerrainGrid};
