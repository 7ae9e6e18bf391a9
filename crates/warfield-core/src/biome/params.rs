//! Probability tables and tunables for the biome backend.
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::BiomeTag;

const PROBABILITY_TOLERANCE: f32 = 1e-3;

/// Share of the map assigned to each tag by the base classification.
/// Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseProbabilities {
    pub plain: f32,
    pub forest: f32,
    pub mountain: f32,
    pub water: f32,
    pub road: f32,
}

impl Default for BaseProbabilities {
    fn default() -> Self {
        Self { plain: 0.40, forest: 0.20, mountain: 0.15, water: 0.15, road: 0.10 }
    }
}

impl BaseProbabilities {
    pub fn uniform() -> Self {
        Self { plain: 0.2, forest: 0.2, mountain: 0.2, water: 0.2, road: 0.2 }
    }

    /// `(tag, probability)` in cumulative-threshold order.
    pub fn entries(&self) -> [(BiomeTag, f32); 5] {
        [
            (BiomeTag::Plain, self.plain),
            (BiomeTag::Forest, self.forest),
            (BiomeTag::Mountain, self.mountain),
            (BiomeTag::Water, self.water),
            (BiomeTag::Road, self.road),
        ]
    }

    /// Tag whose cumulative band contains `v ∈ [0, 1]`.
    pub fn pick(&self, v: f32) -> BiomeTag {
        let mut cumulative = 0.0;
        for (tag, p) in self.entries() {
            cumulative += p;
            if v < cumulative {
                return tag;
            }
        }
        // Rounding can leave the top of the range uncovered.
        BiomeTag::Road
    }
}

/// Neighbour-count rules for the transition pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionParams {
    /// Forest or mountain with at least this many plain neighbours becomes plain.
    pub plain_threshold: usize,
    pub mountain_threshold: usize,
    pub forest_threshold: usize,
    /// Percent chance, 0–100.
    pub transition_chance: f32,
}

impl Default for TransitionParams {
    fn default() -> Self {
        Self { plain_threshold: 5, mountain_threshold: 4, forest_threshold: 3, transition_chance: 30.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LakeParams {
    /// Spacing of the candidate lattice.
    pub min_distance: usize,
    /// Side length of a stamped lake.
    pub lake_size: usize,
    /// Percent chance, 0–100.
    pub generation_chance: f32,
    pub plain_check_radius: usize,
}

impl Default for LakeParams {
    fn default() -> Self {
        Self { min_distance: 8, lake_size: 3, generation_chance: 40.0, plain_check_radius: 2 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadParams {
    pub node_spacing: usize,
    /// Edges must be strictly shorter than this.
    pub max_road_length: f32,
    /// Percent chance, 0–100.
    pub extra_road_chance: f32,
    pub min_plain_radius: usize,
}

impl Default for RoadParams {
    fn default() -> Self {
        Self { node_spacing: 6, max_road_length: 20.0, extra_road_chance: 25.0, min_plain_radius: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeNoiseParams {
    pub base_frequency: f64,
    pub noise_layers: u32,
    pub persistence: f64,
    pub lacunarity: f64,
}

impl Default for BiomeNoiseParams {
    fn default() -> Self {
        Self { base_frequency: 0.08, noise_layers: 4, persistence: 0.5, lacunarity: 2.0 }
    }
}

/// Everything the biome backend needs for one run. `seed` is the first
/// attempt's seed; retries use `seed + 1`, `seed + 2`, …
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeConfig {
    pub base_probabilities: BaseProbabilities,
    pub transitions: TransitionParams,
    pub lakes: LakeParams,
    pub roads: RoadParams,
    pub noise: BiomeNoiseParams,
    pub seed: u32,
}

impl BiomeConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        let entries = self.base_probabilities.entries();
        if let Some((tag, p)) = entries.iter().find(|(_, p)| !p.is_finite() || *p < 0.0) {
            return Err(Error::InvalidConfig(format!("{tag:?} probability must be non-negative, got {p}")));
        }
        let sum: f32 = entries.iter().map(|(_, p)| p).sum();
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(Error::InvalidConfig(format!("base probabilities sum to {sum}, expected 1.0")));
        }

        for (name, chance) in [
            ("transition_chance", self.transitions.transition_chance),
            ("generation_chance", self.lakes.generation_chance),
            ("extra_road_chance", self.roads.extra_road_chance),
        ] {
            if !(0.0..=100.0).contains(&chance) {
                return Err(Error::InvalidConfig(format!("{name} must be a percentage, got {chance}")));
            }
        }

        if self.lakes.min_distance == 0 {
            return Err(Error::InvalidConfig("lake min_distance must be at least 1".into()));
        }
        if self.roads.node_spacing == 0 {
            return Err(Error::InvalidConfig("road node_spacing must be at least 1".into()));
        }
        if !self.roads.max_road_length.is_finite() || self.roads.max_road_length < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "max_road_length must be non-negative, got {}",
                self.roads.max_road_length
            )));
        }
        if self.noise.noise_layers == 0 {
            return Err(Error::InvalidConfig("noise_layers must be at least 1".into()));
        }
        if !self.noise.base_frequency.is_finite() || self.noise.base_frequency <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "base_frequency must be positive, got {}",
                self.noise.base_frequency
            )));
        }
        Ok(())
    }
}
