//! Step 5: road network between open-plain nodes.
//!
//! Nodes sit on a lattice of spacing `node_spacing` and are joined greedily:
//! starting from node 0, the shortest clear edge from the connected set to an
//! unconnected node is paved until no eligible edge remains. This is Prim's
//! algorithm restricted to edges shorter than `max_road_length` whose straight
//! line crosses only plain or road. Extra edges are then sprinkled among nearby
//! nodes that still have no road around them.
use rand::Rng;
use tracing::debug;

use super::lakes::all_plain_within;
use super::params::RoadParams;
use super::{BiomeGrid, BiomeTag};

/// Fraction of `max_road_length` within which extra edges are considered.
pub const EXTRA_ROAD_RANGE: f32 = 0.7;
/// Chebyshev radius searched for existing road before adding an extra edge.
pub const REDUNDANCY_RADIUS: isize = 2;

/// A candidate road junction, alive only while the network is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoadNode {
    pub x: usize,
    pub y: usize,
    pub connected: bool,
}

impl RoadNode {
    fn distance(&self, other: &RoadNode) -> f32 {
        let dx = self.x as f32 - other.x as f32;
        let dy = self.y as f32 - other.y as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Cells on the straight line from `from` to `to`, endpoints included.
///
/// `steps = max(|dx|, |dy|)` samples, each rounded half-up, so consecutive
/// cells are always 8-adjacent.
pub fn line_cells(from: (usize, usize), to: (usize, usize)) -> Vec<(usize, usize)> {
    let (x0, y0) = (from.0 as f64, from.1 as f64);
    let dx = to.0 as f64 - x0;
    let dy = to.1 as f64 - y0;
    let steps = dx.abs().max(dy.abs()) as usize;
    if steps == 0 {
        return vec![from];
    }

    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            let x = (x0 + dx * t + 0.5).floor() as usize;
            let y = (y0 + dy * t + 0.5).floor() as usize;
            (x, y)
        })
        .collect()
}

/// Lattice nodes whose `min_plain_radius` square is entirely plain.
pub fn collect_nodes(grid: &BiomeGrid, params: &RoadParams) -> Vec<RoadNode> {
    if params.node_spacing == 0 {
        return Vec::new();
    }
    let start = params.node_spacing / 2;
    let mut nodes = Vec::new();
    for y in (start..grid.height()).step_by(params.node_spacing) {
        for x in (start..grid.width()).step_by(params.node_spacing) {
            if all_plain_within(grid, x, y, params.min_plain_radius) {
                nodes.push(RoadNode { x, y, connected: false });
            }
        }
    }
    nodes
}

fn path_is_clear(grid: &BiomeGrid, a: &RoadNode, b: &RoadNode) -> bool {
    line_cells((a.x, a.y), (b.x, b.y))
        .into_iter()
        .all(|(x, y)| matches!(grid.get(x, y), Some(BiomeTag::Plain | BiomeTag::Road)))
}

fn pave(grid: &mut BiomeGrid, a: &RoadNode, b: &RoadNode) {
    for (x, y) in line_cells((a.x, a.y), (b.x, b.y)) {
        if let Some(cell) = grid.get_mut(x, y) {
            if *cell == BiomeTag::Plain {
                *cell = BiomeTag::Road;
            }
        }
    }
}

fn road_nearby(grid: &BiomeGrid, node: &RoadNode) -> bool {
    let (cx, cy) = (node.x as isize, node.y as isize);
    (-REDUNDANCY_RADIUS..=REDUNDANCY_RADIUS).any(|dy| {
        (-REDUNDANCY_RADIUS..=REDUNDANCY_RADIUS)
            .any(|dx| grid.get_signed(cx + dx, cy + dy) == Some(&BiomeTag::Road))
    })
}

/// Greedy spanning connection from node 0. Returns the number of edges paved.
///
/// Each unconnected node keeps its shortest clear edge into the connected
/// set, and only the newest connected node is relaxed against, so a full run
/// costs O(n²) distance checks. Paving turns plain into road and both are
/// passable, so an edge's clearance never changes while the network grows.
/// Ties go to the lowest candidate index, then the lowest anchor index.
pub fn connect_nodes(grid: &mut BiomeGrid, nodes: &mut [RoadNode], max_length: f32) -> usize {
    let Some(first) = nodes.first_mut() else { return 0 };
    first.connected = true;
    let mut best: Vec<Option<(f32, usize)>> = vec![None; nodes.len()];
    let mut newest = 0;
    let mut edges = 0;

    loop {
        let anchor = nodes[newest];
        for (i, candidate) in nodes.iter().enumerate().filter(|(_, n)| !n.connected) {
            let d = candidate.distance(&anchor);
            if d >= max_length {
                continue;
            }
            let improves = match best[i] {
                None => true,
                Some((bd, bj)) => d < bd || (d == bd && newest < bj),
            };
            if improves && path_is_clear(grid, &anchor, candidate) {
                best[i] = Some((d, newest));
            }
        }

        let mut next: Option<(usize, usize, f32)> = None;
        for (i, entry) in best.iter().enumerate() {
            let Some((d, j)) = *entry else { continue };
            if nodes[i].connected || next.map_or(false, |(_, _, nd)| d >= nd) {
                continue;
            }
            next = Some((i, j, d));
        }

        let Some((i, j, _)) = next else { break };
        let (candidate, anchor) = (nodes[i], nodes[j]);
        pave(grid, &anchor, &candidate);
        nodes[i].connected = true;
        newest = i;
        edges += 1;
    }
    edges
}

/// Sprinkle extra edges from nodes with no road within [`REDUNDANCY_RADIUS`].
///
/// Only the source node's surroundings are checked, not the destination's.
/// Returns the number of edges paved.
pub fn add_extra_roads<R: Rng>(grid: &mut BiomeGrid, nodes: &[RoadNode], params: &RoadParams, rng: &mut R) -> usize {
    let range = params.max_road_length * EXTRA_ROAD_RANGE;
    let chance = params.extra_road_chance / 100.0;
    let mut edges = 0;

    for (i, source) in nodes.iter().enumerate() {
        for (j, target) in nodes.iter().enumerate() {
            if i == j || source.distance(target) >= range {
                continue;
            }
            if road_nearby(grid, source) {
                continue;
            }
            if rng.gen::<f32>() < chance && path_is_clear(grid, source, target) {
                pave(grid, source, target);
                edges += 1;
            }
        }
    }
    edges
}

/// Build the full network on `grid`, returning the nodes with their final
/// `connected` state.
pub fn build_road_network<R: Rng>(grid: &mut BiomeGrid, params: &RoadParams, rng: &mut R) -> Vec<RoadNode> {
    let mut nodes = collect_nodes(grid, params);
    if nodes.len() < 2 {
        debug!(nodes = nodes.len(), "too few road nodes, skipping network");
        return nodes;
    }

    let spanning = connect_nodes(grid, &mut nodes, params.max_road_length);
    let extra = add_extra_roads(grid, &nodes, params, rng);
    debug!(nodes = nodes.len(), spanning, extra, "road network built");
    nodes
}
