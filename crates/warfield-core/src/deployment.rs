//! Battlefield split between the two teams and their headquarters corners.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::checked_cell_count;

/// Side length of the square headquarters block.
pub const HQ_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::Red, Team::Blue];
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Red => f.write_str("red"),
            Team::Blue => f.write_str("blue"),
        }
    }
}

/// Deployment geometry: red holds the columns left of `width / 2`, blue the
/// rest. Headquarters sit in the top-left (red) and bottom-right (blue) corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentZones {
    width: usize,
    height: usize,
}

impl DeploymentZones {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        checked_cell_count(width, height)?;
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Column where blue's half begins.
    pub fn boundary(&self) -> usize {
        self.width / 2
    }

    pub fn team_at(&self, x: usize) -> Team {
        if x < self.boundary() {
            Team::Red
        } else {
            Team::Blue
        }
    }

    /// True when `(x, y)` is on the map and inside `team`'s half.
    pub fn can_deploy(&self, team: Team, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.team_at(x) == team
    }

    /// Top-left cell of `team`'s headquarters block.
    pub fn hq_origin(&self, team: Team) -> (usize, usize) {
        match team {
            Team::Red => (0, 0),
            Team::Blue => (self.width.saturating_sub(HQ_SIZE), self.height.saturating_sub(HQ_SIZE)),
        }
    }

    /// Cells of `team`'s headquarters block, clipped to the map.
    pub fn hq_cells(&self, team: Team) -> impl Iterator<Item = (usize, usize)> {
        let (x0, y0) = self.hq_origin(team);
        let x1 = (x0 + HQ_SIZE).min(self.width);
        let y1 = (y0 + HQ_SIZE).min(self.height);
        (y0..y1).flat_map(move |y| (x0..x1).map(move |x| (x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_planes_split_at_middle_column() {
        let z = DeploymentZones::new(20, 10).unwrap();
        assert_eq!(z.team_at(9), Team::Red);
        assert_eq!(z.team_at(10), Team::Blue);
        assert!(z.can_deploy(Team::Red, 0, 9));
        assert!(!z.can_deploy(Team::Red, 10, 0));
        assert!(!z.can_deploy(Team::Blue, 20, 0));
    }

    #[test]
    fn hq_blocks_sit_in_opposite_corners() {
        let z = DeploymentZones::new(20, 10).unwrap();
        let red: Vec<_> = z.hq_cells(Team::Red).collect();
        let blue: Vec<_> = z.hq_cells(Team::Blue).collect();
        assert_eq!(red.len(), 16);
        assert_eq!(blue.len(), 16);
        assert_eq!(red.first(), Some(&(0, 0)));
        assert_eq!(blue.first(), Some(&(16, 6)));
        assert_eq!(blue.last(), Some(&(19, 9)));
    }

    #[test]
    fn tiny_map_clips_hq() {
        let z = DeploymentZones::new(3, 2).unwrap();
        assert_eq!(z.hq_cells(Team::Red).count(), 6);
        assert_eq!(z.hq_origin(Team::Blue), (0, 0));
    }

    #[test]
    fn rejects_empty_map() {
        assert!(DeploymentZones::new(0, 4).is_err());
    }
}
