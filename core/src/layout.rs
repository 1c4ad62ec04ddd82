use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Static mine/number grid of one board.
///
/// Starts out all zero and is filled exactly once by [`MineLayout::populate`], after the first
/// reveal coordinate is known. Values never change afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    values: Array2<CellValue>,
    mine_count: CellCount,
    populated: bool,
}

impl MineLayout {
    pub fn create_empty(config: GameConfig) -> Self {
        Self {
            values: Array2::default(config.size.to_nd_index()),
            mine_count: config.mines,
            populated: false,
        }
    }

    pub fn create_empty_board(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        GameConfig::new(rows, cols, mines).map(Self::create_empty)
    }

    /// Places the mines, keeping `safe` clear, and fills in the neighbour counts.
    ///
    /// A layout that is already populated is left untouched.
    pub fn populate(&mut self, safe: Coord2, placer: &mut impl MinePlacer) -> Result<()> {
        let safe = self.validate_coords(safe)?;
        if self.populated {
            log::warn!("Mine layout already populated, ignoring request to populate again");
            return Ok(());
        }

        let config = self.game_config();
        let mine_coords = placer.place_mines(config, safe);
        let mine_mask = self.mine_mask_from(&mine_coords, safe)?;

        let size = self.size();
        for coords in iter_coords(size) {
            self.values[coords.to_nd_index()] = if mine_mask[coords.to_nd_index()] {
                CellValue::Mine
            } else {
                let adjacent = mine_mask
                    .iter_neighbors(coords)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count();
                CellValue::Number(adjacent as u8)
            };
        }
        self.populated = true;

        log::debug!(
            "Populated {}x{} layout with {} mines, safe cell {:?}",
            size.0,
            size.1,
            self.mine_count,
            safe
        );
        Ok(())
    }

    fn mine_mask_from(&self, mine_coords: &[Coord2], safe: Coord2) -> Result<Array2<bool>> {
        if mine_coords.len() != usize::from(self.mine_count) {
            log::warn!(
                "Mine placer returned {} mines, expected {}",
                mine_coords.len(),
                self.mine_count
            );
            return Err(GameError::InvalidMineLayout);
        }

        let mut mine_mask: Array2<bool> = Array2::default(self.values.raw_dim());
        for &coords in mine_coords {
            if !in_bounds(coords, self.size()) || coords == safe {
                return Err(GameError::InvalidMineLayout);
            }
            let slot = &mut mine_mask[coords.to_nd_index()];
            if *slot {
                return Err(GameError::InvalidMineLayout);
            }
            *slot = true;
        }
        Ok(mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn value_at(&self, coords: Coord2) -> Result<CellValue> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.values.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    pub fn mine_coords(&self) -> Vec<Coord2> {
        iter_coords(self.size())
            .filter(|&coords| self.contains_mine(coords))
            .collect()
    }

    pub fn neighbors_of(&self, coords: Coord2) -> Neighbors {
        neighbors_of(coords, self.size())
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            size: self.size(),
            mine_count: self.mine_count,
            populated: self.populated,
            values: self.values.clone(),
        }
    }
}

impl Index<Coord2> for MineLayout {
    type Output = CellValue;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.values[coords.to_nd_index()]
    }
}

/// Point-in-time copy of a layout handed to subscribers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: Coord2,
    pub mine_count: CellCount,
    pub populated: bool,
    pub values: Array2<CellValue>,
}

impl BoardSnapshot {
    pub fn value_at(&self, coords: Coord2) -> Option<CellValue> {
        in_bounds(coords, self.size).then(|| self.values[coords.to_nd_index()])
    }
}
