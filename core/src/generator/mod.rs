use crate::*;
pub use preset::*;
pub use random::*;

mod preset;
mod random;

/// Source of mine positions for a board whose first reveal is already known.
///
/// Implementations return the coordinates to mine; `MineLayout::populate` checks that they are
/// distinct, in bounds, avoid `safe`, and number exactly `config.mines`.
pub trait MinePlacer {
    fn place_mines(&mut self, config: GameConfig, safe: Coord2) -> Vec<Coord2>;
}
