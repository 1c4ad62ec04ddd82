use super::*;

/// Places a fixed list of mines regardless of the safe cell.
///
/// Useful for replays and scripted boards; the layout rejects the list if it mines the safe
/// cell or does not match the configured count.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PresetMinePlacer {
    mines: Vec<Coord2>,
}

impl PresetMinePlacer {
    pub fn new(mines: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl MinePlacer for PresetMinePlacer {
    fn place_mines(&mut self, _config: GameConfig, _safe: Coord2) -> Vec<Coord2> {
        self.mines.clone()
    }
}
