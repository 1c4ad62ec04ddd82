use serde::{Deserialize, Serialize};

/// Static content of a cell once mines are placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Mine,
    /// Number of mines among the Moore neighbours, `0..=8`.
    Number(u8),
}

impl CellValue {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Number(0))
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::Number(0)
    }
}

/// Mutable per-cell overlay owned by the session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellState {
    pub opened: bool,
    /// Only ever set on the mine that lost the game.
    pub exploded: bool,
    pub flagged: bool,
}

/// What a renderer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Open(u8),
    Exploded,
    /// Unflagged mine uncovered when the game was lost.
    Mine,
    /// Flag on a safe cell, shown when the game was lost.
    Misflagged,
}
