use std::fmt::Write;
use sweeper_core::{CellCount, CellView, GameEvent, GameSession, GameStatus, MinePlacer, iter_coords};

/// Counters as last reported by the session's event stream.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Hud {
    pub status: GameStatus,
    pub remaining_safe: CellCount,
    pub remaining_mines: i32,
    pub populated: bool,
}

impl Hud {
    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::BoardChanged(board) => self.populated = board.populated,
            GameEvent::StatusChanged(status) => self.status = *status,
            GameEvent::RemainingSafeCellsChanged(count) => self.remaining_safe = *count,
            GameEvent::RemainingMinesChanged(count) => self.remaining_mines = *count,
        }
    }

    pub fn status_line(&self) -> String {
        let status = match self.status {
            GameStatus::NotStarted if !self.populated => "reveal a cell to start",
            GameStatus::NotStarted => "ready",
            GameStatus::Running => "running",
            GameStatus::Won => "you won!",
            GameStatus::Lost => "boom, you lost",
        };
        format!(
            "{status} | safe cells left: {} | mines left: {}",
            self.remaining_safe, self.remaining_mines
        )
    }
}

fn cell_glyph(view: CellView) -> char {
    use CellView::*;
    match view {
        Hidden => '#',
        Flagged => 'F',
        Open(0) => '.',
        Open(count) => char::from(b'0' + count),
        Exploded => '*',
        Mine => 'x',
        Misflagged => 'X',
    }
}

/// Draws the board with row and column indices along the edges.
pub(crate) fn render_board<P: MinePlacer>(session: &GameSession<P>) -> String {
    let (rows, cols) = session.size();
    let mut out = String::from("    ");
    for x in 0..cols {
        let _ = write!(out, "{:>3}", x);
    }
    out.push('\n');

    let mut current_row = None;
    for coords in iter_coords((rows, cols)) {
        if current_row != Some(coords.0) {
            if current_row.is_some() {
                out.push('\n');
            }
            current_row = Some(coords.0);
            let _ = write!(out, "{:>3} ", coords.0);
        }
        let glyph = session.cell_view(coords).map_or('?', cell_glyph);
        let _ = write!(out, "{:>3}", glyph);
    }
    out.push('\n');
    out
}
