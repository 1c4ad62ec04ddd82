use futures_channel::mpsc::UnboundedReceiver;
use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    NotStarted,
    Running,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_started(self) -> bool {
        !matches!(self, Self::NotStarted)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from reset to win or loss.
///
/// The session owns the per-cell open/flag overlay and drives the reveal rules on top of a
/// [`MineLayout`]. Mines are placed on the first reveal so that cell is always safe. Every
/// state change is published to subscribers as a [`GameEvent`].
#[derive(Debug)]
pub struct GameSession<P = RandomMinePlacer> {
    layout: MineLayout,
    cells: Array2<CellState>,
    remaining_safe: CellCount,
    flag_count: CellCount,
    status: GameStatus,
    exploded: Option<Coord2>,
    placer: P,
    events: EventBus,
}

impl GameSession<RandomMinePlacer> {
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::new(config, RandomMinePlacer::seeded(seed))
    }

    pub fn with_entropy(config: GameConfig) -> Self {
        Self::new(config, RandomMinePlacer::from_entropy())
    }
}

impl<P: MinePlacer> GameSession<P> {
    pub fn new(config: GameConfig, placer: P) -> Self {
        log::debug!("New session {:?}", config);
        Self {
            layout: MineLayout::create_empty(config),
            cells: Array2::default(config.size.to_nd_index()),
            remaining_safe: config.safe_cell_count(),
            flag_count: 0,
            status: GameStatus::NotStarted,
            exploded: None,
            placer,
            events: EventBus::new(),
        }
    }

    /// Starts over on a fresh, unpopulated board of the given size.
    ///
    /// On invalid dimensions the current game is kept as it is.
    pub fn reset(&mut self, rows: Coord, cols: Coord, mines: CellCount) -> Result<()> {
        let config = GameConfig::new(rows, cols, mines)?;
        self.restart(config);
        Ok(())
    }

    /// Starts over on a fresh board with an already validated configuration.
    pub fn restart(&mut self, config: GameConfig) {
        log::debug!("Reset session {:?}", config);
        self.layout = MineLayout::create_empty(config);
        self.cells = Array2::default(config.size.to_nd_index());
        self.remaining_safe = config.safe_cell_count();
        self.flag_count = 0;
        self.exploded = None;

        self.events
            .publish(GameEvent::BoardChanged(self.layout.snapshot()));
        self.set_status(GameStatus::NotStarted);
        self.events
            .publish(GameEvent::RemainingSafeCellsChanged(self.remaining_safe));
        self.events
            .publish(GameEvent::RemainingMinesChanged(self.remaining_mines()));
    }

    pub fn subscribe(&mut self) -> UnboundedReceiver<GameEvent> {
        let current = [
            GameEvent::BoardChanged(self.layout.snapshot()),
            GameEvent::StatusChanged(self.status),
            GameEvent::RemainingSafeCellsChanged(self.remaining_safe),
            GameEvent::RemainingMinesChanged(self.remaining_mines()),
        ];
        self.events.subscribe(current)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.layout.game_config()
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.layout.snapshot()
    }

    pub fn cell_state(&self, coords: Coord2) -> Result<CellState> {
        let coords = self.layout.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    /// Unopened cells without a mine.
    pub fn remaining_safe_cells(&self) -> CellCount {
        self.remaining_safe
    }

    /// Mines minus flags, negative when the player placed too many flags.
    pub fn remaining_mines(&self) -> i32 {
        i32::from(self.layout.mine_count()) - i32::from(self.flag_count)
    }

    pub fn exploded_mine(&self) -> Option<Coord2> {
        self.exploded
    }

    pub fn opened_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.opened).count()
    }

    /// What the player sees at `coords`, uncovering mines once the game is over.
    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        use CellView::*;

        let coords = self.layout.validate_coords(coords)?;
        let cell = self.cells[coords.to_nd_index()];
        let value = self.layout[coords];

        Ok(match (cell.opened, cell.flagged, value) {
            (true, _, CellValue::Number(count)) => Open(count),
            (true, _, CellValue::Mine) => Exploded,
            (false, true, CellValue::Number(_)) if self.status == GameStatus::Lost => Misflagged,
            (false, true, _) => Flagged,
            (false, false, CellValue::Mine) => match self.status {
                GameStatus::Lost => Mine,
                GameStatus::Won => Flagged,
                _ => Hidden,
            },
            (false, false, CellValue::Number(_)) => Hidden,
        })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.layout.validate_coords(coords)?;
        if self.status.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.opened {
            return Ok(MarkOutcome::NoChange);
        }

        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flag_count += 1;
        } else {
            self.flag_count -= 1;
        }
        self.events
            .publish(GameEvent::RemainingMinesChanged(self.remaining_mines()));
        Ok(MarkOutcome::Changed)
    }

    /// Opens a cell, or chords an already opened number.
    ///
    /// The first reveal of a session places the mines around the target. Requests on a finished
    /// game or a flagged cell change nothing.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.layout.validate_coords(coords)?;

        if self.status.is_finished() || self.cells[coords.to_nd_index()].flagged {
            return Ok(RevealOutcome::NoChange);
        }

        if !self.status.is_started() {
            self.layout.populate(coords, &mut self.placer)?;
            self.events
                .publish(GameEvent::BoardChanged(self.layout.snapshot()));
            self.set_status(GameStatus::Running);
        }

        let outcome = if self.cells[coords.to_nd_index()].opened {
            self.chord(coords)
        } else {
            self.open_cell(coords)
        };

        Ok(self.settle(outcome))
    }

    /// Opens every unopened neighbour of a numbered cell.
    ///
    /// Mines among the neighbours are skipped until all safe neighbours are open; then the first
    /// one found explodes.
    fn chord(&mut self, coords: Coord2) -> RevealOutcome {
        let value = self.layout[coords];
        if value.is_mine() || value.is_zero() {
            return RevealOutcome::NoChange;
        }

        let mut outcome = RevealOutcome::NoChange;
        let mut first_mine = None;
        for neighbor in self.layout.neighbors_of(coords) {
            let cell = self.cells[neighbor.to_nd_index()];
            if cell.opened || cell.flagged {
                continue;
            }
            if self.layout.contains_mine(neighbor) {
                first_mine.get_or_insert(neighbor);
                continue;
            }
            outcome = outcome | self.open_cell(neighbor);
        }

        if let Some(mine) = first_mine {
            self.explode(mine);
            outcome = outcome | RevealOutcome::HitMine;
        }
        outcome
    }

    fn open_cell(&mut self, coords: Coord2) -> RevealOutcome {
        match self.layout[coords] {
            CellValue::Mine => {
                self.explode(coords);
                RevealOutcome::HitMine
            }
            CellValue::Number(0) => {
                let opened = self.flood_fill(coords);
                self.decrease_remaining(opened);
                RevealOutcome::Revealed
            }
            CellValue::Number(_) => {
                if self.open(coords) {
                    self.decrease_remaining(1);
                    RevealOutcome::Revealed
                } else {
                    RevealOutcome::NoChange
                }
            }
        }
    }

    /// Opens the zero region containing `start` along with the numbers bordering it.
    ///
    /// Returns how many cells were newly opened.
    fn flood_fill(&mut self, start: Coord2) -> CellCount {
        let mut visited = HashSet::new();
        visited.insert(start);
        let mut to_visit = VecDeque::from([start]);
        let mut opened: CellCount = 0;

        while let Some(visit_coords) = to_visit.pop_front() {
            if self.open(visit_coords) {
                opened += 1;
            }

            for neighbor in self.layout.neighbors_of(visit_coords) {
                let cell = self.cells[neighbor.to_nd_index()];
                if cell.opened || cell.flagged {
                    continue;
                }
                match self.layout[neighbor] {
                    CellValue::Number(0) => {
                        if visited.insert(neighbor) {
                            to_visit.push_back(neighbor);
                        }
                    }
                    CellValue::Number(_) => {
                        if self.open(neighbor) {
                            opened += 1;
                        }
                    }
                    // a zero cell has no mine neighbours
                    CellValue::Mine => {}
                }
            }
        }

        log::trace!(
            "Flood-fill from {:?} opened {} cells over {} zero cells",
            start,
            opened,
            visited.len()
        );
        opened
    }

    fn open(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.opened || cell.flagged {
            return false;
        }
        cell.opened = true;
        true
    }

    fn explode(&mut self, coords: Coord2) {
        let cell = &mut self.cells[coords.to_nd_index()];
        cell.opened = true;
        cell.exploded = true;
        self.exploded = Some(coords);
        log::debug!("Mine exploded at {:?}", coords);
        self.set_status(GameStatus::Lost);
    }

    fn decrease_remaining(&mut self, opened: CellCount) {
        if opened == 0 {
            return;
        }
        self.remaining_safe = self.remaining_safe.saturating_sub(opened);
        self.events
            .publish(GameEvent::RemainingSafeCellsChanged(self.remaining_safe));
    }

    fn settle(&mut self, outcome: RevealOutcome) -> RevealOutcome {
        if outcome != RevealOutcome::HitMine
            && self.status == GameStatus::Running
            && self.remaining_safe == 0
        {
            self.set_status(GameStatus::Won);
            RevealOutcome::Won
        } else {
            outcome
        }
    }

    fn set_status(&mut self, status: GameStatus) {
        if self.status == status {
            return;
        }
        log::debug!("Status {:?} -> {:?}", self.status, status);
        self.status = status;
        self.events.publish(GameEvent::StatusChanged(status));
    }
}
