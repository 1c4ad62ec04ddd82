use sweeper_core::*;

fn count_adjacent_mines(layout: &MineLayout, coords: Coord2) -> usize {
    layout
        .neighbors_of(coords)
        .into_iter()
        .filter(|&pos| layout.contains_mine(pos))
        .count()
}

fn opened(session: &GameSession) -> usize {
    iter_coords(session.size())
        .filter(|&coords| session.cell_state(coords).unwrap().opened)
        .count()
}

#[test]
fn populated_values_match_neighbor_mines() {
    for seed in 0..50 {
        let mut session = GameSession::with_seed(GameConfig::INTERMEDIATE, seed);
        session.reveal((8, 8)).unwrap();
        let layout = session.layout();

        assert_eq!(layout.mine_coords().len(), 40);
        for coords in iter_coords(layout.size()) {
            match layout[coords] {
                CellValue::Mine => {}
                CellValue::Number(count) => assert_eq!(
                    usize::from(count),
                    count_adjacent_mines(layout, coords),
                    "seed {seed} at {coords:?}"
                ),
            }
        }
    }
}

#[test]
fn first_reveal_is_never_a_mine() {
    let config = GameConfig::new(4, 5, 19).unwrap();
    for seed in 0..8 {
        for coords in iter_coords(config.size) {
            let mut session = GameSession::with_seed(config, seed);

            let outcome = session.reveal(coords).unwrap();

            assert!(!session.layout().contains_mine(coords), "{coords:?}");
            assert_ne!(outcome, RevealOutcome::HitMine);
            // only one safe cell, so the first reveal always wins
            assert_eq!(session.status(), GameStatus::Won);
        }
    }
}

#[test]
fn remaining_safe_cells_follow_opened_count() {
    let config = GameConfig::new(12, 12, 20).unwrap();
    let safe_cells = usize::from(config.safe_cell_count());

    for seed in 0..30 {
        let mut session = GameSession::with_seed(config, seed);
        session.reveal((0, 0)).unwrap();

        // keep revealing safe cells in row order until the game is won
        for coords in iter_coords(config.size) {
            if session.is_finished() {
                break;
            }
            // opened cells would chord into their mines
            if session.layout().contains_mine(coords)
                || session.cell_state(coords).unwrap().opened
            {
                continue;
            }
            session.reveal(coords).unwrap();
            assert_ne!(session.status(), GameStatus::Lost);
            assert_eq!(
                usize::from(session.remaining_safe_cells()),
                safe_cells - opened(&session),
                "seed {seed} after {coords:?}"
            );
        }

        assert_eq!(session.status(), GameStatus::Won);
        assert_eq!(session.remaining_safe_cells(), 0);
        assert_eq!(opened(&session), safe_cells);
    }
}

#[test]
fn losing_marks_exactly_one_exploded_cell() {
    for seed in 0..20 {
        let mut session = GameSession::with_seed(GameConfig::BEGINNER, seed);
        session.reveal((4, 4)).unwrap();
        if session.is_finished() {
            continue;
        }
        let mine = session.layout().mine_coords()[0];

        assert_eq!(session.reveal(mine).unwrap(), RevealOutcome::HitMine);

        let exploded: Vec<_> = iter_coords(session.size())
            .filter(|&coords| session.cell_state(coords).unwrap().exploded)
            .collect();
        assert_eq!(exploded, vec![mine]);
        assert_eq!(session.status(), GameStatus::Lost);
    }
}

#[test]
fn forced_corner_mine_scenario() {
    let config = GameConfig::new(3, 3, 1).unwrap();
    let mut session = GameSession::new(config, PresetMinePlacer::new([(0, 0)]));

    assert_eq!(session.reveal((2, 2)), Ok(RevealOutcome::Won));

    let expected_ones = [(0, 1), (1, 0), (1, 1)];
    for coords in iter_coords((3, 3)) {
        let expected = if coords == (0, 0) {
            CellValue::Mine
        } else if expected_ones.contains(&coords) {
            CellValue::Number(1)
        } else {
            CellValue::Number(0)
        };
        assert_eq!(session.layout().value_at(coords), Ok(expected));
    }
    assert_eq!(session.opened_count(), 8);
    assert_eq!(session.status(), GameStatus::Won);
}

#[test]
fn out_of_bounds_reveal_leaves_board_untouched() {
    let mut session = GameSession::with_seed(GameConfig::new(4, 4, 2).unwrap(), 3);
    session.reveal((0, 0)).unwrap();
    let before: Vec<_> = iter_coords(session.size())
        .map(|coords| session.cell_state(coords).unwrap())
        .collect();

    assert_eq!(session.reveal((5, 5)), Err(GameError::OutOfBounds));

    let after: Vec<_> = iter_coords(session.size())
        .map(|coords| session.cell_state(coords).unwrap())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn snapshot_serializes_to_json() {
    let config = GameConfig::new(2, 2, 1).unwrap();
    let mut session = GameSession::new(config, PresetMinePlacer::new([(1, 1)]));
    session.reveal((0, 0)).unwrap();

    let json = serde_json::to_value(GameEvent::BoardChanged(session.snapshot())).unwrap();

    assert_eq!(json["BoardChanged"]["size"], serde_json::json!([2, 2]));
    assert_eq!(json["BoardChanged"]["populated"], serde_json::json!(true));
    assert_eq!(
        json["BoardChanged"]["values"]["data"][3],
        serde_json::json!("Mine")
    );
}
