use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Uniform placement by rejection sampling: draw a cell, keep it unless it is the safe cell or
/// already mined, repeat until enough mines are placed.
#[derive(Clone, Debug)]
pub struct RandomMinePlacer {
    rng: SmallRng,
}

impl RandomMinePlacer {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl Default for RandomMinePlacer {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl MinePlacer for RandomMinePlacer {
    fn place_mines(&mut self, config: GameConfig, safe: Coord2) -> Vec<Coord2> {
        let (rows, cols) = config.size;
        let free_cells = config.total_cells().saturating_sub(1);
        if config.mines > free_cells {
            log::warn!(
                "Cannot keep the start cell safe, requested {} mines but only {} cells are free",
                config.mines,
                free_cells
            );
            return Vec::new();
        }

        let mut taken: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut mines = Vec::with_capacity(config.mines.into());
        let mut rejected: u64 = 0;

        while mines.len() < usize::from(config.mines) {
            let coords = (self.rng.random_range(0..rows), self.rng.random_range(0..cols));
            if coords == safe || taken[coords.to_nd_index()] {
                rejected += 1;
                continue;
            }
            taken[coords.to_nd_index()] = true;
            mines.push(coords);
        }

        log::trace!(
            "Placed {} mines avoiding {:?}, rejected {} draws",
            mines.len(),
            safe,
            rejected
        );
        mines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_requested_number_of_distinct_mines() {
        let config = GameConfig::new(9, 9, 10).unwrap();
        let mut placer = RandomMinePlacer::seeded(7);

        let mut mines = placer.place_mines(config, (4, 4));
        mines.sort();
        mines.dedup();

        assert_eq!(mines.len(), 10);
        assert!(mines.iter().all(|&coords| in_bounds(coords, config.size)));
    }

    #[test]
    fn never_mines_the_safe_cell() {
        let config = GameConfig::new(3, 3, 8).unwrap();

        for seed in 0..64 {
            let mines = RandomMinePlacer::seeded(seed).place_mines(config, (1, 2));
            assert_eq!(mines.len(), 8);
            assert!(!mines.contains(&(1, 2)));
        }
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let config = GameConfig::INTERMEDIATE;

        let a = RandomMinePlacer::seeded(42).place_mines(config, (0, 0));
        let b = RandomMinePlacer::seeded(42).place_mines(config, (0, 0));

        assert_eq!(a, b);
    }

    #[test]
    fn zero_mines_places_nothing() {
        let config = GameConfig::new(2, 2, 0).unwrap();

        assert!(RandomMinePlacer::seeded(1).place_mines(config, (0, 0)).is_empty());
    }
}
