// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Random fleet layouts.
use std::collections::HashSet;

use log::debug;
use once_cell::sync::Lazy;
use rand::{
    distributions::{Distribution, Standard, Uniform},
    Rng,
};

use crate::{
    board::{Board, Cell, Coordinate, Orientation, GRID_SIZE},
    placement::Placement,
    ships::Ship,
    view::BoardView,
};

/// Range of valid values for either coordinate axis.
static COORD_RANGE: Lazy<Uniform<usize>> = Lazy::new(|| Uniform::new(0, GRID_SIZE));

/// Number of random positions tried for one ship before giving up on it.
const MAX_ATTEMPTS: usize = 1000;

impl Distribution<Orientation> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Orientation {
        if rng.gen() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

/// Choose a random position for each of `ships` on the board seen in `board`, avoiding
/// the cells it already occupies and each other.
///
/// A ship that finds no free position is left out of the result.
pub fn random_placements(
    rng: &mut impl Rng,
    board: &BoardView,
    ships: impl IntoIterator<Item = Ship>,
) -> Vec<Placement> {
    let mut occupied: HashSet<Coordinate> = board
        .rows()
        .enumerate()
        .flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| **cell != Cell::Water)
                .map(move |(x, _)| Coordinate::new(x, y))
        })
        .collect();

    let mut placements = Vec::new();
    for ship in ships {
        let found = (0..MAX_ATTEMPTS).find_map(|_| {
            let start = Coordinate::new(rng.sample(&*COORD_RANGE), rng.sample(&*COORD_RANGE));
            let orientation = rng.gen();
            Board::project(start, orientation, ship.len())
                .filter(|cells| cells.iter().all(|coord| !occupied.contains(coord)))
                .map(|cells| (start, orientation, cells))
        });
        match found {
            Some((start, orientation, cells)) => {
                occupied.extend(cells);
                placements.push(Placement::new(ship.name(), start.x, start.y, orientation));
            }
            None => debug!("no room left for {}", ship),
        }
    }
    placements
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{fleet::Fleet, placement::place_fleet, testing};

    #[test]
    fn random_fleet_is_always_valid() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..50 {
            let mut board = Board::new();
            let mut fleet = Fleet::new();
            let placements = random_placements(
                &mut rng,
                &BoardView::owner(&board),
                Ship::ALL.iter().copied(),
            );
            assert_eq!(placements.len(), Ship::ALL.len());
            let report = place_fleet(&mut board, &mut fleet, &placements);
            assert!(!report.is_rejected(), "{:?}", report);
            assert!(fleet.all_placed());
        }
    }

    #[test]
    fn random_placements_avoid_existing_ships() {
        let mut rng = StdRng::seed_from_u64(7);
        let layout = testing::standard_layout();
        for _ in 0..50 {
            let mut board = Board::new();
            let mut fleet = Fleet::new();
            place_fleet(&mut board, &mut fleet, &layout[..4]);
            let pending: Vec<_> = fleet.pending().collect();
            assert_eq!(pending, vec![Ship::Destroyer]);

            let placements = random_placements(&mut rng, &BoardView::owner(&board), pending);
            let report = place_fleet(&mut board, &mut fleet, &placements);
            assert!(!report.is_rejected(), "{:?}", report);
            assert!(fleet.all_placed());
        }
    }

    #[test]
    fn full_board_gives_up() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut board = Board::new();
        for y in 0..GRID_SIZE {
            let row: Vec<_> = (0..GRID_SIZE).map(|x| Coordinate::new(x, y)).collect();
            board.occupy(&row, 'W').unwrap();
        }
        let placements =
            random_placements(&mut rng, &BoardView::owner(&board), vec![Ship::Destroyer]);
        assert!(placements.is_empty());
    }
}
