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

//! The fleet catalog: the five ship types every player receives.
use std::fmt;

/// Ship type from the standard fleet.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ship {
    /// Aircraft Carrier: length 5.
    Carrier,
    /// Battleship: length 4.
    Battleship,
    /// Cruiser: length 3.
    Cruiser,
    /// Submarine: length 3.
    Submarine,
    /// Destroyer: length 2.
    Destroyer,
}

/// A single row of the fleet catalog.
#[derive(Debug)]
pub struct CatalogEntry {
    /// Ship type this entry describes.
    pub ship: Ship,
    /// Name players use to refer to the ship in placement requests.
    pub name: &'static str,
    /// Number of cells the ship occupies.
    pub size: usize,
    /// Character written into the owner's board for each occupied cell.
    pub marker: char,
}

impl CatalogEntry {
    const fn new(ship: Ship, name: &'static str, size: usize, marker: char) -> Self {
        Self {
            ship,
            name,
            size,
            marker,
        }
    }
}

const ENTRIES: [CatalogEntry; 5] = [
    CatalogEntry::new(Ship::Carrier, "Aircraft Carrier", 5, 'A'),
    CatalogEntry::new(Ship::Battleship, "Battleship", 4, 'B'),
    CatalogEntry::new(Ship::Cruiser, "Cruiser", 3, 'C'),
    CatalogEntry::new(Ship::Submarine, "Submarine", 3, 'S'),
    CatalogEntry::new(Ship::Destroyer, "Destroyer", 2, 'D'),
];

/// The fleet catalog, in the order fleets are listed. Indexed by `Ship as usize`.
pub static CATALOG: [CatalogEntry; 5] = ENTRIES;

/// Number of cells covered by a complete fleet. A board carrying this many hits has
/// lost every ship.
pub const FLEET_CELLS: usize = fleet_cells();

const fn fleet_cells() -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < ENTRIES.len() {
        total += ENTRIES[i].size;
        i += 1;
    }
    total
}

impl Ship {
    /// Every ship in catalog order.
    pub const ALL: &'static [Ship] = &[
        Ship::Carrier,
        Ship::Battleship,
        Ship::Cruiser,
        Ship::Submarine,
        Ship::Destroyer,
    ];

    /// Get the catalog entry for this ship.
    pub fn entry(self) -> &'static CatalogEntry {
        &CATALOG[self as usize]
    }

    /// Get the catalog name of this ship.
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Get the length of this ship type.
    pub fn len(self) -> usize {
        self.entry().size
    }

    /// Get the character this ship leaves on its owner's board.
    pub fn marker(self) -> char {
        self.entry().marker
    }

    /// Look up a ship by its exact catalog name.
    pub fn from_name(name: &str) -> Option<Ship> {
        CATALOG
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.ship)
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_indexed_by_ship() {
        for (i, entry) in CATALOG.iter().enumerate() {
            assert_eq!(entry.ship as usize, i);
            assert_eq!(Ship::ALL[i], entry.ship);
        }
    }

    #[test]
    fn fleet_covers_seventeen_cells() {
        assert_eq!(FLEET_CELLS, 17);
        assert_eq!(Ship::ALL.iter().map(|s| s.len()).sum::<usize>(), FLEET_CELLS);
    }

    #[test]
    fn markers_are_first_letters_and_unique() {
        for ship in Ship::ALL {
            assert_eq!(ship.name().chars().next(), Some(ship.marker()));
        }
        let mut markers: Vec<_> = Ship::ALL.iter().map(|s| s.marker()).collect();
        markers.sort();
        markers.dedup();
        assert_eq!(markers.len(), Ship::ALL.len());
    }

    #[test]
    fn names_match_exactly() {
        assert_eq!(Ship::from_name("Aircraft Carrier"), Some(Ship::Carrier));
        assert_eq!(Ship::from_name("Destroyer"), Some(Ship::Destroyer));
        assert_eq!(Ship::from_name("destroyer"), None);
        assert_eq!(Ship::from_name("Carrier"), None);
        assert_eq!(Ship::from_name(""), None);
    }
}
