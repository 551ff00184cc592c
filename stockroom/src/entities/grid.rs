use std::fmt::{Display, Formatter};

use crate::entities::StorageCell;
use crate::util::CellConfig;

/// Coordinates of a [`StorageCell`] within the warehouse
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex {
    pub location: usize,
    pub floor: usize,
}

impl CellIndex {
    pub fn new(location: usize, floor: usize) -> Self {
        Self { location, floor }
    }
}

impl Display for CellIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "location {}, floor {}", self.location, self.floor)
    }
}

/// Two-dimensional grid of [`StorageCell`]s, indexed by location and floor.
///
/// Location 0 and floor 0 exist but are reserved: placement, search and persistence only visit
/// cells from index 1 onward (see [`CellGrid::usable_indices`]). Only raw access reaches them.
#[derive(Clone, Debug)]
pub struct CellGrid {
    cells: Vec<StorageCell>,
    n_locations: usize,
    n_floors: usize,
}

impl CellGrid {
    /// Creates a grid of empty cells, all with the capacity described by `config`.
    pub fn new(n_locations: usize, n_floors: usize, config: &CellConfig) -> Self {
        let cells = (0..n_locations * n_floors)
            .map(|_| StorageCell::from_config(config))
            .collect();
        Self {
            cells,
            n_locations,
            n_floors,
        }
    }

    pub fn n_locations(&self) -> usize {
        self.n_locations
    }

    pub fn n_floors(&self) -> usize {
        self.n_floors
    }

    /// True if `location` and `floor` are within the bounds of the grid (reserved cells included)
    pub fn contains(&self, location: usize, floor: usize) -> bool {
        location < self.n_locations && floor < self.n_floors
    }

    /// # Panics
    /// If the cell lies outside the grid.
    pub fn get(&self, location: usize, floor: usize) -> &StorageCell {
        &self.cells[self.calculate_index(location, floor)]
    }

    /// # Panics
    /// If the cell lies outside the grid.
    pub fn get_mut(&mut self, location: usize, floor: usize) -> &mut StorageCell {
        let idx = self.calculate_index(location, floor);
        &mut self.cells[idx]
    }

    /// All cells, reserved ones included, in row-major order (locations outer, floors inner).
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, &StorageCell)> {
        let n_floors = self.n_floors;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (CellIndex::new(i / n_floors, i % n_floors), c))
    }

    /// Indices of all non-reserved cells, in the order they are scanned for placement and search.
    pub fn usable_indices(&self) -> impl Iterator<Item = CellIndex> + use<> {
        let n_floors = self.n_floors;
        (1..self.n_locations)
            .flat_map(move |location| (1..n_floors).map(move |floor| CellIndex::new(location, floor)))
    }

    /// All non-reserved cells, in scan order
    pub fn usable(&self) -> impl Iterator<Item = (CellIndex, &StorageCell)> {
        self.usable_indices()
            .map(|idx| (idx, self.get(idx.location, idx.floor)))
    }

    fn calculate_index(&self, location: usize, floor: usize) -> usize {
        assert!(
            self.contains(location, floor),
            "cell ({location}, {floor}) out of bounds for grid of {} locations and {} floors",
            self.n_locations,
            self.n_floors
        );
        location * self.n_floors + floor
    }
}
