use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::entities::{CellGrid, CellIndex, StorageCell, StoredBox};
use crate::geometry::geo_enums::BoxShape;
use crate::io;
use crate::io::DatabaseError;
use crate::util::WarehouseConfig;
use crate::util::assertions;

/// A warehouse: a grid of [`StorageCell`]s indexed by location and floor.
///
/// The warehouse creates boxes (assigning unique ids), stores them, finds, moves and removes
/// them, and persists the whole grid. Location 0 and floor 0 are reserved and never hold boxes.
///
/// When autosave is enabled, the database is rewritten after every successful store, move and removal.
#[derive(Clone, Debug)]
pub struct Warehouse {
    grid: CellGrid,
    next_id: usize,
    config: WarehouseConfig,
}

impl Warehouse {
    /// Creates an empty warehouse with the default configuration.
    pub fn new(n_locations: usize, n_floors: usize) -> Self {
        Self::with_config(n_locations, n_floors, WarehouseConfig::default())
    }

    pub fn with_config(n_locations: usize, n_floors: usize, config: WarehouseConfig) -> Self {
        let grid = CellGrid::new(n_locations, n_floors, &config.cell);
        Warehouse {
            grid,
            next_id: 1,
            config,
        }
    }

    pub fn create_blob(&mut self, description: &str, weight: f64, side: u32) -> StoredBox {
        self.create(description, weight, true, BoxShape::Blob { side })
    }

    pub fn create_cube(&mut self, description: &str, weight: f64, fragile: bool, side: u32) -> StoredBox {
        self.create(description, weight, fragile, BoxShape::Cube { side })
    }

    pub fn create_cuboid(
        &mut self,
        description: &str,
        weight: f64,
        fragile: bool,
        x: u32,
        y: u32,
        z: u32,
    ) -> StoredBox {
        self.create(description, weight, fragile, BoxShape::Cuboid { x, y, z })
    }

    pub fn create_sphere(&mut self, description: &str, weight: f64, fragile: bool, radius: u32) -> StoredBox {
        self.create(description, weight, fragile, BoxShape::Sphere { radius })
    }

    /// Creates a box of any shape with the next free id. The box is not placed in storage.
    pub fn create(&mut self, description: &str, weight: f64, fragile: bool, shape: BoxShape) -> StoredBox {
        let id = self.next_id;
        self.next_id += 1;
        StoredBox::new(id, description, weight, fragile, shape)
    }

    /// Stores the box in the first cell that accepts it, scanning locations and then floors from 1.
    /// Returns where it was stored, or `None` if no cell has room.
    ///
    /// A box whose id is already in storage is refused.
    pub fn store_automatically(&mut self, item: &StoredBox) -> Option<CellIndex> {
        if self.holds_id(item.id()) {
            debug!("[WH] box {} is already stored", item.id());
            return None;
        }
        let placed = self
            .grid
            .usable_indices()
            .find(|idx| self.grid.get_mut(idx.location, idx.floor).add(item));

        match placed {
            Some(idx) => {
                debug!("[WH] box {} stored at {idx}", item.id());
                self.auto_save_changes();
            }
            None => info!("[WH] no room for box {}", item.id()),
        }
        placed
    }

    /// Stores the box in the given cell only. A box whose id is already in storage is refused.
    ///
    /// # Panics
    /// If the cell lies outside the grid.
    pub fn store_manually(&mut self, item: &StoredBox, location: usize, floor: usize) -> bool {
        if self.holds_id(item.id()) {
            debug!("[WH] box {} is already stored", item.id());
            return false;
        }
        let cell = self.grid.get_mut(location, floor);
        if let Err(rejection) = cell.admission(item) {
            debug!("[WH] box {} refused at location {location}, floor {floor}: {rejection}", item.id());
            return false;
        }
        cell.add(item);
        self.auto_save_changes();
        true
    }

    /// Finds the cell holding the box with the given id
    pub fn find_box(&self, id: usize) -> Option<CellIndex> {
        self.grid
            .usable()
            .find(|(_, cell)| cell.contains_id(id))
            .map(|(idx, _)| idx)
    }

    /// Looks up a box in a known cell without removing it.
    ///
    /// # Panics
    /// If the cell lies outside the grid.
    pub fn retrieve_copy(&self, id: usize, location: usize, floor: usize) -> Option<&StoredBox> {
        self.grid.get(location, floor).find_copy(id)
    }

    /// Moves a box to another cell. If the destination refuses it, the box is put back where it
    /// was and false is returned.
    ///
    /// # Panics
    /// If the destination lies outside the grid.
    pub fn move_box(&mut self, id: usize, new_location: usize, new_floor: usize) -> bool {
        assert!(
            self.grid.contains(new_location, new_floor),
            "destination ({new_location}, {new_floor}) out of bounds"
        );
        let Some(origin) = self.find_box(id) else {
            return false;
        };
        let Some(item) = self.grid.get_mut(origin.location, origin.floor).remove_by_id(id) else {
            unreachable!("box {id} found at {origin} but could not be removed");
        };

        if self.grid.get_mut(new_location, new_floor).add(&item) {
            debug!("[WH] box {id} moved from {origin} to location {new_location}, floor {new_floor}");
            self.auto_save_changes();
            true
        } else {
            let restored = self.grid.get_mut(origin.location, origin.floor).add(&item);
            debug_assert!(restored, "box {id} could not be returned to {origin}");
            false
        }
    }

    /// Removes a box from storage and hands it to the caller.
    pub fn take_box(&mut self, id: usize) -> Option<StoredBox> {
        let idx = self.find_box(id)?;
        let item = self.grid.get_mut(idx.location, idx.floor).remove_by_id(id);
        if item.is_some() {
            debug!("[WH] box {id} removed from {idx}");
            self.auto_save_changes();
        }
        item
    }

    pub fn remove_box(&mut self, id: usize) -> bool {
        self.take_box(id).is_some()
    }

    /// Writes the complete warehouse to `path`.
    pub fn write_database(&self, path: impl AsRef<Path>) -> Result<(), DatabaseError> {
        io::write_database(path.as_ref(), &self.grid)
    }

    /// Replaces the contents of the warehouse with those read from `path`.
    /// The grid takes the dimensions stored in the file. On error the warehouse is left untouched.
    pub fn read_database(&mut self, path: impl AsRef<Path>) -> Result<(), DatabaseError> {
        let grid = io::read_database(path.as_ref(), &self.config.cell)?;
        self.grid = grid;
        self.next_id = self.highest_id() + 1;

        debug_assert!(assertions::warehouse_ids_are_unique(self));
        debug_assert!(assertions::next_id_exceeds_stored_ids(self));
        Ok(())
    }

    /// Writes the warehouse to its configured database file
    pub fn save(&self) -> Result<(), DatabaseError> {
        self.write_database(&self.config.database_path)
    }

    /// Reads the warehouse from its configured database file
    pub fn load(&mut self) -> Result<(), DatabaseError> {
        let path = self.config.database_path.clone();
        self.read_database(path)
    }

    /// Direct access to a cell, reserved cells included.
    ///
    /// # Panics
    /// If the cell lies outside the grid.
    pub fn cell(&self, location: usize, floor: usize) -> &StorageCell {
        self.grid.get(location, floor)
    }

    /// All cells, reserved ones included, in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (CellIndex, &StorageCell)> {
        self.grid.iter()
    }

    /// The boxes in a cell, in order of insertion.
    ///
    /// # Panics
    /// If the cell lies outside the grid.
    pub fn boxes_at(&self, location: usize, floor: usize) -> &[StoredBox] {
        self.grid.get(location, floor).contents()
    }

    /// Every stored box together with the cell holding it, in scan order
    pub fn stored_boxes(&self) -> impl Iterator<Item = (CellIndex, &StoredBox)> {
        self.grid
            .usable()
            .flat_map(|(idx, cell)| cell.iter().map(move |b| (idx, b)))
    }

    /// Returns an independent copy of a cell.
    ///
    /// # Panics
    /// If the cell lies outside the grid.
    pub fn clone_cell(&self, location: usize, floor: usize) -> StorageCell {
        self.grid.get(location, floor).clone()
    }

    /// A new, empty cell with the capacity used throughout this warehouse
    pub fn empty_cell(&self) -> StorageCell {
        StorageCell::from_config(&self.config.cell)
    }

    pub fn n_locations(&self) -> usize {
        self.grid.n_locations()
    }

    pub fn n_floors(&self) -> usize {
        self.grid.n_floors()
    }

    /// Number of boxes in storage
    pub fn n_boxes(&self) -> usize {
        self.grid.usable().map(|(_, c)| c.len()).sum()
    }

    /// Id the next created box will receive
    pub fn next_id(&self) -> usize {
        self.next_id
    }

    pub fn config(&self) -> &WarehouseConfig {
        &self.config
    }

    pub fn auto_save(&self) -> bool {
        self.config.auto_save
    }

    pub fn set_auto_save(&mut self, auto_save: bool) {
        self.config.auto_save = auto_save;
    }

    pub fn database_path(&self) -> &Path {
        &self.config.database_path
    }

    pub fn set_database_path(&mut self, path: impl Into<PathBuf>) {
        self.config.database_path = path.into();
    }

    /// Whether any cell, reserved ones included, holds a box with this id
    fn holds_id(&self, id: usize) -> bool {
        self.grid.iter().any(|(_, cell)| cell.contains_id(id))
    }

    fn highest_id(&self) -> usize {
        self.stored_boxes().map(|(_, b)| b.id()).max().unwrap_or(0)
    }

    fn auto_save_changes(&self) {
        if !self.config.auto_save {
            return;
        }
        if let Err(err) = self.save() {
            //the in-memory change stands, only the file is behind
            error!("[WH] autosave failed, database file is out of date: {err}");
        }
    }
}
