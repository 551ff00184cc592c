use std::fmt::{Display, Formatter};

use crate::entities::StoredBox;
use crate::geometry::geo_traits::Solid;
use crate::util::CellConfig;
use crate::util::assertions;

/// A single storage location in which [`StoredBox`]es can be placed.
///
/// The cell keeps running totals of the volume and weight it holds and refuses any box which
/// would exceed its capacity. Fragile boxes are kept in isolation: a fragile box only enters an
/// empty cell, and a cell holding one accepts nothing else.
#[derive(Debug)]
pub struct StorageCell {
    height: u32,
    width: u32,
    depth: u32,
    max_volume: u64,
    max_weight: f64,
    current_volume: u64,
    current_weight: f64,
    contains_fragile: bool,
    /// Boxes in order of insertion
    boxes: Vec<StoredBox>,
}

/// Reason a [`StorageCell`] refuses a box. Variants are listed in the order they are checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The cell already holds a fragile box
    FragileOccupant,
    /// The box is fragile and the cell is not empty
    FragileNeedsEmptyCell,
    /// The combined volume would exceed the cell's volume
    VolumeExceeded,
    /// The combined weight would exceed the cell's maximum load
    WeightExceeded,
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Rejection::FragileOccupant => "cell already holds a fragile box",
            Rejection::FragileNeedsEmptyCell => "fragile boxes can only be placed in an empty cell",
            Rejection::VolumeExceeded => "not enough volume left",
            Rejection::WeightExceeded => "maximum weight would be exceeded",
        };
        f.write_str(msg)
    }
}

impl StorageCell {
    pub fn new(height: u32, width: u32, depth: u32, max_weight: f64) -> Self {
        let max_volume = (height as u64)
            .saturating_mul(width as u64)
            .saturating_mul(depth as u64);
        StorageCell {
            height,
            width,
            depth,
            max_volume,
            max_weight,
            current_volume: 0,
            current_weight: 0.0,
            contains_fragile: false,
            boxes: vec![],
        }
    }

    pub fn from_config(config: &CellConfig) -> Self {
        Self::new(config.height, config.width, config.depth, config.max_weight)
    }

    /// Checks whether `item` could be added, reporting the first rule it breaks.
    pub fn admission(&self, item: &StoredBox) -> Result<(), Rejection> {
        if self.contains_fragile {
            return Err(Rejection::FragileOccupant);
        }
        if item.is_fragile() && !self.is_empty() {
            return Err(Rejection::FragileNeedsEmptyCell);
        }
        if self.current_volume.saturating_add(item.volume()) > self.max_volume {
            return Err(Rejection::VolumeExceeded);
        }
        if self.current_weight + item.weight() > self.max_weight {
            return Err(Rejection::WeightExceeded);
        }
        Ok(())
    }

    pub fn can_accept(&self, item: &StoredBox) -> bool {
        self.admission(item).is_ok()
    }

    /// Stores a copy of `item` if the cell accepts it. Returns false and leaves the cell unchanged otherwise.
    pub fn add(&mut self, item: &StoredBox) -> bool {
        if !self.can_accept(item) {
            return false;
        }
        self.current_volume += item.volume();
        self.current_weight += item.weight();
        self.contains_fragile |= item.is_fragile();
        self.boxes.push(item.clone());

        debug_assert!(assertions::cell_totals_match_contents(self));
        true
    }

    /// Removes the box with the given id and returns it, if present.
    pub fn remove_by_id(&mut self, id: usize) -> Option<StoredBox> {
        let idx = self.boxes.iter().position(|b| b.id() == id)?;
        let removed = self.boxes.remove(idx);
        self.current_volume -= removed.volume();
        self.current_weight -= removed.weight();
        if removed.is_fragile() {
            //a fragile box is always alone in its cell
            self.contains_fragile = false;
        }
        if self.boxes.is_empty() {
            //clear accumulated float error
            self.current_weight = 0.0;
        }

        debug_assert!(assertions::cell_totals_match_contents(self));
        Some(removed)
    }

    /// Returns a reference to the box with the given id without removing it.
    pub fn find_copy(&self, id: usize) -> Option<&StoredBox> {
        self.boxes.iter().find(|b| b.id() == id)
    }

    pub fn contains_id(&self, id: usize) -> bool {
        self.boxes.iter().any(|b| b.id() == id)
    }

    /// All boxes in the cell, in order of insertion
    pub fn contents(&self) -> &[StoredBox] {
        &self.boxes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StoredBox> {
        self.boxes.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn max_volume(&self) -> u64 {
        self.max_volume
    }

    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    pub fn current_volume(&self) -> u64 {
        self.current_volume
    }

    pub fn current_weight(&self) -> f64 {
        self.current_weight
    }

    pub fn contains_fragile(&self) -> bool {
        self.contains_fragile
    }

    pub fn remaining_volume(&self) -> u64 {
        self.max_volume - self.current_volume
    }

    pub fn remaining_weight(&self) -> f64 {
        (self.max_weight - self.current_weight).max(0.0)
    }
}

/// Clones the cell by re-adding every box, in order, to an empty cell of equal capacity.
impl Clone for StorageCell {
    fn clone(&self) -> Self {
        let mut clone = StorageCell::new(self.height, self.width, self.depth, self.max_weight);
        for item in &self.boxes {
            let added = clone.add(item);
            debug_assert!(added, "box {} refused while cloning a cell", item.id());
        }
        clone
    }
}

impl<'a> IntoIterator for &'a StorageCell {
    type Item = &'a StoredBox;
    type IntoIter = std::slice::Iter<'a, StoredBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}
