use float_cmp::approx_eq;
use itertools::Itertools;
use log::error;

use crate::entities::{StorageCell, Warehouse};
use crate::geometry::geo_traits::Solid;

//Various checks to verify correctness of the state of the system
//Used in debug_assert!() blocks

pub fn cell_totals_match_contents(cell: &StorageCell) -> bool {
    let volume: u64 = cell.iter().map(|b| b.volume()).sum();
    let weight: f64 = cell.iter().map(|b| b.weight()).sum();
    let n_fragile = cell.iter().filter(|b| b.is_fragile()).count();

    if volume != cell.current_volume() {
        error!("cell volume {} does not match contents {volume}", cell.current_volume());
        return false;
    }
    if !approx_eq!(f64, weight, cell.current_weight(), epsilon = 1e-6) {
        error!("cell weight {} does not match contents {weight}", cell.current_weight());
        return false;
    }
    if cell.contains_fragile() != (n_fragile > 0) {
        error!("cell fragile flag out of sync ({n_fragile} fragile boxes)");
        return false;
    }
    if n_fragile > 0 && cell.len() > 1 {
        error!("fragile box shares a cell with {} others", cell.len() - 1);
        return false;
    }
    true
}

pub fn warehouse_ids_are_unique(warehouse: &Warehouse) -> bool {
    let ids = warehouse.cells().flat_map(|(_, c)| c.iter().map(|b| b.id())).collect_vec();
    let n_unique = ids.iter().unique().count();
    if n_unique != ids.len() {
        error!("{} duplicate box ids in warehouse", ids.len() - n_unique);
        return false;
    }
    true
}

pub fn next_id_exceeds_stored_ids(warehouse: &Warehouse) -> bool {
    match warehouse.cells().flat_map(|(_, c)| c.iter().map(|b| b.id())).max() {
        Some(max_id) if max_id >= warehouse.next_id() => {
            error!("next id {} is not above stored id {max_id}", warehouse.next_id());
            false
        }
        _ => true,
    }
}
