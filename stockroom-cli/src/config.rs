use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use stockroom::util::WarehouseConfig;

/// Number of locations of a new warehouse, reserved location 0 included
pub const DEFAULT_N_LOCATIONS: usize = 101;
/// Number of floors of a new warehouse, reserved floor 0 included
pub const DEFAULT_N_FLOORS: usize = 4;

/// Configuration for the stockroom command line tool
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    /// Cell capacity, autosave and database file of the warehouse
    pub warehouse: WarehouseConfig,
    /// Grid size used by `init` when none is given on the command line
    pub n_locations: usize,
    pub n_floors: usize,
}

impl CliConfig {
    pub fn validate(&self) -> Result<()> {
        validate_grid_size(self.n_locations, self.n_floors)?;
        let cell = &self.warehouse.cell;
        ensure!(
            cell.height > 0 && cell.width > 0 && cell.depth > 0,
            "cell dimensions must be positive, got {}x{}x{}",
            cell.height,
            cell.width,
            cell.depth
        );
        let volume = (cell.height as u64)
            .checked_mul(cell.width as u64)
            .and_then(|v| v.checked_mul(cell.depth as u64));
        ensure!(
            volume.is_some(),
            "cell of {}x{}x{} cm is too large",
            cell.height,
            cell.width,
            cell.depth
        );
        let max_weight = cell.max_weight;
        ensure!(
            max_weight.is_finite() && max_weight >= 0.0,
            "cell max weight must be a non-negative number, got {max_weight}"
        );
        Ok(())
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            warehouse: WarehouseConfig::default(),
            n_locations: DEFAULT_N_LOCATIONS,
            n_floors: DEFAULT_N_FLOORS,
        }
    }
}

/// A warehouse needs at least one cell besides the reserved row and column
pub fn validate_grid_size(n_locations: usize, n_floors: usize) -> Result<()> {
    ensure!(
        n_locations >= 2 && n_floors >= 2,
        "a warehouse needs at least 2 locations and 2 floors, got {n_locations}x{n_floors}"
    );
    Ok(())
}
