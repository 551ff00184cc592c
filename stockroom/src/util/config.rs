use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Height of a storage cell unless configured otherwise (cm)
pub const DEFAULT_CELL_HEIGHT: u32 = 150;
/// Width of a storage cell unless configured otherwise (cm)
pub const DEFAULT_CELL_WIDTH: u32 = 250;
/// Depth of a storage cell unless configured otherwise (cm)
pub const DEFAULT_CELL_DEPTH: u32 = 200;
/// Maximum load of a storage cell unless configured otherwise (kg)
pub const DEFAULT_CELL_MAX_WEIGHT: f64 = 1000.0;

/// Database file used when no other is given
pub const DEFAULT_DATABASE_FILE: &str = "database.txt";
/// Database file holding the sample data set, same format as [`DEFAULT_DATABASE_FILE`]
pub const TEST_DATABASE_FILE: &str = "testdatabase.txt";

///Capacity of every cell in a warehouse
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct CellConfig {
    ///Inner height in centimeters
    pub height: u32,
    ///Inner width in centimeters
    pub width: u32,
    ///Inner depth in centimeters
    pub depth: u32,
    ///Maximum total weight in kilograms
    pub max_weight: f64,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_CELL_HEIGHT,
            width: DEFAULT_CELL_WIDTH,
            depth: DEFAULT_CELL_DEPTH,
            max_weight: DEFAULT_CELL_MAX_WEIGHT,
        }
    }
}

///Configuration of a [`Warehouse`](crate::entities::Warehouse)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WarehouseConfig {
    ///Capacity used for every cell, also for cells created while reading a database
    pub cell: CellConfig,
    ///Rewrite the database after every successful store, move or removal
    pub auto_save: bool,
    ///File written by autosave
    pub database_path: PathBuf,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            cell: CellConfig::default(),
            auto_save: true,
            database_path: PathBuf::from(DEFAULT_DATABASE_FILE),
        }
    }
}
