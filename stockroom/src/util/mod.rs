/// Set of functions used throughout assure the correctness of the library.
pub mod assertions;

mod config;

#[doc(inline)]
pub use config::CellConfig;
#[doc(inline)]
pub use config::WarehouseConfig;
#[doc(inline)]
pub use config::{
    DEFAULT_CELL_DEPTH, DEFAULT_CELL_HEIGHT, DEFAULT_CELL_MAX_WEIGHT, DEFAULT_CELL_WIDTH,
    DEFAULT_DATABASE_FILE, TEST_DATABASE_FILE,
};
