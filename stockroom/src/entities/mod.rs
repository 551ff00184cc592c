/// Box value objects and their record encoding
pub mod boxes;

mod cell;
mod grid;
mod warehouse;

#[doc(inline)]
pub use boxes::StoredBox;

#[doc(inline)]
pub use cell::StorageCell;

#[doc(inline)]
pub use cell::Rejection;

#[doc(inline)]
pub use grid::CellGrid;

#[doc(inline)]
pub use grid::CellIndex;

#[doc(inline)]
pub use warehouse::Warehouse;
