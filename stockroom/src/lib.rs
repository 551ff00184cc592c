//!
//! A small warehouse storage library.
//!
//! Boxes of various shapes are stored in a grid of capacity-bounded cells, located by id,
//! moved between cells and persisted to a line-oriented text database.
//!

/// Entities to model the warehouse: boxes, storage cells and the warehouse itself
pub mod entities;

/// Geometric shapes of boxes and the traits computing their area and volume
pub mod geometry;

/// Reading and writing the warehouse database
pub mod io;

/// Helper functions and configuration which do not belong to any specific module
pub mod util;
