/// Reading and writing complete databases
pub mod database;

/// Encoding of single boxes as database records, and the registry of record parsers
pub mod record;

mod error;

#[doc(inline)]
pub use database::{read_database, write_database};

#[doc(inline)]
pub use error::DatabaseError;
