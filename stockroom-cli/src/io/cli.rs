use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use stockroom::geometry::geo_enums::BoxKind;
use stockroom::util::TEST_DATABASE_FILE;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Database file, overrides the one in the config file
    #[arg(short, long, value_name = "FILE", conflicts_with = "test_data")]
    pub database: Option<PathBuf>,
    /// Work on the test database instead
    #[arg(short, long)]
    pub test_data: bool,
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
    /// Warnings and errors are also appended to this file
    #[arg(short, long, value_name = "FILE", default_value = "exceptionlog.txt")]
    pub exception_log: PathBuf,
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Database file selected on the command line, if any
    pub fn database_path(&self) -> Option<PathBuf> {
        if self.test_data {
            Some(PathBuf::from(TEST_DATABASE_FILE))
        } else {
            self.database.clone()
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create an empty warehouse, replacing the database file
    Init {
        #[arg(long)]
        locations: Option<usize>,
        #[arg(long)]
        floors: Option<usize>,
    },
    /// Create a box and store it, in the first free cell or in the given one
    Add {
        #[arg(value_enum)]
        shape: ShapeArg,
        /// Side (cube, blob), radius (sphere) or x y z (cuboid), in cm
        #[arg(required = true, num_args = 1..=3, value_name = "DIMENSIONS")]
        dimensions: Vec<u32>,
        #[arg(short, long)]
        description: String,
        /// Weight in kg
        #[arg(short, long, allow_negative_numbers = true)]
        weight: f64,
        /// Ignored for blobs, which are always fragile
        #[arg(short, long)]
        fragile: bool,
        #[arg(long, requires = "floor")]
        location: Option<usize>,
        #[arg(long, requires = "location")]
        floor: Option<usize>,
    },
    /// Print where a box is stored, and the box itself
    Find { id: usize },
    /// Print the boxes in a cell
    Show { location: usize, floor: usize },
    /// Print every cell holding boxes
    List,
    Move {
        id: usize,
        location: usize,
        floor: usize,
    },
    Remove { id: usize },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeArg {
    Cube,
    Cuboid,
    Sphere,
    Blob,
}

impl ShapeArg {
    pub fn n_dimensions(&self) -> usize {
        match self {
            ShapeArg::Cuboid => 3,
            ShapeArg::Cube | ShapeArg::Sphere | ShapeArg::Blob => 1,
        }
    }
}

impl From<ShapeArg> for BoxKind {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Cube => BoxKind::Cube,
            ShapeArg::Cuboid => BoxKind::Cuboid,
            ShapeArg::Sphere => BoxKind::Sphere,
            ShapeArg::Blob => BoxKind::Blob,
        }
    }
}
