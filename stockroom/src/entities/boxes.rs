use std::fmt::{Display, Formatter};

use crate::geometry::geo_enums::{BoxKind, BoxShape};
use crate::geometry::geo_traits::Solid;

/// Separator between the fields of a persisted record
pub const RECORD_DELIMITER: char = '#';

/// Character substituted for [`RECORD_DELIMITER`] (and line breaks) in descriptions
pub const DELIMITER_REPLACEMENT: char = '%';

/// Maximum number of characters in a description, enforced by callers that accept user input.
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// A box which can be stored in a [`StorageCell`](crate::entities::StorageCell).
///
/// Geometry is derived from the [`BoxShape`] once, at construction, and never recomputed.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredBox {
    id: usize,
    description: String,
    /// Weight in kilograms
    weight: f64,
    fragile: bool,
    shape: BoxShape,
    area: u64,
    volume: u64,
    max_dimension: u64,
    /// Declared insurance value, not persisted
    pub insurance_value: i64,
}

impl StoredBox {
    /// Creates a new box. Blobs are always fragile, regardless of `fragile`.
    pub fn new(
        id: usize,
        description: impl Into<String>,
        weight: f64,
        fragile: bool,
        shape: BoxShape,
    ) -> Self {
        debug_assert!(weight.is_finite() && weight >= 0.0, "invalid weight: {weight}");
        let description = sanitize_description(description.into());
        let fragile = fragile || shape.kind().always_fragile();

        StoredBox {
            id,
            description,
            weight,
            fragile,
            area: shape.area(),
            volume: shape.volume(),
            max_dimension: shape.max_dimension(),
            shape,
            insurance_value: 0,
        }
    }

    /// Unique identifier, assigned by the [`Warehouse`](crate::entities::Warehouse)
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn is_fragile(&self) -> bool {
        self.fragile
    }

    pub fn shape(&self) -> &BoxShape {
        &self.shape
    }

    pub fn kind(&self) -> BoxKind {
        self.shape.kind()
    }

    /// Encodes the box as a single line of the database format:
    /// `Tag#id#description#weight#[fragile#]dimensions...`
    ///
    /// Blobs omit the fragile field.
    pub fn to_record(&self) -> String {
        let d = RECORD_DELIMITER;
        let mut record = format!(
            "{}{d}{}{d}{}{d}{}",
            self.kind().tag(),
            self.id(),
            self.description,
            self.weight
        );
        if !self.kind().always_fragile() {
            record.push(d);
            record.push_str(bool_field(self.fragile));
        }
        for dim in self.shape.dimensions() {
            record.push(d);
            record.push_str(&dim.to_string());
        }
        record
    }

    /// One-line summary: `Type: Cube, ID: 14`
    pub fn short_string(&self) -> String {
        format!("Type: {}, ID: {}", self.kind(), self.id())
    }
}

impl Solid for StoredBox {
    fn area(&self) -> u64 {
        self.area
    }

    fn volume(&self) -> u64 {
        self.volume
    }

    fn max_dimension(&self) -> u64 {
        self.max_dimension
    }
}

impl Display for StoredBox {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Type: {}", self.kind())?;
        writeln!(f, "ID: {}", self.id())?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Weight: {} kg", self.weight)?;
        writeln!(f, "Fragile: {}", if self.fragile { "Yes" } else { "No" })?;
        match self.shape {
            BoxShape::Cube { side } | BoxShape::Blob { side } => writeln!(f, "Side: {side} cm")?,
            BoxShape::Cuboid { x, y, z } => {
                writeln!(f, "X side: {x} cm")?;
                writeln!(f, "Y side: {y} cm")?;
                writeln!(f, "Z side: {z} cm")?;
            }
            BoxShape::Sphere { radius } => writeln!(f, "Radius: {radius} cm")?,
        }
        writeln!(f, "Area: {} square cm", self.area)?;
        writeln!(f, "Volume: {} cubic cm", self.volume)?;
        writeln!(f, "Max Dimension: {} cm", self.max_dimension)
    }
}

/// Strips characters from a description which would break the line-oriented record format.
pub fn sanitize_description(description: String) -> String {
    if description.contains([RECORD_DELIMITER, '\n', '\r']) {
        description.replace([RECORD_DELIMITER, '\n', '\r'], &DELIMITER_REPLACEMENT.to_string())
    } else {
        description
    }
}

pub(crate) fn bool_field(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}
