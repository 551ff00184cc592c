use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::geometry::geo_traits::Solid;

/// Geometric payload of a box, dimensions in centimeters.
///
/// Spheres and blobs are measured as if they were cubes: a sphere occupies the cube around it
/// (edge = diameter), a blob the cube with edge `side`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoxShape {
    Cube { side: u32 },
    Cuboid { x: u32, y: u32, z: u32 },
    Sphere { radius: u32 },
    Blob { side: u32 },
}

impl BoxShape {
    pub fn kind(&self) -> BoxKind {
        match self {
            BoxShape::Cube { .. } => BoxKind::Cube,
            BoxShape::Cuboid { .. } => BoxKind::Cuboid,
            BoxShape::Sphere { .. } => BoxKind::Sphere,
            BoxShape::Blob { .. } => BoxKind::Blob,
        }
    }

    /// The dimensions of the shape, in the order they are persisted.
    pub fn dimensions(&self) -> Vec<u32> {
        match *self {
            BoxShape::Cube { side } | BoxShape::Blob { side } => vec![side],
            BoxShape::Cuboid { x, y, z } => vec![x, y, z],
            BoxShape::Sphere { radius } => vec![radius],
        }
    }

    /// Edges of the bounding cuboid, sorted ascending
    fn sorted_edges(&self) -> [u64; 3] {
        let mut edges = match *self {
            BoxShape::Cube { side } | BoxShape::Blob { side } => [side as u64; 3],
            BoxShape::Cuboid { x, y, z } => [x as u64, y as u64, z as u64],
            BoxShape::Sphere { radius } => [radius as u64 * 2; 3],
        };
        edges.sort_unstable();
        edges
    }
}

impl Solid for BoxShape {
    fn area(&self) -> u64 {
        let [_, mid, max] = self.sorted_edges();
        mid.saturating_mul(max)
    }

    fn volume(&self) -> u64 {
        self.sorted_edges()
            .iter()
            .fold(1, |acc: u64, e| acc.saturating_mul(*e))
    }

    fn max_dimension(&self) -> u64 {
        let [_, _, max] = self.sorted_edges();
        max
    }
}

/// The closed set of box variants, without their dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoxKind {
    Cube,
    Cuboid,
    Sphere,
    Blob,
}

impl BoxKind {
    pub const ALL: [BoxKind; 4] = [BoxKind::Cube, BoxKind::Cuboid, BoxKind::Sphere, BoxKind::Blob];

    /// Name used as the type tag of a persisted record and in display strings
    pub fn tag(&self) -> &'static str {
        match self {
            BoxKind::Cube => "Cube",
            BoxKind::Cuboid => "Cuboid",
            BoxKind::Sphere => "Sphere",
            BoxKind::Blob => "Blob",
        }
    }

    /// Blobs cannot be anything but fragile
    pub fn always_fragile(&self) -> bool {
        matches!(self, BoxKind::Blob)
    }
}

impl Display for BoxKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
