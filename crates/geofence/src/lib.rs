use std::error;
use std::fmt;

pub mod bounding_box;
pub mod coordinate;
pub mod fence;
pub mod geojson;
pub mod polygon;

pub use bounding_box::BoundingBox;
pub use coordinate::Coordinate;
pub use fence::Fence;
pub use polygon::Polygon;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeofenceError {
    /// A polygon ring was defined with fewer than four coordinates.
    InsufficientCoordinates { found: usize },
    /// A geometry carried no rings at all.
    InsufficientPolygons,
    /// A wire position was not exactly a [longitude, latitude] pair.
    CoordinateFormat { found: usize },
    /// A bounding box was requested over zero coordinates.
    InvalidGeometry,
}

impl error::Error for GeofenceError {}

impl fmt::Display for GeofenceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GeofenceError::InsufficientCoordinates { found } => {
                write!(f, "A polygon ring needs at least 4 coordinates, found {}.", found)
            }
            GeofenceError::InsufficientPolygons => {
                write!(f, "The geometry contains no polygon rings.")
            }
            GeofenceError::CoordinateFormat { found } => {
                write!(
                    f,
                    "Expected a [longitude, latitude] pair, found {} components.",
                    found
                )
            }
            GeofenceError::InvalidGeometry => {
                write!(f, "Cannot compute a bounding box without coordinates.")
            }
        }
    }
}

pub type GeofenceResult<O> = Result<O, GeofenceError>;
