use crate::coordinate::Coordinate;
use crate::polygon::Polygon;
use crate::{GeofenceError, GeofenceResult};

/// Axis-aligned min/max envelope over a set of coordinates. Immutable once
/// built; used as a cheap necessary-but-not-sufficient containment check
/// before the authoritative polygon test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl BoundingBox {
    pub fn from_coordinates<I>(coordinates: I) -> GeofenceResult<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut coordinates = coordinates.into_iter();
        let first = coordinates.next().ok_or(GeofenceError::InvalidGeometry)?;

        let mut south_west = first;
        let mut north_east = first;
        for coordinate in coordinates {
            south_west.latitude = south_west.latitude.min(coordinate.latitude);
            south_west.longitude = south_west.longitude.min(coordinate.longitude);
            north_east.latitude = north_east.latitude.max(coordinate.latitude);
            north_east.longitude = north_east.longitude.max(coordinate.longitude);
        }

        Ok(Self {
            south_west,
            north_east,
        })
    }

    /// Envelope over the outer rings of the given polygons. Interior rings
    /// cannot extend past their outer ring, so they are not consulted.
    pub fn from_polygons(polygons: &[Polygon]) -> GeofenceResult<Self> {
        Self::from_coordinates(
            polygons
                .iter()
                .flat_map(|polygon| polygon.exterior().iter().copied()),
        )
    }

    /// Inclusive on all four edges, so it never rejects a point the polygon
    /// test would accept.
    pub fn contains(&self, point: Coordinate) -> bool {
        self.south_west.latitude <= point.latitude
            && point.latitude <= self.north_east.latitude
            && self.south_west.longitude <= point.longitude
            && point.longitude <= self.north_east.longitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_over_coordinates() {
        let bounds = BoundingBox::from_coordinates(vec![
            Coordinate::new(3.0, -2.0),
            Coordinate::new(-1.0, 7.0),
            Coordinate::new(5.0, 0.0),
        ])
        .unwrap();

        assert_eq!(bounds.south_west, Coordinate::new(-1.0, -2.0));
        assert_eq!(bounds.north_east, Coordinate::new(5.0, 7.0));
    }

    #[test]
    fn empty_input_is_a_recoverable_error() {
        let result = BoundingBox::from_coordinates(Vec::new());
        assert_eq!(result, Err(GeofenceError::InvalidGeometry));

        let result = BoundingBox::from_polygons(&[]);
        assert_eq!(result, Err(GeofenceError::InvalidGeometry));
    }

    #[test]
    fn containment_is_inclusive() {
        let bounds = BoundingBox::from_coordinates(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(10.0, 10.0),
        ])
        .unwrap();

        assert!(bounds.contains(Coordinate::new(5.0, 5.0)));
        assert!(bounds.contains(Coordinate::new(0.0, 10.0)));
        assert!(!bounds.contains(Coordinate::new(-0.1, 5.0)));
        assert!(!bounds.contains(Coordinate::new(5.0, 10.1)));
    }
}
