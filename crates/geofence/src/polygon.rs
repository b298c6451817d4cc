use std::f64::consts::PI;

use utility::geo;

use crate::bounding_box::BoundingBox;
use crate::coordinate::Coordinate;
use crate::{GeofenceError, GeofenceResult};

/// Tolerance for the collinearity part of the on-segment test.
const ON_SEGMENT_EPSILON: f64 = 1e-9;

/// A closed ring of coordinates plus zero or more interior polygons (holes).
///
/// Ring closure is a construction invariant: when the supplied sequence does
/// not end with a copy of its first coordinate, one is appended. The bounding
/// box is computed once here and reused by every containment query.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    exterior: Vec<Coordinate>,
    interiors: Vec<Polygon>,
    bounds: BoundingBox,
}

impl Polygon {
    pub fn new(coordinates: Vec<Coordinate>) -> GeofenceResult<Self> {
        Self::with_interiors(coordinates, Vec::new())
    }

    /// Interior polygons are holes cut out of the outer ring. They must lie
    /// inside it; that placement is a usage convention, not validated here.
    pub fn with_interiors(
        coordinates: Vec<Coordinate>,
        interiors: Vec<Polygon>,
    ) -> GeofenceResult<Self> {
        if coordinates.len() < 4 {
            return Err(GeofenceError::InsufficientCoordinates {
                found: coordinates.len(),
            });
        }

        let mut exterior = coordinates;
        if exterior.first() != exterior.last() {
            let first = exterior[0];
            exterior.push(first);
        }
        let bounds = BoundingBox::from_coordinates(exterior.iter().copied())?;

        Ok(Self {
            exterior,
            interiors,
            bounds,
        })
    }

    /// Builds a polygon from GeoJSON-style rings: ring 0 is the outer
    /// boundary, rings 1..n become interior polygons.
    pub fn from_rings(mut rings: Vec<Vec<Coordinate>>) -> GeofenceResult<Self> {
        if rings.is_empty() {
            return Err(GeofenceError::InsufficientPolygons);
        }
        let exterior = rings.remove(0);
        let interiors = rings
            .into_iter()
            .map(Polygon::new)
            .collect::<GeofenceResult<Vec<_>>>()?;
        Self::with_interiors(exterior, interiors)
    }

    /// The closed outer ring (last coordinate repeats the first).
    pub fn exterior(&self) -> &[Coordinate] {
        &self.exterior
    }

    pub fn interiors(&self) -> &[Polygon] {
        &self.interiors
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Whether the point lies inside this polygon.
    ///
    /// A point exactly on a ring segment counts as inside iff
    /// `include_boundary` is set. Points inside an interior polygon are
    /// excluded; an interior ring's edge still belongs to the shape, so it
    /// follows `include_boundary` as well. Total over all inputs: degenerate
    /// or self-intersecting rings yield whatever the winding sum yields.
    pub fn contains(&self, point: Coordinate, include_boundary: bool) -> bool {
        if !self.ring_contains(point, include_boundary) {
            return false;
        }
        !self
            .interiors
            .iter()
            .any(|hole| hole.contains(point, !include_boundary))
    }

    /// Winding test against the outer ring only.
    ///
    /// Sums the signed angle each ring segment subtends at the point. A
    /// total of ±2π means the ring wraps around the point; anything else
    /// leaves it outside.
    fn ring_contains(&self, point: Coordinate, include_boundary: bool) -> bool {
        if !self.bounds.contains(point) {
            return false;
        }

        let mut total_turn = 0.0;
        for segment in self.exterior.windows(2) {
            let (start, end) = (segment[0], segment[1]);
            if point_on_segment(point, start, end) {
                return include_boundary;
            }
            let from = geo::heading(
                start.longitude - point.longitude,
                start.latitude - point.latitude,
            );
            let to = geo::heading(
                end.longitude - point.longitude,
                end.latitude - point.latitude,
            );
            total_turn += geo::shortest_turn(from, to);
        }

        let half_turns = (total_turn / PI).round();
        half_turns == 2.0 || half_turns == -2.0
    }
}

/// Exact-ish on-segment test: collinear within tolerance and between the
/// endpoints on both axes. Handles vertical segments and the point sitting
/// on a vertex without special cases.
fn point_on_segment(point: Coordinate, start: Coordinate, end: Coordinate) -> bool {
    let cross = (end.longitude - start.longitude) * (point.latitude - start.latitude)
        - (end.latitude - start.latitude) * (point.longitude - start.longitude);
    if cross.abs() > ON_SEGMENT_EPSILON {
        return false;
    }

    point.latitude >= start.latitude.min(end.latitude)
        && point.latitude <= start.latitude.max(end.latitude)
        && point.longitude >= start.longitude.min(end.longitude)
        && point.longitude <= start.longitude.max(end.longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinates(points: &[(f64, f64)]) -> Vec<Coordinate> {
        points
            .iter()
            .map(|(latitude, longitude)| Coordinate::new(*latitude, *longitude))
            .collect()
    }

    fn square() -> Polygon {
        Polygon::new(coordinates(&[
            (0.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
            (10.0, 0.0),
        ]))
        .unwrap()
    }

    #[test]
    fn rings_are_closed_on_construction() {
        let polygon = square();
        assert_eq!(polygon.exterior().len(), 5);
        assert_eq!(polygon.exterior().first(), polygon.exterior().last());

        // an already closed ring is left alone
        let closed = Polygon::new(coordinates(&[
            (0.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
            (10.0, 0.0),
            (0.0, 0.0),
        ]))
        .unwrap();
        assert_eq!(closed.exterior().len(), 5);
    }

    #[test]
    fn too_few_coordinates_are_rejected() {
        let result = Polygon::new(coordinates(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0)]));
        assert_eq!(
            result,
            Err(GeofenceError::InsufficientCoordinates { found: 3 })
        );
    }

    #[test]
    fn from_rings_requires_at_least_one_ring() {
        assert_eq!(
            Polygon::from_rings(Vec::new()),
            Err(GeofenceError::InsufficientPolygons)
        );
    }

    #[test]
    fn square_containment() {
        let polygon = square();
        assert!(polygon.contains(Coordinate::new(5.0, 5.0), true));
        assert!(!polygon.contains(Coordinate::new(15.0, 15.0), true));
        // inside neither the shape nor its bounding box
        assert!(!polygon.contains(Coordinate::new(-1.0, 5.0), true));
    }

    #[test]
    fn boundary_inclusion_flag() {
        let polygon = square();
        let on_edge = Coordinate::new(0.0, 5.0);
        assert!(polygon.contains(on_edge, true));
        assert!(!polygon.contains(on_edge, false));

        let on_vertex = Coordinate::new(10.0, 10.0);
        assert!(polygon.contains(on_vertex, true));
        assert!(!polygon.contains(on_vertex, false));
    }

    #[test]
    fn closing_edge_participates_in_the_test() {
        // the edge from the last supplied vertex back to the first
        let polygon = square();
        let on_closing_edge = Coordinate::new(5.0, 0.0);
        assert!(polygon.contains(on_closing_edge, true));
        assert!(!polygon.contains(on_closing_edge, false));
    }

    #[test]
    fn concave_notch_is_outside() {
        // L-shape: the notch region is inside the bounding box but outside
        // the polygon, so the winding test must overrule the fast path.
        let polygon = Polygon::new(coordinates(&[
            (0.0, 0.0),
            (0.0, 10.0),
            (4.0, 10.0),
            (4.0, 4.0),
            (10.0, 4.0),
            (10.0, 0.0),
        ]))
        .unwrap();

        assert!(polygon.bounding_box().contains(Coordinate::new(8.0, 8.0)));
        assert!(!polygon.contains(Coordinate::new(8.0, 8.0), true));

        assert!(polygon.contains(Coordinate::new(2.0, 8.0), true));
        assert!(polygon.contains(Coordinate::new(8.0, 2.0), true));
    }

    #[test]
    fn clockwise_rings_contain_too() {
        // winding direction must not matter, only the ±2π total
        let polygon = Polygon::new(coordinates(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
        ]))
        .unwrap();
        assert!(polygon.contains(Coordinate::new(5.0, 5.0), true));
        assert!(!polygon.contains(Coordinate::new(11.0, 5.0), true));
    }

    #[test]
    fn holes_exclude_their_interior() {
        let hole = Polygon::new(coordinates(&[
            (3.0, 3.0),
            (3.0, 7.0),
            (7.0, 7.0),
            (7.0, 3.0),
        ]))
        .unwrap();
        let donut = Polygon::with_interiors(
            coordinates(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]),
            vec![hole],
        )
        .unwrap();

        assert!(donut.contains(Coordinate::new(1.0, 1.0), true));
        assert!(!donut.contains(Coordinate::new(5.0, 5.0), true));

        // the hole's rim belongs to the shape when boundaries are included
        let on_rim = Coordinate::new(3.0, 5.0);
        assert!(donut.contains(on_rim, true));
        assert!(!donut.contains(on_rim, false));
    }

    #[test]
    fn on_segment_handles_vertical_edges() {
        let start = Coordinate::new(0.0, 10.0);
        let end = Coordinate::new(10.0, 10.0);
        assert!(point_on_segment(Coordinate::new(5.0, 10.0), start, end));
        assert!(!point_on_segment(Coordinate::new(5.0, 10.5), start, end));
        assert!(!point_on_segment(Coordinate::new(10.5, 10.0), start, end));
    }
}
