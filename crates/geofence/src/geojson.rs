use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coordinate::Coordinate;
use crate::polygon::Polygon;
use crate::{GeofenceError, GeofenceResult};

type Position = Vec<f64>;
type Ring = Vec<Position>;
type PolygonRings = Vec<Ring>;

/// GeoJSON geometry as it appears on the wire.
///
/// Positions are raw number arrays in **[longitude, latitude]** order, the
/// reverse of the (latitude, longitude) order used everywhere else in this
/// crate. Arity is validated while decoding, not by serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Polygon(PolygonRings),
    MultiPolygon(Vec<PolygonRings>),
}

/// Decodes a wire geometry into polygons: one for `Polygon`, one per member
/// for `MultiPolygon`. Ring 0 of each member is the outer boundary, the rest
/// become interior polygons.
pub fn decode(geometry: &Geometry) -> GeofenceResult<Vec<Polygon>> {
    match geometry {
        Geometry::Polygon(rings) => Ok(vec![decode_polygon(rings)?]),
        Geometry::MultiPolygon(members) => members.iter().map(|rings| decode_polygon(rings)).collect(),
    }
}

/// Encodes polygons as `Polygon` for a single shape and `MultiPolygon` for
/// several. Holes stay nested under their owning polygon's rings.
pub fn encode(polygons: &[Polygon]) -> GeofenceResult<Geometry> {
    match polygons {
        [] => Err(GeofenceError::InsufficientPolygons),
        [single] => Ok(Geometry::Polygon(encode_polygon(single))),
        many => Ok(Geometry::MultiPolygon(many.iter().map(encode_polygon).collect())),
    }
}

fn decode_polygon(rings: &PolygonRings) -> GeofenceResult<Polygon> {
    if rings.is_empty() {
        return Err(GeofenceError::InsufficientPolygons);
    }
    let rings = rings
        .iter()
        .map(|ring| decode_ring(ring))
        .collect::<GeofenceResult<Vec<_>>>()?;
    Polygon::from_rings(rings)
}

fn decode_ring(ring: &Ring) -> GeofenceResult<Vec<Coordinate>> {
    ring.iter().map(|position| decode_position(position)).collect()
}

fn decode_position(position: &Position) -> GeofenceResult<Coordinate> {
    match position.as_slice() {
        [longitude, latitude] => Ok(Coordinate::new(*latitude, *longitude)),
        other => Err(GeofenceError::CoordinateFormat { found: other.len() }),
    }
}

fn encode_polygon(polygon: &Polygon) -> PolygonRings {
    let mut rings = vec![encode_ring(polygon.exterior())];
    rings.extend(polygon.interiors().iter().map(|hole| encode_ring(hole.exterior())));
    rings
}

fn encode_ring(ring: &[Coordinate]) -> Ring {
    ring.iter()
        .map(|coordinate| vec![coordinate.longitude, coordinate.latitude])
        .collect()
}

/// A single GeoJSON feature wrapping a geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub geometry: Geometry,
    pub properties: Value,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            feature_type: "Feature".to_owned(),
            geometry,
            properties: Value::Null,
        }
    }
}

/// The upload envelope the geofence service expects: a feature collection
/// with exactly one feature carrying the fence geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub collection_type: String,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn single(geometry: Geometry) -> Self {
        Self {
            collection_type: "FeatureCollection".to_owned(),
            features: vec![Feature::new(geometry)],
        }
    }
}
