use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use utility::id::{HasId, Id};

use crate::bounding_box::BoundingBox;
use crate::coordinate::Coordinate;
use crate::polygon::Polygon;
use crate::{GeofenceError, GeofenceResult};

/// Placeholder id for fences defined locally and not yet uploaded. The
/// service assigns the authoritative id on upload.
pub const DRAFT_FENCE_ID: i64 = 0;

/// A named geofence: one or more boundary polygons under a single id.
///
/// A fence with several boundaries covers the union of their areas, which is
/// how disjoint regions end up under one logical fence. Identity is the id
/// alone; boundary content never takes part in equality or hashing.
#[derive(Debug, Clone)]
pub struct Fence {
    pub id: Id<Fence>,
    boundaries: Vec<Polygon>,
    pub meta: IndexMap<String, String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl HasId for Fence {
    type IdType = i64;
}

impl Fence {
    pub fn new(id: Id<Fence>, boundaries: Vec<Polygon>) -> GeofenceResult<Self> {
        if boundaries.is_empty() {
            return Err(GeofenceError::InvalidGeometry);
        }
        Ok(Self {
            id,
            boundaries,
            meta: IndexMap::new(),
            created_at: None,
            updated_at: None,
        })
    }

    pub fn draft(boundaries: Vec<Polygon>) -> GeofenceResult<Self> {
        Self::new(Id::new(DRAFT_FENCE_ID), boundaries)
    }

    pub fn with_meta(mut self, meta: IndexMap<String, String>) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_timestamps(
        mut self,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    pub fn boundaries(&self) -> &[Polygon] {
        &self.boundaries
    }

    /// True if any boundary polygon contains the point; short-circuits on
    /// the first match.
    pub fn contains(&self, point: Coordinate, include_boundaries: bool) -> bool {
        self.boundaries
            .iter()
            .any(|polygon| polygon.contains(point, include_boundaries))
    }

    pub fn bounding_box(&self) -> GeofenceResult<BoundingBox> {
        BoundingBox::from_polygons(&self.boundaries)
    }
}

impl PartialEq for Fence {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Fence {}

impl Hash for Fence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// The subset of `fences` containing the point, preserving input order.
pub fn fences_containing<'a>(
    point: Coordinate,
    fences: &'a [Fence],
    include_boundaries: bool,
) -> Vec<&'a Fence> {
    fences
        .iter()
        .filter(|fence| fence.contains(point, include_boundaries))
        .collect()
}
