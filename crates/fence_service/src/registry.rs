use std::collections::HashSet;

use geofence::coordinate::Coordinate;
use geofence::fence::Fence;
use tokio::sync::RwLock;
use utility::id::Id;

/// Cache of the fences currently known from the service.
///
/// Owned explicitly by whoever drives the client; call [`reset`] when the
/// credentials change instead of relying on implicit global invalidation.
/// Fences dedupe by id, so re-inserting a fetched fence replaces the cached
/// version.
///
/// [`reset`]: FenceRegistry::reset
#[derive(Debug, Default)]
pub struct FenceRegistry {
    fences: RwLock<HashSet<Fence>>,
}

impl FenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, fence: Fence) {
        self.fences.write().await.replace(fence);
    }

    pub async fn insert_all(&self, fences: Vec<Fence>) {
        let mut known = self.fences.write().await;
        for fence in fences {
            known.replace(fence);
        }
    }

    pub async fn remove(&self, id: &Id<Fence>) {
        self.fences.write().await.retain(|fence| fence.id != *id);
    }

    pub async fn get(&self, id: &Id<Fence>) -> Option<Fence> {
        self.fences
            .read()
            .await
            .iter()
            .find(|fence| fence.id == *id)
            .cloned()
    }

    pub async fn all(&self) -> Vec<Fence> {
        self.fences.read().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.fences.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.fences.read().await.is_empty()
    }

    /// The cached fences containing the point. No ordering guarantee.
    pub async fn containing(&self, point: Coordinate, include_boundaries: bool) -> Vec<Fence> {
        self.fences
            .read()
            .await
            .iter()
            .filter(|fence| fence.contains(point, include_boundaries))
            .cloned()
            .collect()
    }

    /// Drops every cached fence. Invoke on credential change; fences fetched
    /// under the old credentials are no longer meaningful.
    pub async fn reset(&self) {
        log::info!("resetting fence registry");
        self.fences.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fence(id: i64, origin_latitude: f64, origin_longitude: f64) -> Fence {
        let polygon = geofence::Polygon::new(vec![
            Coordinate::new(origin_latitude, origin_longitude),
            Coordinate::new(origin_latitude, origin_longitude + 10.0),
            Coordinate::new(origin_latitude + 10.0, origin_longitude + 10.0),
            Coordinate::new(origin_latitude + 10.0, origin_longitude),
        ])
        .unwrap();
        Fence::new(Id::new(id), vec![polygon]).unwrap()
    }

    #[tokio::test]
    async fn insert_replaces_by_id() {
        let registry = FenceRegistry::new();
        registry.insert(fence(1, 0.0, 0.0)).await;
        registry.insert(fence(1, 50.0, 50.0)).await;
        assert_eq!(registry.len().await, 1);

        // the replacement's boundaries win
        let cached = registry.get(&Id::new(1)).await.unwrap();
        assert!(cached.contains(Coordinate::new(55.0, 55.0), true));
        assert!(!cached.contains(Coordinate::new(5.0, 5.0), true));
    }

    #[tokio::test]
    async fn containing_filters_by_point() {
        let registry = FenceRegistry::new();
        registry
            .insert_all(vec![fence(1, 0.0, 0.0), fence(2, 0.0, 20.0)])
            .await;

        let hits = registry.containing(Coordinate::new(5.0, 25.0), true).await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.raw(), 2);
    }

    #[tokio::test]
    async fn remove_and_reset() {
        let registry = FenceRegistry::new();
        registry
            .insert_all(vec![fence(1, 0.0, 0.0), fence(2, 0.0, 20.0)])
            .await;

        registry.remove(&Id::new(1)).await;
        assert_eq!(registry.len().await, 1);
        assert!(registry.get(&Id::new(1)).await.is_none());

        registry.reset().await;
        assert!(registry.is_empty().await);
    }
}
