use fence_service::registry::FenceRegistry;
use geofence::fence::{self, Fence};
use geofence::geojson::{self, FeatureCollection};
use geofence::{Coordinate, Polygon};

#[tokio::main]
async fn main() {
    env_logger::init();

    // a warehouse yard with a restricted inner area
    let hole = Polygon::new(vec![
        Coordinate::new(54.31, 10.12),
        Coordinate::new(54.31, 10.14),
        Coordinate::new(54.33, 10.14),
        Coordinate::new(54.33, 10.12),
    ])
    .unwrap();
    let yard = Polygon::with_interiors(
        vec![
            Coordinate::new(54.30, 10.10),
            Coordinate::new(54.30, 10.16),
            Coordinate::new(54.34, 10.16),
            Coordinate::new(54.34, 10.10),
        ],
        vec![hole],
    )
    .unwrap();

    let annex = Polygon::new(vec![
        Coordinate::new(54.36, 10.20),
        Coordinate::new(54.36, 10.22),
        Coordinate::new(54.38, 10.22),
        Coordinate::new(54.38, 10.20),
    ])
    .unwrap();

    let fence = Fence::draft(vec![yard, annex]).unwrap();

    let probes = [
        Coordinate::new(54.305, 10.11),
        Coordinate::new(54.32, 10.13),
        Coordinate::new(54.37, 10.21),
        Coordinate::new(54.50, 10.50),
    ];
    for probe in probes {
        log::info!(
            "({}, {}) inside: {}",
            probe.latitude,
            probe.longitude,
            fence.contains(probe, true)
        );
    }

    let hits = fence::fences_containing(probes[1], std::slice::from_ref(&fence), true);
    println!("fences at probe 1: {}", hits.len());

    let registry = FenceRegistry::new();
    registry.insert(fence.clone()).await;
    println!(
        "registry hits at annex: {}",
        registry.containing(probes[2], true).await.len()
    );
    registry.reset().await;

    let envelope = FeatureCollection::single(geojson::encode(fence.boundaries()).unwrap());
    let json = serde_json::to_string_pretty(&envelope).unwrap();
    println!("upload envelope: {}", json);
}
