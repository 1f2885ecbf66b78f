//! Delivery Planning Example
//!
//! Loads a handful of São Paulo drop-off points, searches around a depot and
//! groups every stop into capacity-bounded trips.

use geotrip::{DistanceMetric, ItemService, NearbyQuery, NewItem};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== Delivery Planning with geotrip ===\n");

    let service = ItemService::builder()
        .default_capacity(3)
        .seed_items(vec![
            NewItem::new("MASP", -23.5615, -46.6559).with_description("Av. Paulista, 1578"),
            NewItem::new("Trianon", -23.5621, -46.6572),
            NewItem::new("Ibirapuera", -23.5874, -46.6576),
            NewItem::new("Sé", -23.5503, -46.6339),
            NewItem::new("Liberdade", -23.5558, -46.6353),
            NewItem::new("Pinheiros", -23.5670, -46.7020),
            NewItem::new("Vila Madalena", -23.5534, -46.6911),
        ])
        .build()?;

    // === Nearby search ===
    let depot = NearbyQuery::new(-23.5610, -46.6560, 2_500.0);
    println!("1. Stops within 2.5 km of the depot");
    for item in service.nearby_search(&depot)? {
        println!(
            "   {:<14} {:>8.1} m",
            item.name,
            item.distance_meters.unwrap_or_default()
        );
    }

    // === Trip optimization ===
    println!("\n2. Trips with the default capacity");
    let plan = service.optimize_trips(None)?;
    println!(
        "   {} items, capacity {}, {} trips",
        plan.total_items, plan.capacity, plan.trip_count
    );
    for (i, trip) in plan.trips.iter().enumerate() {
        let names: Vec<&str> = trip.iter().map(|stop| stop.name.as_str()).collect();
        println!("   trip {}: {}", i + 1, names.join(" -> "));
    }

    // === Path lengths per metric ===
    println!("\n3. Total driven distance of the capacity-2 plan");
    let snapshot = service.index().snapshot();
    for metric in [DistanceMetric::Haversine, DistanceMetric::Geodesic] {
        let trips = geotrip::TripClusterer::with_metric(metric).build_trips(&snapshot, 2)?;
        let total: f64 = trips.iter().map(|trip| trip.path_length(metric)).sum();
        println!("   {:?}: {:.0} m over {} trips", metric, total, trips.len());
    }

    #[cfg(feature = "geojson")]
    {
        println!("\n4. GeoJSON export");
        let geojson = service.optimize_trips_geojson(Some(3))?;
        println!("   {} bytes of FeatureCollection", geojson.len());
    }

    Ok(())
}
