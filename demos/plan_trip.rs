//! Place a short playlist along Google's example polyline.
//!
//! Run with: cargo run --example plan_trip

use roadie_route::format::{format_duration, format_playback_time};
use roadie_route::{ClusterConfig, RouteLeg, TrackTiming, TripOverlay};

fn main() {
    env_logger::init();

    let leg = RouteLeg {
        encoded_polyline: "_p~iF~ps|U_ulLnnqC_mqNvxq`@".to_string(),
        duration_seconds: 2.0 * 3_600.0,
        distance_meters: None,
    };

    let tracks = vec![
        TrackTiming::new("Born to Run", 270_000),
        TrackTiming::new("Life is a Highway", 276_000),
        TrackTiming::new("Drive My Car", 150_000),
        TrackTiming::new("Radar Love", 383_000),
        TrackTiming::new("Roadrunner", 245_000),
        TrackTiming::new("Fast Car", 296_000),
        TrackTiming::new("Highway Star", 368_000),
        TrackTiming::new("On the Road Again", 153_000),
    ];

    let overlay = match TripOverlay::build(&leg, &tracks) {
        Ok(overlay) => overlay,
        Err(e) => {
            eprintln!("Could not build overlay: {e}");
            return;
        }
    };

    println!("Trip Overlay\n");
    println!(
        "Route: {} points, {:.0} km\n",
        overlay.path.len(),
        overlay.path_length_meters / 1000.0
    );

    println!("Tracks:");
    for pos in &overlay.positions {
        if let Some(point) = pos.position {
            println!(
                "  {:<20} {:>5}  plays at {:<8} ({:.4}, {:.4})",
                pos.track.track_id,
                format_duration(pos.track.duration_ms),
                format_playback_time(pos.cumulative_time_ms),
                point.latitude,
                point.longitude
            );
        }
    }

    if let Some(coverage) = &overlay.coverage {
        println!("\nCoverage: {}", coverage.summary());
        if let Some(end) = coverage.end_point {
            println!("Playlist ends at ({:.4}, {:.4})", end.latitude, end.longitude);
        }
    }

    let config = ClusterConfig::default();
    println!("\nMarkers per zoom level:");
    for zoom in [3, 6, 9, 12] {
        let clusters = overlay.clusters(zoom, &config);
        println!(
            "  zoom {:>2}: {} markers (opacity {:.1})",
            zoom,
            clusters.len(),
            config.marker_opacity(zoom)
        );
    }
}
