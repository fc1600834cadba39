use serde_json::{Value, json};
use tracing::warn;

use crate::config::SectorConfig;
use crate::geo::GeoPoint;
use crate::io::SensorReading;
use crate::sector::circle::circle_ring;
use crate::sector::{SectorBuilder, SectorPolygon};

fn position(p: GeoPoint) -> Value {
    json!([p.longitude, p.latitude])
}

fn polygon(ring: impl IntoIterator<Item = GeoPoint>) -> Value {
    let ring: Vec<Value> = ring.into_iter().map(position).collect();
    json!({ "type": "Polygon", "coordinates": [ring] })
}

/// `Polygon` feature carrying `id` and `fillColor` for a fill layer.
pub fn sector_feature(sector: &SectorPolygon, opacity: f64) -> Value {
    json!({
        "type": "Feature",
        "geometry": polygon(sector.ring.points),
        "properties": {
            "id": sector.id,
            "fillColor": sector.color,
            "fillOpacity": opacity,
            "aoa": sector.aoa,
        },
    })
}

/// Antenna position at the observation point.
pub fn marker_feature(origin: GeoPoint) -> Value {
    json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": position(origin) },
        "properties": { "id": "antenna", "kind": "marker" },
    })
}

/// Filled area such as the gimbal coverage circle.
pub fn area_feature(id: &str, ring: &[GeoPoint], color: &str, opacity: f64) -> Value {
    json!({
        "type": "Feature",
        "geometry": polygon(ring.iter().copied()),
        "properties": {
            "id": id,
            "fillColor": color,
            "fillOpacity": opacity,
        },
    })
}

pub fn feature_collection(features: Vec<Value>) -> Value {
    json!({ "type": "FeatureCollection", "features": features })
}

/// Area drawn under the sectors.
#[derive(Debug, Clone)]
pub struct Gimbal<'a> {
    pub ring: &'a [GeoPoint],
    pub color: &'a str,
    pub opacity: f64,
}

/// Full scene in draw order: gimbal area, marker, then one feature per sector.
pub fn scene_collection(
    origin: GeoPoint,
    gimbal: Option<Gimbal<'_>>,
    sectors: &[SectorPolygon],
    sector_opacity: f64,
) -> Value {
    let mut features = Vec::with_capacity(sectors.len() + 2);
    if let Some(gimbal) = gimbal {
        features.push(area_feature("gimbal_area", gimbal.ring, gimbal.color, gimbal.opacity));
    }
    features.push(marker_feature(origin));
    features.extend(sectors.iter().map(|s| sector_feature(s, sector_opacity)));
    feature_collection(features)
}

/// A rendered FeatureCollection and how many sectors made it in.
#[derive(Debug, Clone)]
pub struct Scene {
    pub collection: Value,
    pub sector_count: usize,
}

/// Builds the whole scene for one batch. A batch the engine rejects is
/// dropped with a warning; the marker and gimbal area are still produced.
pub fn render_scene(config: &SectorConfig, readings: &[SensorReading], with_gimbal: bool) -> Scene {
    let builder = SectorBuilder::new(config.clone());
    let sectors = match builder.build_batch(readings, &config.palette) {
        Ok(sectors) => sectors,
        Err(e) => {
            warn!("Skipping sector batch: {}", e);
            Vec::new()
        }
    };

    let gimbal_ring = if with_gimbal {
        circle_ring(
            config.origin,
            config.gimbal_radius_m,
            config.gimbal_steps,
            config.earth_radius_m,
        )
        .map_err(|e| warn!("Skipping gimbal area: {}", e))
        .ok()
    } else {
        None
    };
    let gimbal = gimbal_ring.as_deref().map(|ring| Gimbal {
        ring,
        color: &config.gimbal_color,
        opacity: config.gimbal_opacity,
    });

    Scene {
        collection: scene_collection(config.origin, gimbal, &sectors, config.sector_opacity),
        sector_count: sectors.len(),
    }
}
