use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// One angle-of-arrival report as it comes off the wire, before a color has
/// been assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub name: String,
    /// Bearing in degrees clockwise from north, as seen from the origin.
    #[serde(alias = "AOA")]
    pub aoa: f64,
    /// Full cone width; the configured default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aperture_deg: Option<f64>,
}

impl SensorReading {
    pub fn new(name: impl Into<String>, aoa: f64) -> Self {
        Self {
            name: name.into(),
            aoa,
            aperture_deg: None,
        }
    }

    pub fn with_aperture(mut self, aperture_deg: f64) -> Self {
        self.aperture_deg = Some(aperture_deg);
        self
    }
}

/// A reading that has been given its color for the current batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sensor {
    pub name: String,
    pub color: String,
    pub aoa: f64,
    pub aperture_deg: Option<f64>,
}

/// Drones of the reference scene.
pub fn reference_readings() -> Vec<SensorReading> {
    vec![
        SensorReading::new("drone-1", 40.123456),
        SensorReading::new("drone-2", 60.123456),
        SensorReading::new("drone-3", 80.123456),
    ]
}

pub fn load_readings_from_json(path: &Path) -> anyhow::Result<Vec<SensorReading>> {
    let file = std::fs::File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let reader = std::io::BufReader::new(file);
    let readings: Vec<SensorReading> = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse sensor batch {:?}", path))?;
    Ok(readings)
}

/// Expects a header row: `name,aoa[,aperture_deg]`.
pub fn load_readings_from_csv(path: &Path) -> anyhow::Result<Vec<SensorReading>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open {:?}", path))?;
    read_csv(&mut reader).with_context(|| format!("Failed to parse sensor batch {:?}", path))
}

fn read_csv<R: std::io::Read>(reader: &mut csv::Reader<R>) -> anyhow::Result<Vec<SensorReading>> {
    let mut readings = Vec::new();
    for record in reader.deserialize() {
        let reading: SensorReading = record?;
        readings.push(reading);
    }
    Ok(readings)
}

/// Picks the loader from the file extension.
pub fn load_readings(path: &Path) -> anyhow::Result<Vec<SensorReading>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("json") => load_readings_from_json(path),
        Some("csv") => load_readings_from_csv(path),
        _ => bail!("Unsupported sensor file extension: {:?}", path),
    }
}

/// Fingerprint of a batch, logged alongside renders. Only stable within one
/// build: `DefaultHasher` output may change between Rust releases. `to_bits`
/// is exact for identical floats.
pub fn batch_fingerprint(origin: GeoPoint, readings: &[SensorReading]) -> u64 {
    let mut hasher = DefaultHasher::new();
    origin.longitude.to_bits().hash(&mut hasher);
    origin.latitude.to_bits().hash(&mut hasher);
    for reading in readings {
        reading.name.hash(&mut hasher);
        reading.aoa.to_bits().hash(&mut hasher);
        reading.aperture_deg.map(f64::to_bits).hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_with_optional_aperture() {
        let data = "name,aoa,aperture_deg\ndrone-1,40.5,\ndrone-2, 60.0 ,20\n";
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data.as_bytes());
        let readings = read_csv(&mut reader).unwrap();

        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0], SensorReading::new("drone-1", 40.5));
        assert_eq!(readings[1], SensorReading::new("drone-2", 60.0).with_aperture(20.0));
    }

    #[test]
    fn json_accepts_reference_field_name() {
        let readings: Vec<SensorReading> =
            serde_json::from_str(r#"[{"name": "drone-1", "AOA": 40.123456}]"#).unwrap();
        assert_eq!(readings[0].aoa, 40.123456);
        assert_eq!(readings[0].aperture_deg, None);
    }

    #[test]
    fn fingerprint_tracks_order_and_values() {
        let origin = GeoPoint::new(-86.0, 36.0);
        let batch = reference_readings();
        let mut reversed = batch.clone();
        reversed.reverse();

        assert_eq!(batch_fingerprint(origin, &batch), batch_fingerprint(origin, &batch));
        assert_ne!(batch_fingerprint(origin, &batch), batch_fingerprint(origin, &reversed));
        assert_ne!(
            batch_fingerprint(origin, &batch),
            batch_fingerprint(GeoPoint::new(-86.0, 36.5), &batch)
        );
    }
}
