//! Angle-of-arrival sector projection.
//!
//! Turns bearing reports from directional sensors into the fan-shaped
//! polygons a map renderer draws around an observation point, using
//! spherical-earth trigonometry.

pub mod config;
pub mod error;
pub mod geo;
pub mod geojson;
pub mod io;
pub mod palette;
pub mod sector;

pub use config::SectorConfig;
pub use error::SectorError;
pub use geo::{Bearing, GeoPoint};
pub use sector::{SectorBuilder, SectorPolygon, SectorRing};
