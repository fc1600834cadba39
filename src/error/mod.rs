use thiserror::Error;

/// Failures surfaced by the sector engine. Every variant aborts the whole
/// batch; callers are expected to skip rendering rather than crash.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SectorError {
    #[error("invalid geometry input: {what} = {value}")]
    InvalidGeometryInput { what: &'static str, value: f64 },

    #[error("palette exhausted: {requested} sensors but only {available} colors")]
    PaletteExhausted { requested: usize, available: usize },

    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    #[error("duplicate sensor name in batch: {0}")]
    DuplicateSensor(String),

    #[error("sensor name must not be empty")]
    EmptySensorName,
}

impl SectorError {
    pub(crate) fn invalid(what: &'static str, value: f64) -> Self {
        SectorError::InvalidGeometryInput { what, value }
    }
}
