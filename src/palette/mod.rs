use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::SectorError;
use crate::io::{Sensor, SensorReading};

/// Ordered set of color tokens. A palette is never consumed itself; each batch
/// draws from its own [`PaletteCursor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    pub fn new<I, S>(colors: I) -> Result<Self, SectorError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        if colors.iter().any(|c| c.trim().is_empty()) {
            return Err(SectorError::InvalidPalette("empty color token".to_string()));
        }
        if let Some(dup) = colors.iter().duplicates().next() {
            return Err(SectorError::InvalidPalette(format!("duplicate color {dup:?}")));
        }
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Fresh cursor positioned at the first color.
    pub fn cursor(&self) -> PaletteCursor {
        PaletteCursor {
            colors: self.colors.clone(),
            next: 0,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![
                "blueviolet".to_string(),
                "orangered".to_string(),
                "yellowgreen".to_string(),
            ],
        }
    }
}

impl TryFrom<Vec<String>> for Palette {
    type Error = SectorError;

    fn try_from(colors: Vec<String>) -> Result<Self, Self::Error> {
        Palette::new(colors)
    }
}

impl From<Palette> for Vec<String> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

/// Batch-scoped position in a palette. Owns its copy of the colors so two
/// batches never share assignment state.
#[derive(Debug, Clone)]
pub struct PaletteCursor {
    colors: Vec<String>,
    next: usize,
}

impl PaletteCursor {
    pub fn remaining(&self) -> usize {
        self.colors.len() - self.next
    }

    /// Consumes the next color, `None` once the palette is spent.
    pub fn next_color(&mut self) -> Option<String> {
        let color = self.colors.get(self.next)?.clone();
        self.next += 1;
        Some(color)
    }
}

/// Gives each reading a distinct color in sequence order.
///
/// Capacity and names are checked before anything is assigned, so a failed
/// batch yields no sensors at all.
pub fn assign_colors(
    palette: &Palette,
    readings: &[SensorReading],
) -> Result<Vec<Sensor>, SectorError> {
    if readings.iter().any(|r| r.name.is_empty()) {
        return Err(SectorError::EmptySensorName);
    }
    if let Some(dup) = readings.iter().map(|r| &r.name).duplicates().next() {
        return Err(SectorError::DuplicateSensor(dup.clone()));
    }

    let mut cursor = palette.cursor();
    if readings.len() > cursor.remaining() {
        return Err(SectorError::PaletteExhausted {
            requested: readings.len(),
            available: cursor.remaining(),
        });
    }

    let sensors = readings
        .iter()
        .zip(std::iter::from_fn(|| cursor.next_color()))
        .map(|(reading, color)| Sensor {
            name: reading.name.clone(),
            color,
            aoa: reading.aoa,
            aperture_deg: reading.aperture_deg,
        })
        .collect();
    Ok(sensors)
}
