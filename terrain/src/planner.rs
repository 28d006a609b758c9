//! Choosing where along a path to sample.

use crate::{math::pixel_ground_size, TerrainError};
use std::iter;

/// Lower bound on the distance between consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MinSpacing {
    /// One pixel's ground footprint at the path's starting latitude,
    /// rounded up to the next 0.1 m.
    #[default]
    Auto,

    /// Always take the requested number of samples.
    None,

    /// Caller-supplied spacing in meters.
    Explicit(f64),
}

impl MinSpacing {
    /// Returns the effective minimum spacing in meters, if any.
    pub fn resolve(self, start_lat: f64, zoom: u8) -> Result<Option<f64>, TerrainError> {
        match self {
            Self::Auto => Ok(Some(
                (pixel_ground_size(start_lat, zoom) * 10.0).ceil() / 10.0,
            )),
            Self::None => Ok(None),
            Self::Explicit(meters) if meters > 0.0 && meters.is_finite() => Ok(Some(meters)),
            Self::Explicit(meters) => Err(TerrainError::InvalidSpacing(meters)),
        }
    }
}

/// Returns up to `samples` distances, in meters, from the start of a
/// path `length_m` long.
///
/// Distances are evenly spaced unless that would place them closer
/// than `min_spacing_m`, in which case fewer are returned. The last
/// distance is always exactly `length_m`.
#[allow(clippy::cast_precision_loss)]
pub fn plan(length_m: f64, samples: usize, min_spacing_m: Option<f64>) -> Vec<f64> {
    let intervals = samples.saturating_sub(1).max(1);
    let even_step = length_m / intervals as f64;
    let step = match min_spacing_m {
        Some(min) if even_step < min => min,
        _ => even_step,
    };

    (0..intervals)
        .map(|i| i as f64 * step)
        .take_while(|&distance| distance < length_m)
        .chain(iter::once(length_m))
        .collect()
}
