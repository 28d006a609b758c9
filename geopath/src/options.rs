use anyhow::{anyhow, Error as AnyError};
use clap::{value_parser, Parser, Subcommand};
use std::str::FromStr;
use terrain::{geo::geometry::Coord, MinSpacing, MAPBOX_TERRAIN_RGB, MAX_ZOOM, ZOOM};

/// Generate elevation profiles from RGB terrain tiles.
#[derive(Parser, Debug, Clone)]
pub struct Cli {
    /// Path vertex "lat,lon"; repeat for each vertex, in order.
    #[arg(short, long = "point", required = true, num_args = 1)]
    pub points: Vec<LatLon>,

    /// Maximum number of samples along the path, including both ends.
    #[arg(short, long, default_value_t = 100)]
    pub samples: usize,

    /// Minimum spacing between samples: "auto", "none", or meters.
    #[arg(short, long, default_value = "auto")]
    pub min_spacing: Spacing,

    /// Tile zoom level.
    #[arg(
        short,
        long,
        default_value_t = ZOOM,
        value_parser = value_parser!(u8).range(..=i64::from(MAX_ZOOM)),
    )]
    pub zoom: u8,

    /// Tile provider access token.
    #[arg(long, env = "MAPBOX_ACCESS_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Tile URL with {z}, {x}, {y}, and {token} placeholders.
    #[arg(long, default_value = MAPBOX_TERRAIN_RGB)]
    pub url_template: String,

    /// Per-tile request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Clone, Debug, Copy)]
pub struct LatLon(pub Coord<f64>);

impl FromStr for LatLon {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let (lat_str, lon_str) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("not a valid lat,lon pair"))?;
        let lat = f64::from_str(lat_str.trim())?;
        let lon = f64::from_str(lon_str.trim())?;
        Ok(Self(Coord { y: lat, x: lon }))
    }
}

#[derive(Clone, Debug, Copy)]
pub struct Spacing(pub MinSpacing);

impl FromStr for Spacing {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        match s {
            "auto" => Ok(Self(MinSpacing::Auto)),
            "none" => Ok(Self(MinSpacing::None)),
            meters => Ok(Self(MinSpacing::Explicit(f64::from_str(meters)?))),
        }
    }
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print a GeoJSON FeatureCollection to stdout.
    Json,

    /// Print distance, location, and elevation as CSV to stdout.
    Csv,

    /// Plot to terminal.
    Plot,
}
