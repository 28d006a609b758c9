use crate::{
    constants::{MAX_ZOOM, ZOOM},
    cover::{LineCover, TileCover},
    geodesy::{Haversine, PathMeasure},
    index::{CoverageIndex, SamplePoint, TileDescriptor},
    planner::{plan, MinSpacing},
    TerrainError,
};
use futures::stream::{FuturesUnordered, TryStreamExt};
use geo::geometry::{LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use itertools::Itertools;
use log::{debug, warn};
use rgbtile::{Credentials, PixelGrid, RgbTileError, TileFetcher, TILE_SIZE};

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Distance of each sample from the start of the path, in meters.
    pub distances_m: Vec<f64>,

    /// Location of each sample along the path.
    pub points: Vec<Point>,

    /// Terrain elevation at each sample, in meters.
    pub elevation_m: Vec<f64>,
}

impl Profile {
    pub fn builder() -> ProfileBuilder {
        ProfileBuilder {
            path: None,
            samples: None,
            min_spacing: MinSpacing::default(),
            zoom: ZOOM,
        }
    }

    /// Number of samples in this profile.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns one GeoJSON point feature per sample, carrying
    /// `distanceAlongLine` and `elevation` properties.
    pub fn to_feature_collection(&self) -> FeatureCollection {
        let features = self
            .points
            .iter()
            .zip(&self.distances_m)
            .zip(&self.elevation_m)
            .map(|((point, distance_m), elevation_m)| {
                let mut properties = JsonObject::new();
                properties.insert("distanceAlongLine".into(), (*distance_m).into());
                properties.insert("elevation".into(), (*elevation_m).into());
                Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(Value::Point(vec![point.x(), point.y()]))),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();
        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

impl From<Profile> for FeatureCollection {
    fn from(profile: Profile) -> Self {
        profile.to_feature_collection()
    }
}

pub struct ProfileBuilder {
    /// Path to profile (required).
    path: Option<LineString>,

    /// Maximum number of samples (required).
    samples: Option<usize>,

    /// Lower bound on sample spacing (defaults to `Auto`).
    min_spacing: MinSpacing,

    /// Tile zoom level (defaults to 15).
    zoom: u8,
}

impl ProfileBuilder {
    /// Path to profile (required).
    #[must_use]
    pub fn path(mut self, path: LineString) -> Self {
        self.path = Some(path);
        self
    }

    /// Maximum number of samples, including both ends (required).
    #[must_use]
    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Lower bound on sample spacing (defaults to `Auto`).
    #[must_use]
    pub fn min_spacing(mut self, min_spacing: MinSpacing) -> Self {
        self.min_spacing = min_spacing;
        self
    }

    /// Tile zoom level (defaults to 15).
    #[must_use]
    pub fn zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    /// Builds a profile with great-circle geodesy and [LineCover]
    /// tile coverage.
    pub async fn build<F>(
        &self,
        fetcher: &F,
        credentials: &Credentials,
    ) -> Result<Profile, TerrainError>
    where
        F: TileFetcher,
    {
        self.build_with(&Haversine, &LineCover, fetcher, credentials)
            .await
    }

    /// Builds a profile using the given collaborators.
    ///
    /// All tiles are fetched concurrently. The first fetch to fail
    /// aborts the build and drops the rest.
    pub async fn build_with<M, T, F>(
        &self,
        measure: &M,
        cover: &T,
        fetcher: &F,
        credentials: &Credentials,
    ) -> Result<Profile, TerrainError>
    where
        M: PathMeasure,
        T: TileCover,
        F: TileFetcher,
    {
        let path = self.path.as_ref().ok_or(TerrainError::Builder("path"))?;
        let samples = self.samples.ok_or(TerrainError::Builder("samples"))?;
        let zoom = self.zoom;
        if zoom > MAX_ZOOM {
            return Err(TerrainError::InvalidZoom(zoom));
        }

        let start = match path.0.as_slice() {
            [start, _, ..] => *start,
            coords => return Err(TerrainError::TooFewCoords(coords.len())),
        };
        if samples < 2 {
            return Err(TerrainError::TooFewSamples(samples));
        }

        let length_m = measure.length_m(path);
        if !(length_m > 0.0) {
            return Err(TerrainError::ZeroLength);
        }

        let (mut points, plan_runtime) = {
            let now = std::time::Instant::now();
            let min_spacing_m = self.min_spacing.resolve(start.y, zoom)?;
            let points: Vec<SamplePoint> = plan(length_m, samples, min_spacing_m)
                .into_iter()
                .map(|distance_m| {
                    SamplePoint::new(measure.point_at(path, distance_m), distance_m, zoom)
                })
                .collect();
            (points, now.elapsed())
        };

        let required: Vec<_> = cover.tiles(path, zoom).into_iter().unique().collect();

        let (tiles, fetch_runtime) = {
            let now = std::time::Instant::now();
            let mut tiles: Vec<TileDescriptor> =
                required.iter().copied().map(TileDescriptor::new).collect();
            let mut pending = required
                .iter()
                .copied()
                .enumerate()
                .map(|(slot, index)| async move {
                    let grid = fetcher
                        .fetch(index, credentials)
                        .await
                        .and_then(check_dimensions)
                        .map_err(|source| {
                            warn!("tile {index}: {source}");
                            TerrainError::Fetch { index, source }
                        })?;
                    Ok::<_, TerrainError>((slot, grid))
                })
                .collect::<FuturesUnordered<_>>();
            // Returning early drops `pending`, cancelling fetches still in
            // flight.
            while let Some((slot, grid)) = pending.try_next().await? {
                tiles[slot].set_grid(grid);
            }
            (CoverageIndex::new(tiles), now.elapsed())
        };

        let mut profile = Profile {
            distances_m: Vec::with_capacity(points.len()),
            points: Vec::with_capacity(points.len()),
            elevation_m: Vec::with_capacity(points.len()),
        };
        let decode_runtime = {
            let now = std::time::Instant::now();
            for point in &mut points {
                let elevation_m = tiles.elevation(point)?;
                point.elevation_m = Some(elevation_m);
                profile.distances_m.push(point.distance_m);
                profile.points.push(Point::from(point.coord));
                profile.elevation_m.push(elevation_m);
            }
            now.elapsed()
        };

        debug!(
            "profile; len: {}, tiles: {}, plan_exec: {:?}, fetch_exec: {:?}, decode_exec: {:?}",
            points.len(),
            tiles.tiles().len(),
            plan_runtime,
            fetch_runtime,
            decode_runtime
        );

        Ok(profile)
    }
}

/// Rejects grids that don't cover a full tile.
fn check_dimensions(grid: PixelGrid) -> Result<PixelGrid, RgbTileError> {
    if (grid.width(), grid.height()) == (TILE_SIZE, TILE_SIZE) {
        Ok(grid)
    } else {
        Err(RgbTileError::Dimensions {
            width: grid.width(),
            height: grid.height(),
        })
    }
}
