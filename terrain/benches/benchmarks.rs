use criterion::{criterion_group, criterion_main, Criterion};
use futures::executor::block_on;
use terrain::{
    geo::{line_string, LineString},
    Credentials, LineCover, MinSpacing, PixelGrid, Profile, RgbTileError, TileCover, TileFetcher,
    TileIndex, ZOOM,
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Serves sea-level tiles from memory.
struct SeaLevel;

impl TileFetcher for SeaLevel {
    async fn fetch(
        &self,
        _index: TileIndex,
        _credentials: &Credentials,
    ) -> Result<PixelGrid, RgbTileError> {
        Ok(PixelGrid::uniform(256, 256, [1, 134, 160]))
    }
}

fn mt_washington() -> LineString {
    line_string![
        (x: -71.308_307_164_413_69, y: 44.283_098_066_031_65),
        (x: -71.297_207_328_376_8, y: 44.256_280_984_242_78),
    ]
}

fn tile_cover(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tile Cover");
    let short = mt_washington();
    let long = line_string![(x: -72.0, y: 44.0), (x: -70.0, y: 45.0)];

    group.bench_with_input("short", &short, |b, path| {
        b.iter(|| LineCover.tiles(path, ZOOM))
    });
    group.bench_with_input("long", &long, |b, path| {
        b.iter(|| LineCover.tiles(path, ZOOM))
    });
}

fn terrain_profile(c: &mut Criterion) {
    let mut group = c.benchmark_group("Terrain Profile");
    let credentials = Credentials::default();

    for samples in [100, 1000] {
        group.bench_with_input(
            format!("short/{samples}"),
            &(mt_washington(), samples),
            |b, (path, samples)| {
                b.iter(|| {
                    block_on(
                        Profile::builder()
                            .path(path.clone())
                            .samples(*samples)
                            .min_spacing(MinSpacing::None)
                            .build(&SeaLevel, &credentials),
                    )
                    .unwrap()
                })
            },
        );
    }
}

criterion_group!(benches, tile_cover, terrain_profile);
criterion_main!(benches);
