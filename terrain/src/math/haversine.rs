//! Great-circle interpolation, adapted from the [geo] crate's
//! `HaversineIntermediate` so the per-segment trigonometry is computed
//! once and reused for every point sampled on that segment.
//!
//! [geo](https://github.com/georust/geo/blob/eb0cd98f3ccfa226631af23d94d66d214ea66488/geo/src/algorithm/haversine_intermediate.rs)

use crate::constants::MEAN_EARTH_RADIUS;
use geo::geometry::Point;

#[allow(clippy::many_single_char_names)]
pub struct GreatCircle {
    start: Point,
    d: f64,
    n: f64,
    o: f64,
    p: f64,
    q: f64,
    r: f64,
    s: f64,
}

impl GreatCircle {
    #[allow(clippy::many_single_char_names)]
    pub fn new(start: Point, end: Point) -> Self {
        let lat1 = start.y().to_radians();
        let lon1 = start.x().to_radians();
        let lat2 = end.y().to_radians();
        let lon2 = end.x().to_radians();

        let (lat1_sin, lat1_cos) = lat1.sin_cos();
        let (lat2_sin, lat2_cos) = lat2.sin_cos();
        let (lon1_sin, lon1_cos) = lon1.sin_cos();
        let (lon2_sin, lon2_cos) = lon2.sin_cos();

        let m = lat1_cos * lat2_cos;

        let n = lat1_cos * lon1_cos;
        let o = lat2_cos * lon2_cos;
        let p = lat1_cos * lon1_sin;
        let q = lat2_cos * lon2_sin;

        let k =
            (((lat1 - lat2) / 2.0).sin().powi(2) + m * ((lon1 - lon2) / 2.0).sin().powi(2)).sqrt();

        let d = 2.0 * k.asin();

        Self {
            start,
            d,
            n,
            o,
            p,
            q,
            r: lat1_sin,
            s: lat2_sin,
        }
    }

    /// Great-circle length in meters.
    pub fn length_m(&self) -> f64 {
        self.d * MEAN_EARTH_RADIUS
    }

    /// Returns the point a `fraction` (0..=1) of the way to the end.
    pub fn point_at(&self, fraction: f64) -> Point {
        if self.d == 0.0 {
            return self.start;
        }

        let a = ((1.0 - fraction) * self.d).sin() / self.d.sin();
        let b = (fraction * self.d).sin() / self.d.sin();

        let x = a * self.n + b * self.o;
        let y = a * self.p + b * self.q;
        let z = a * self.r + b * self.s;

        let lat = z.atan2(x.hypot(y));
        let lon = y.atan2(x);

        Point::new(lon.to_degrees(), lat.to_degrees())
    }
}
