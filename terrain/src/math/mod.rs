mod haversine;
mod mercator;

pub(crate) use haversine::GreatCircle;
pub use mercator::{pixel_ground_size, project, to_world_pixel, world_size};
