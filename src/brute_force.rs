//! Direct O(N^2) reference distance transform, used only for differential
//! testing and the CLI's opt-in `--reference` cross-check (A4).
//!
//! This is the naive all-pairs implementation mentioned as existing
//! alongside the wavefront engine: for every pixel, scan every background
//! pixel and keep the minimum distance. It is never the default path.

use crate::coord::Coord;
use crate::image_view::ImageView;

/// Compute the exact nearest-background Euclidean distance for every pixel
/// by brute force.
#[must_use]
pub fn distances(image: &ImageView<'_>) -> Vec<f32> {
    let backgrounds: Vec<Coord> = image.coords().filter(|&c| image.is_background(c)).collect();

    image
        .coords()
        .map(|p| {
            backgrounds
                .iter()
                .map(|&b| crate::coord::euclidean_distance(p, Some(b)))
                .fold(f32::INFINITY, f32::min)
        })
        .collect()
}

/// Materialize the brute-force distance field into the same normalized
/// 8-bit encoding as [`crate::materialize::materialize`], for byte-exact
/// comparison against the wavefront engine on small fixtures.
#[must_use]
pub fn materialize(image: &ImageView<'_>) -> Vec<u8> {
    let cap = crate::materialize::max_distance(image.width(), image.height());
    crate::materialize::quantize(&distances(image), cap)
}
