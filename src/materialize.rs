//! Turn a converged diagram into a normalized, quantized 8-bit distance
//! image (C6).

use crate::coord::euclidean_distance;
use crate::image_view::ImageView;
use crate::voronoi::VoronoiDiagram;

/// The maximum possible distance in an image of size `width x height`: the
/// diagonal. Any true nearest-background distance is at most this.
#[inline]
#[must_use]
pub fn max_distance(width: u32, height: u32) -> f32 {
    ((width as f32).powi(2) + (height as f32).powi(2)).sqrt()
}

/// Compute the per-pixel Euclidean distance field from a converged diagram.
///
/// A pixel whose `nearest_background` is still `None` (the whole image was
/// foreground) is reported at `max_distance`, saturating rather than
/// producing `+inf`, so [`quantize`] can treat it uniformly with every other
/// entry.
#[must_use]
pub fn distance_field(image: &ImageView<'_>, diagram: &VoronoiDiagram) -> Vec<f32> {
    let cap = max_distance(image.width(), image.height());
    image
        .coords()
        .map(|coord| {
            let entry = diagram.get(coord);
            let d = euclidean_distance(entry.point, entry.nearest_background);
            if d.is_finite() {
                d
            } else {
                cap
            }
        })
        .collect()
}

/// Normalize a distance field by `cap` and quantize to `u8`.
///
/// `byte = clamp(floor(256 * d / cap), 0, 255)`: `1.0` normalized maps to
/// `255`, any negative value (defensive only; distances are never negative)
/// maps to `0`.
#[must_use]
pub fn quantize(distances: &[f32], cap: f32) -> Vec<u8> {
    distances
        .iter()
        .map(|&d| {
            let v = d / cap;
            let scaled = (256.0 * v).floor();
            let clamped = scaled.clamp(0.0, 255.0);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let byte = clamped as u8;
            byte
        })
        .collect()
}

/// Materialize a diagram into a normalized 8-bit single-channel image.
#[must_use]
pub fn materialize(image: &ImageView<'_>, diagram: &VoronoiDiagram) -> Vec<u8> {
    let distances = distance_field(image, diagram);
    quantize(&distances, max_distance(image.width(), image.height()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagate::propagate;
    use crate::seed::seed;
    use crate::backend::HostBackend;

    fn run(width: u32, height: u32, data: &[u8]) -> Vec<u8> {
        let image = ImageView::new(width, height, data).unwrap();
        let (mut diagram, mut wavefront) = seed(&image).unwrap();
        let mut backend = HostBackend::new(image.size());
        propagate(&mut backend, &image, &mut diagram, &mut wavefront).unwrap();
        materialize(&image, &diagram)
    }

    #[test]
    fn scenario_1_all_background() {
        assert_eq!(run(2, 2, &[0, 0, 0, 0]), vec![0, 0, 0, 0]);
    }

    #[test]
    fn scenario_2_all_foreground_saturates() {
        assert_eq!(run(2, 2, &[255, 255, 255, 255]), vec![255, 255, 255, 255]);
    }

    #[test]
    fn scenario_3_diagonal_split() {
        assert_eq!(run(2, 2, &[0, 255, 255, 0]), vec![0, 90, 90, 0]);
    }

    #[test]
    fn scenario_4_three_by_three_plus() {
        // distances [0,1,0, 1,sqrt(2),1, 0,1,0], max_distance = sqrt(18).
        // floor(256*1/sqrt(18)) = 60, floor(256*sqrt(2)/sqrt(18)) = 85.
        let out = run(3, 3, &[0, 255, 0, 255, 255, 255, 0, 255, 0]);
        assert_eq!(out, vec![0, 60, 0, 60, 85, 60, 0, 60, 0]);
    }

    #[test]
    fn scenario_5_horizontal_strip() {
        assert_eq!(
            run(5, 1, &[0, 255, 255, 255, 0]),
            vec![0, 50, 100, 50, 0]
        );
    }

    #[test]
    fn quantization_law() {
        let distances = [0.0f32, 1.0, 2.0, 2.828_427];
        let cap = max_distance(2, 2);
        let bytes = quantize(&distances, cap);
        for (&d, &b) in distances.iter().zip(bytes.iter()) {
            let expected = ((256.0 * (d / cap)).floor().clamp(0.0, 255.0)) as u8;
            assert_eq!(b, expected);
        }
    }
}
