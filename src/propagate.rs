//! Wavefront propagation: repeatedly relax the diagram against a backend
//! until it converges (C5).

use std::collections::VecDeque;

use crate::backend::PropagationBackend;
use crate::coord::Coord;
use crate::error::EdtError;
use crate::image_view::ImageView;
use crate::voronoi::VoronoiDiagram;

/// Drive `backend` to a fixed point over `diagram`, starting from
/// `wavefront`.
///
/// Information propagates at most one grid step per pass (see §5 of the
/// design notes), so a correctly terminating run never needs more than
/// `height + width + 1` passes; exceeding that is reported as
/// [`EdtError::NonConvergence`] rather than looped on forever.
pub fn propagate<B: PropagationBackend>(
    backend: &mut B,
    image: &ImageView<'_>,
    diagram: &mut VoronoiDiagram,
    wavefront: &mut VecDeque<Coord>,
) -> Result<(), EdtError> {
    let safety_bound = u64::from(image.height()) + u64::from(image.width()) + 1;
    let mut passes: u64 = 0;

    loop {
        let changed = backend.run_relaxation_pass(image, diagram, wavefront)?;
        passes += 1;

        if !changed && wavefront.is_empty() {
            return Ok(());
        }
        if passes > safety_bound {
            return Err(EdtError::NonConvergence);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HostBackend;
    use crate::seed::seed;

    #[test]
    fn converges_on_three_by_three_plus() {
        // 0 255 0
        // 255 255 255
        // 0 255 0
        let data = [0u8, 255, 0, 255, 255, 255, 0, 255, 0];
        let image = ImageView::new(3, 3, &data).unwrap();
        let (mut diagram, mut wavefront) = seed(&image).unwrap();
        let mut backend = HostBackend::new(image.size());
        propagate(&mut backend, &image, &mut diagram, &mut wavefront).unwrap();

        for coord in image.coords() {
            assert!(diagram.nearest_background(coord).is_some());
        }
        let center = Coord::new(1, 1, 3);
        let nearest = diagram.nearest_background(center).unwrap();
        let d = crate::coord::euclidean_distance(center, Some(nearest));
        assert!((d - std::f32::consts::SQRT_2).abs() < 1e-5);
    }

    // Property 4: each entry's distance-to-pixel is non-increasing as
    // propagation proceeds, pass over pass.
    #[test]
    fn distances_are_monotonically_non_increasing_during_propagation() {
        let data = [0u8, 255, 0, 255, 255, 255, 0, 255, 0];
        let image = ImageView::new(3, 3, &data).unwrap();
        let (mut diagram, mut wavefront) = seed(&image).unwrap();
        let mut backend = crate::backend::HostBackend::new(image.size());

        let mut previous: Vec<f32> = image
            .coords()
            .map(|c| crate::coord::euclidean_distance(c, diagram.nearest_background(c)))
            .collect();

        loop {
            let changed = backend
                .run_relaxation_pass(&image, &mut diagram, &mut wavefront)
                .unwrap();

            let current: Vec<f32> = image
                .coords()
                .map(|c| crate::coord::euclidean_distance(c, diagram.nearest_background(c)))
                .collect();
            for (idx, (&prev, &now)) in previous.iter().zip(current.iter()).enumerate() {
                assert!(now <= prev + 1e-6, "entry {idx} worsened: {prev} -> {now}");
            }
            previous = current;

            if !changed && wavefront.is_empty() {
                break;
            }
        }
    }

    #[test]
    fn all_foreground_never_converges_to_a_source() {
        let data = [255u8; 4];
        let image = ImageView::new(2, 2, &data).unwrap();
        let (mut diagram, mut wavefront) = seed(&image).unwrap();
        let mut backend = HostBackend::new(image.size());
        propagate(&mut backend, &image, &mut diagram, &mut wavefront).unwrap();
        for coord in image.coords() {
            assert_eq!(diagram.nearest_background(coord), None);
        }
    }
}
