//! Voronoi-seed initialization: classify every pixel and enqueue the
//! initial wavefront (C4).

use std::collections::VecDeque;

use crate::coord::Neighborhood;
use crate::error::EdtError;
use crate::image_view::ImageView;
use crate::voronoi::{VoronoiDiagram, VoronoiEntry};

/// Seed the diagram from `image` and return the initial wavefront.
///
/// For every background pixel, the diagram entry becomes its own
/// nearest-background; if any of its neighbors is foreground, the pixel is
/// pushed onto the wavefront (it borders the region distance must spread
/// into). For every foreground pixel, the entry starts with no known
/// nearest-background.
///
/// The wavefront is seeded from border *background* pixels, not their
/// foreground neighbors: propagation reads `nearest_background` from the
/// popped pixel and spreads it outward, so a foreground pixel enqueued with
/// no record yet would never relax anything.
pub fn seed(image: &ImageView<'_>) -> Result<(VoronoiDiagram, VecDeque<crate::coord::Coord>), EdtError> {
    let mut diagram = VoronoiDiagram::with_size(image.size())?;
    let mut wavefront = VecDeque::new();

    for coord in image.coords() {
        let nb = Neighborhood::of(image, coord);
        if image.is_background(coord) {
            diagram.set(
                coord,
                VoronoiEntry {
                    point: coord,
                    nearest_background: Some(coord),
                },
            );
            if nb.iter().any(|p| !p.background) {
                wavefront.push_back(coord);
            }
        } else {
            diagram.set(
                coord,
                VoronoiEntry {
                    point: coord,
                    nearest_background: None,
                },
            );
        }
    }

    Ok((diagram, wavefront))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coord;

    #[test]
    fn all_background_seeds_identity_no_wavefront() {
        let data = [0u8; 4];
        let image = ImageView::new(2, 2, &data).unwrap();
        let (diagram, wavefront) = seed(&image).unwrap();
        for coord in image.coords() {
            assert_eq!(diagram.nearest_background(coord), Some(coord));
        }
        assert!(wavefront.is_empty());
    }

    #[test]
    fn all_foreground_has_no_nearest_background_and_empty_wavefront() {
        let data = [255u8; 4];
        let image = ImageView::new(2, 2, &data).unwrap();
        let (diagram, wavefront) = seed(&image).unwrap();
        for coord in image.coords() {
            assert_eq!(diagram.nearest_background(coord), None);
        }
        assert!(wavefront.is_empty());
    }

    #[test]
    fn border_background_pixels_are_enqueued() {
        // 0 255
        // 255 0
        let data = [0u8, 255, 255, 0];
        let image = ImageView::new(2, 2, &data).unwrap();
        let (_diagram, wavefront) = seed(&image).unwrap();
        let expected: Vec<Coord> = vec![Coord::new(0, 0, 2), Coord::new(1, 1, 2)];
        let got: Vec<Coord> = wavefront.into_iter().collect();
        assert_eq!(got, expected);
    }
}
