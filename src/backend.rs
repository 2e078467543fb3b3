//! The accelerator interface: a single relaxation-pass contract that both a
//! host worklist (Schedule A) and a data-parallel device (Schedule B) can
//! implement interchangeably (C7).

use std::collections::VecDeque;

use crate::coord::{squared_distance, Coord, Neighborhood};
use crate::error::EdtError;
use crate::image_view::ImageView;
use crate::voronoi::VoronoiDiagram;

/// A compute backend capable of performing one relaxation pass over the
/// propagation wavefront.
///
/// Implementations own no state across calls beyond what is necessary to
/// talk to their device; all device/platform selection, kernel compilation,
/// buffer management, and error-to-text translation are internal.
pub trait PropagationBackend {
    /// Run one relaxation pass, mutating `diagram` and `wavefront` in place.
    ///
    /// Returns whether any entry improved during the pass. A backend that
    /// drains a worklist front-to-back (Schedule A) "improves" whenever
    /// at least one push happens during the call; a bulk backend (Schedule
    /// B) reports its pass-level "changed" flag.
    fn run_relaxation_pass(
        &mut self,
        image: &ImageView<'_>,
        diagram: &mut VoronoiDiagram,
        wavefront: &mut VecDeque<Coord>,
    ) -> Result<bool, EdtError>;
}

/// Relax `target`'s diagram entry against the candidate source `source`,
/// pushing `target` back onto the wavefront if it improved.
///
/// Shared by every backend so the relaxation rule itself is defined exactly
/// once: source wins iff it is strictly closer than whatever `target`
/// currently holds (ties keep the existing record, matching the spec's tie
/// breaking note — any choice yields the same final distance field).
#[inline]
fn relax(
    diagram: &mut VoronoiDiagram,
    wavefront: &mut VecDeque<Coord>,
    target: Coord,
    source: Coord,
) -> bool {
    let current = diagram.nearest_background(target);
    let improves = match current {
        None => true,
        Some(current) => squared_distance(target, source) < squared_distance(target, current),
    };
    if improves {
        diagram.set_nearest_background(target, source);
        wavefront.push_back(target);
    }
    improves
}

/// Schedule A: a strictly sequential host worklist.
///
/// Pops one pixel per call to [`PropagationBackend::run_relaxation_pass`] is
/// too fine-grained to be useful standalone, so this backend instead drains
/// the entire current wavefront on each call (one "pass" == one full worklist
/// drain), matching the iteration granularity [`crate::propagate::propagate`]
/// expects from any backend.
///
/// Tracks its own cumulative pop count against the `8 * N` safety bound from
/// the concurrency model (independent of the pass-level cap
/// [`crate::propagate::propagate`] applies); exceeding it is a
/// [`EdtError::NonConvergence`], since a correctly converging run never gets
/// close.
#[derive(Debug, Clone, Copy)]
pub struct HostBackend {
    pops: usize,
    max_pops: usize,
}

impl HostBackend {
    /// Create a host backend sized for an image with `pixel_count` pixels.
    #[must_use]
    pub fn new(pixel_count: usize) -> Self {
        Self {
            pops: 0,
            max_pops: pixel_count.saturating_mul(8),
        }
    }
}

impl PropagationBackend for HostBackend {
    fn run_relaxation_pass(
        &mut self,
        image: &ImageView<'_>,
        diagram: &mut VoronoiDiagram,
        wavefront: &mut VecDeque<Coord>,
    ) -> Result<bool, EdtError> {
        let mut changed = false;
        // Pop the entire current wavefront; pixels pushed during this pass
        // become next pass's work, same effect as re-issuing the kernel.
        let pending = wavefront.len();
        for _ in 0..pending {
            let Some(w) = wavefront.pop_front() else {
                break;
            };
            self.pops += 1;
            if self.pops > self.max_pops {
                return Err(EdtError::NonConvergence);
            }
            let Some(source) = diagram.nearest_background(w) else {
                // A foreground pixel should never reach the wavefront with
                // no record; seeding only enqueues background border pixels.
                continue;
            };
            let neighborhood = Neighborhood::of(image, w);
            for neighbor in neighborhood.iter() {
                if relax(diagram, wavefront, neighbor.coord, source) {
                    changed = true;
                }
            }
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed;

    #[test]
    fn host_backend_converges_on_simple_strip() {
        let data = [0u8, 255, 255, 255, 0];
        let image = ImageView::new(5, 1, &data).unwrap();
        let (mut diagram, mut wavefront) = seed(&image).unwrap();
        let mut backend = HostBackend::new(image.size());
        loop {
            let changed = backend
                .run_relaxation_pass(&image, &mut diagram, &mut wavefront)
                .unwrap();
            if !changed && wavefront.is_empty() {
                break;
            }
        }
        for coord in image.coords() {
            assert!(diagram.nearest_background(coord).is_some());
        }
    }
}
