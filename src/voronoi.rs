//! The Voronoi diagram: a flat table of per-pixel nearest-background
//! records (C3).

use crate::coord::Coord;
use crate::error::EdtError;

/// One entry of the diagram: the pixel it describes, and its current
/// nearest-background record.
///
/// `point` is redundant with the entry's index in [`VoronoiDiagram`] but is
/// kept for locality when the table is shipped to an accelerator as a flat
/// buffer (see [`crate::backend`]).
#[derive(Debug, Clone, Copy)]
pub struct VoronoiEntry {
    /// The pixel this entry describes.
    pub point: Coord,
    /// The nearest background pixel found so far, or `None` if none has been
    /// found yet (the invalid sentinel).
    pub nearest_background: Option<Coord>,
}

/// A flat table of `width * height` entries, indexed by pixel linear index.
#[derive(Debug, Clone)]
pub struct VoronoiDiagram {
    entries: Vec<VoronoiEntry>,
}

impl VoronoiDiagram {
    /// Allocate a diagram with `size` entries, each initialized to `point`
    /// pointing at itself with no nearest-background record.
    ///
    /// Entries are overwritten by the seeding pass immediately after
    /// construction; the placeholder `point` values here are never observed.
    pub fn with_size(size: usize) -> Result<Self, EdtError> {
        let mut entries = Vec::new();
        entries.try_reserve_exact(size)?;
        entries.extend((0..size).map(|_| VoronoiEntry {
            point: Coord::new(0, 0, 1),
            nearest_background: None,
        }));
        Ok(Self { entries })
    }

    /// Number of entries in the diagram.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` iff the diagram holds no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `coord`'s linear index.
    #[inline]
    #[must_use]
    pub fn get(&self, coord: Coord) -> VoronoiEntry {
        self.entries[coord.idx]
    }

    /// Nearest-background record currently stored for `coord`.
    #[inline]
    #[must_use]
    pub fn nearest_background(&self, coord: Coord) -> Option<Coord> {
        self.entries[coord.idx].nearest_background
    }

    /// Overwrite the entry at `coord`'s linear index.
    #[inline]
    pub fn set(&mut self, coord: Coord, entry: VoronoiEntry) {
        self.entries[coord.idx] = entry;
    }

    /// Set the nearest-background record for `coord`.
    #[inline]
    pub fn set_nearest_background(&mut self, coord: Coord, nearest: Coord) {
        self.entries[coord.idx].nearest_background = Some(nearest);
    }

    /// Borrow the entries as a flat slice, e.g. for marshalling to an
    /// accelerator buffer.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[VoronoiEntry] {
        &self.entries
    }

    /// Borrow the entries mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [VoronoiEntry] {
        &mut self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_no_nearest_background() {
        let diagram = VoronoiDiagram::with_size(4).unwrap();
        for entry in diagram.as_slice() {
            assert!(entry.nearest_background.is_none());
        }
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut diagram = VoronoiDiagram::with_size(4).unwrap();
        let c0 = Coord::new(0, 0, 2);
        let c1 = Coord::new(0, 1, 2);
        diagram.set(
            c0,
            VoronoiEntry {
                point: c0,
                nearest_background: Some(c0),
            },
        );
        diagram.set_nearest_background(c1, c0);
        assert_eq!(diagram.nearest_background(c0), Some(c0));
        assert_eq!(diagram.nearest_background(c1), Some(c0));
    }
}
