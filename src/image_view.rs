//! A borrowed, single-channel image buffer (C2).

use crate::coord::{Coord, Pixel};
use crate::error::EdtError;

/// A read-only view over a single-channel byte buffer bound to `(height,
/// width)`.
///
/// Value `0` is background, any other value is foreground. The image is
/// immutable for the duration of a transform; `ImageView` only ever borrows.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> ImageView<'a> {
    /// Bind `data` to `(width, height)`.
    ///
    /// Returns [`EdtError::InputUnreadable`] if `data.len() != width *
    /// height`, or if either dimension is `0`.
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> Result<Self, EdtError> {
        if width == 0 || height == 0 {
            return Err(EdtError::InputUnreadable(
                "image width and height must both be non-zero",
            ));
        }
        let expected = usize::try_from(width)
            .ok()
            .and_then(|w| usize::try_from(height).ok().map(|h| (w, h)))
            .and_then(|(w, h)| w.checked_mul(h))
            .ok_or(EdtError::InputUnreadable(
                "image dimensions overflow usize",
            ))?;
        if data.len() != expected {
            return Err(EdtError::InputUnreadable(
                "decoded buffer length does not match width * height",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total pixel count, `width * height`.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Raw byte value at `coord`.
    #[inline]
    #[must_use]
    pub fn value_at(&self, coord: Coord) -> u8 {
        self.data[coord.idx]
    }

    /// `true` iff `value_at(coord) == 0`.
    #[inline]
    #[must_use]
    pub fn is_background(&self, coord: Coord) -> bool {
        self.value_at(coord) == 0
    }

    /// The [`Pixel`] at `coord`, classified by [`Self::is_background`].
    #[inline]
    #[must_use]
    pub fn pixel_at(&self, coord: Coord) -> Pixel {
        Pixel {
            coord,
            background: self.is_background(coord),
        }
    }

    /// Iterate every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Coord::new(y, x, width)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_buffer() {
        let data = vec![0u8; 3];
        assert!(ImageView::new(2, 2, &data).is_err());
    }

    #[test]
    fn rejects_zero_dimension() {
        let data: Vec<u8> = Vec::new();
        assert!(ImageView::new(0, 5, &data).is_err());
    }

    #[test]
    fn classifies_background_and_foreground() {
        let data = [0u8, 255, 0, 255];
        let image = ImageView::new(2, 2, &data).unwrap();
        assert!(image.is_background(Coord::new(0, 0, 2)));
        assert!(!image.is_background(Coord::new(0, 1, 2)));
    }

    #[test]
    fn coords_are_row_major() {
        let data = vec![0u8; 6];
        let image = ImageView::new(3, 2, &data).unwrap();
        let coords: Vec<(u32, u32)> = image.coords().map(|c| (c.y, c.x)).collect();
        assert_eq!(
            coords,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
    }
}
