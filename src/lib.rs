//! Euclidean distance transform of a binary image.
//!
//! For every foreground pixel (any byte `!= 0`), this crate reports the
//! Euclidean distance to the nearest background pixel (byte `== 0`),
//! normalized and quantized into an 8-bit single-channel image. The engine
//! runs in two phases:
//!
//! 1. **Seeding** ([`seed`]) builds a [`voronoi::VoronoiDiagram`] where every
//!    background pixel is its own nearest-background record, every
//!    foreground pixel starts with no record, and the border background
//!    pixels (those touching foreground) form the initial wavefront.
//! 2. **Propagation** ([`propagate`]) drains the wavefront against a
//!    [`backend::PropagationBackend`], relaxing each pixel's record against
//!    its 8-neighborhood until nothing improves.
//!
//! [`materialize::materialize`] then turns the converged diagram into the
//! output byte image.
//!
//! ## Usage
//!
//! The convenience entry point [`transform::transform`] runs the whole
//! pipeline:
//!
//! ```
//! use edt::transform::{transform, Backend};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (width, height) = (2, 2);
//! let image = [0u8, 255, 255, 0];
//! let distances = transform(width, height, &image, Backend::Cpu)?;
//! assert_eq!(distances, vec![0, 90, 90, 0]);
//! # Ok(())
//! # }
//! ```
//!
//! Lower-level access to each phase is available for callers that want to
//! inspect the diagram mid-flight or supply their own backend:
//!
//! ```
//! use edt::backend::HostBackend;
//! use edt::image_view::ImageView;
//! use edt::{materialize, propagate, seed};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = [0u8, 255, 255, 0];
//! let image = ImageView::new(2, 2, &data)?;
//! let (mut diagram, mut wavefront) = seed::seed(&image)?;
//! let mut backend = HostBackend::new(image.size());
//! propagate::propagate(&mut backend, &image, &mut diagram, &mut wavefront)?;
//! let out = materialize::materialize(&image, &diagram);
//! assert_eq!(out, vec![0, 90, 90, 0]);
//! # Ok(())
//! # }
//! ```
#![deny(
    absolute_paths_not_starting_with_crate,
    missing_docs,
    non_ascii_idents,
    noop_method_call,
    unused_results
)]
// The host algorithm is entirely safe; `unsafe` only appears in the optional
// `opencl` backend, where enqueuing a kernel is an unsafe `ocl` API. See
// `opencl_backend`'s module-level `allow`.
#![deny(unsafe_code)]
#![warn(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

pub mod backend;
pub mod brute_force;
pub mod coord;
pub mod error;
pub mod image_view;
pub mod materialize;
#[cfg(feature = "opencl")]
pub mod opencl_backend;
pub mod propagate;
pub mod seed;
pub mod transform;
pub mod voronoi;

pub use coord::{Coord, Neighborhood, Pixel};
pub use error::EdtError;
pub use image_view::ImageView;
pub use voronoi::{VoronoiDiagram, VoronoiEntry};
