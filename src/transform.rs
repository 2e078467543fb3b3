//! Top-level orchestration: decoded image in, normalized distance image out.

use crate::backend::HostBackend;
use crate::error::EdtError;
use crate::image_view::ImageView;
use crate::materialize::materialize;
use crate::propagate::propagate;
use crate::seed::seed;

/// Which compute backend drives the propagation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Schedule A: the sequential host worklist. Always available.
    Cpu,
    /// Schedule B: bulk relaxation offloaded to an OpenCL device. Requires
    /// the `opencl` feature; falls back to [`Backend::Cpu`] when no
    /// suitable device is found.
    OpenCl,
}

/// Run the full two-phase distance transform: seed, propagate, materialize.
///
/// `width * height` must equal `data.len()`; `data` is a single-channel
/// buffer where `0` is background and any other byte is foreground.
pub fn transform(
    width: u32,
    height: u32,
    data: &[u8],
    backend: Backend,
) -> Result<Vec<u8>, EdtError> {
    let image = ImageView::new(width, height, data)?;
    let (mut diagram, mut wavefront) = seed(&image)?;

    match backend {
        Backend::Cpu => {
            let mut host = HostBackend::new(image.size());
            propagate(&mut host, &image, &mut diagram, &mut wavefront)?;
        }
        Backend::OpenCl => {
            run_with_opencl_fallback(&image, &mut diagram, &mut wavefront)?;
        }
    }

    Ok(materialize(&image, &diagram))
}

#[cfg(feature = "opencl")]
fn run_with_opencl_fallback(
    image: &ImageView<'_>,
    diagram: &mut crate::voronoi::VoronoiDiagram,
    wavefront: &mut std::collections::VecDeque<crate::coord::Coord>,
) -> Result<(), EdtError> {
    use crate::opencl_backend::OpenClBackend;

    match OpenClBackend::new() {
        Ok(mut gpu) => propagate(&mut gpu, image, diagram, wavefront),
        Err(EdtError::BackendUnavailable(reason)) => {
            eprintln!("edt: OpenCL backend unavailable ({reason}), falling back to host backend");
            let mut host = HostBackend::new(image.size());
            propagate(&mut host, image, diagram, wavefront)
        }
        Err(other) => Err(other),
    }
}

#[cfg(not(feature = "opencl"))]
fn run_with_opencl_fallback(
    image: &ImageView<'_>,
    diagram: &mut crate::voronoi::VoronoiDiagram,
    wavefront: &mut std::collections::VecDeque<crate::coord::Coord>,
) -> Result<(), EdtError> {
    eprintln!("edt: built without the `opencl` feature, falling back to host backend");
    let mut host = HostBackend::new(image.size());
    propagate(&mut host, image, diagram, wavefront)
}
