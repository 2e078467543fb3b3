//! Schedule B: bulk relaxation offloaded to an OpenCL device via the `ocl`
//! crate, gated behind the `opencl` feature (C7).
//!
//! Grounded on `OpenCLUtils::executeOpenCL` in the original source: build a
//! context for one device, compile the kernel, upload input buffers,
//! dispatch, read results back. The difference from the original is purely
//! mechanical (the `ocl` crate's builder API in place of raw `cl::Buffer`/
//! `cl::Kernel` calls); the buffer shapes are the same ones named in
//! spec.md §4.4's accelerator kernel contract.
#![allow(unsafe_code)]

use std::collections::VecDeque;
use std::fs;

use ocl::{Buffer, Kernel, ProQue};

use crate::backend::PropagationBackend;
use crate::coord::Coord;
use crate::error::EdtError;
use crate::image_view::ImageView;
use crate::voronoi::VoronoiDiagram;

const DEFAULT_KERNEL_FILENAME: &str = "kernel.cl";

/// Embedded fallback kernel, used when `kernel.cl` is not present in the
/// working directory. One work-item per pixel; each considers its 8
/// in-range neighbors' `nearest_background` as a candidate source (the dual
/// of the host worklist's push-based relaxation) and writes back the best.
const DEFAULT_KERNEL_SOURCE: &str = r#"
__kernel void relax(
    __global const uchar *image,
    const uint width,
    const uint height,
    __global int *nearest_y,
    __global int *nearest_x,
    __global int *changed
) {
    uint idx = get_global_id(0);
    if (idx >= width * height) return;

    int py = (int)(idx / width);
    int px = (int)(idx % width);

    int best_y = nearest_y[idx];
    int best_x = nearest_x[idx];
    long best_sq = -1;
    if (best_y >= 0) {
        long dy = (long)(py - best_y);
        long dx = (long)(px - best_x);
        best_sq = dy * dy + dx * dx;
    }

    for (int dy = -1; dy <= 1; dy++) {
        int ny = py + dy;
        if (ny < 0 || ny >= (int)height) continue;
        for (int dx = -1; dx <= 1; dx++) {
            if (dx == 0 && dy == 0) continue;
            int nx = px + dx;
            if (nx < 0 || nx >= (int)width) continue;

            uint nidx = (uint)ny * width + (uint)nx;
            int cand_y = nearest_y[nidx];
            int cand_x = nearest_x[nidx];
            if (cand_y < 0) continue;

            long cdy = (long)(py - cand_y);
            long cdx = (long)(px - cand_x);
            long cand_sq = cdy * cdy + cdx * cdx;

            if (best_sq < 0 || cand_sq < best_sq) {
                best_sq = cand_sq;
                best_y = cand_y;
                best_x = cand_x;
                *changed = 1;
            }
        }
    }

    nearest_y[idx] = best_y;
    nearest_x[idx] = best_x;
}
"#;

/// The OpenCL-backed propagation backend (Schedule B).
pub struct OpenClBackend {
    pro_que: ProQue,
}

impl OpenClBackend {
    /// Build a context for the default platform/device and compile the
    /// relaxation kernel.
    ///
    /// Returns [`EdtError::BackendUnavailable`] when no platform or device
    /// is found, or the kernel fails to build — callers are expected to
    /// fall back to [`crate::backend::HostBackend`] in that case, per the
    /// recovery policy in the error handling design.
    pub fn new() -> Result<Self, EdtError> {
        let source = fs::read_to_string(DEFAULT_KERNEL_FILENAME)
            .unwrap_or_else(|_| DEFAULT_KERNEL_SOURCE.to_string());

        let pro_que = ProQue::builder()
            .src(source)
            .build()
            .map_err(|e| EdtError::BackendUnavailable(leak_string(e.to_string())))?;

        Ok(Self { pro_que })
    }
}

/// `EdtError::BackendUnavailable` carries a `&'static str`; OpenCL error
/// messages are only known at runtime, so this leaks a short one-shot
/// message. Device enumeration happens at most once per transform, so the
/// leak is bounded.
fn leak_string(s: String) -> &'static str {
    Box::leak(s.into_boxed_str())
}

impl PropagationBackend for OpenClBackend {
    fn run_relaxation_pass(
        &mut self,
        image: &ImageView<'_>,
        diagram: &mut VoronoiDiagram,
        wavefront: &mut VecDeque<Coord>,
    ) -> Result<bool, EdtError> {
        let width = image.width();
        let height = image.height();
        let size = diagram.len();

        let mut image_bytes = Vec::with_capacity(size);
        let mut nearest_y = Vec::with_capacity(size);
        let mut nearest_x = Vec::with_capacity(size);
        for coord in image.coords() {
            image_bytes.push(image.value_at(coord));
            match diagram.nearest_background(coord) {
                Some(n) => {
                    nearest_y.push(n.y as i32);
                    nearest_x.push(n.x as i32);
                }
                None => {
                    nearest_y.push(-1);
                    nearest_x.push(-1);
                }
            }
        }

        self.pro_que
            .set_dims(size);

        let image_buf: Buffer<u8> = Buffer::builder()
            .queue(self.pro_que.queue().clone())
            .len(size)
            .copy_host_slice(&image_bytes)
            .build()
            .map_err(ocl_err)?;
        let y_buf: Buffer<i32> = Buffer::builder()
            .queue(self.pro_que.queue().clone())
            .len(size)
            .copy_host_slice(&nearest_y)
            .build()
            .map_err(ocl_err)?;
        let x_buf: Buffer<i32> = Buffer::builder()
            .queue(self.pro_que.queue().clone())
            .len(size)
            .copy_host_slice(&nearest_x)
            .build()
            .map_err(ocl_err)?;
        let changed_buf: Buffer<i32> = Buffer::builder()
            .queue(self.pro_que.queue().clone())
            .len(1)
            .copy_host_slice(&[0i32])
            .build()
            .map_err(ocl_err)?;

        let kernel: Kernel = self
            .pro_que
            .kernel_builder("relax")
            .arg(&image_buf)
            .arg(width)
            .arg(height)
            .arg(&y_buf)
            .arg(&x_buf)
            .arg(&changed_buf)
            .build()
            .map_err(ocl_err)?;

        unsafe {
            kernel.enq().map_err(ocl_err)?;
        }

        let mut out_y = vec![0i32; size];
        let mut out_x = vec![0i32; size];
        let mut out_changed = vec![0i32; 1];
        y_buf.read(&mut out_y).enq().map_err(ocl_err)?;
        x_buf.read(&mut out_x).enq().map_err(ocl_err)?;
        changed_buf.read(&mut out_changed).enq().map_err(ocl_err)?;

        for coord in image.coords() {
            let y = out_y[coord.idx];
            let x = out_x[coord.idx];
            if y >= 0 {
                #[allow(clippy::cast_sign_loss)]
                let nearest = Coord::new(y as u32, x as u32, width);
                diagram.set_nearest_background(coord, nearest);
            }
        }

        // Schedule B processes every pixel in bulk each pass; it has no use
        // for the host worklist, so it drains it to keep the shared
        // termination check (`!changed && wavefront.is_empty()`) meaningful.
        wavefront.clear();

        Ok(out_changed[0] != 0)
    }
}

fn ocl_err(e: ocl::Error) -> EdtError {
    EdtError::BackendFailure(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagate::propagate;
    use crate::seed::seed;

    #[test]
    fn opencl_backend_matches_host_backend_when_available() {
        let data = [0u8, 255, 255, 0];
        let image = ImageView::new(2, 2, &data).unwrap();

        let Ok(mut gpu) = OpenClBackend::new() else {
            // No OpenCL runtime in this environment; nothing to compare.
            return;
        };

        let (mut diagram, mut wavefront) = seed(&image).unwrap();
        propagate(&mut gpu, &image, &mut diagram, &mut wavefront).unwrap();
        let gpu_out = crate::materialize::materialize(&image, &diagram);

        assert_eq!(gpu_out, vec![0, 90, 90, 0]);
    }
}
