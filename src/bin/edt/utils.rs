use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{codecs::jpeg::JpegEncoder, ColorType, ImageEncoder};

use edt::transform::Backend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendArg {
    Cpu,
    OpenCl,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Cpu => Backend::Cpu,
            BackendArg::OpenCl => Backend::OpenCl,
        }
    }
}

impl std::str::FromStr for BackendArg {
    type Err = edt::EdtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            s if s.eq_ignore_ascii_case("cpu") => Ok(Self::Cpu),
            s if s.eq_ignore_ascii_case("opencl") || s.eq_ignore_ascii_case("gpu") => {
                Ok(Self::OpenCl)
            }
            _ => Err(Self::Err::General("Invalid backend, expected cpu or opencl")),
        }
    }
}

impl std::fmt::Display for BackendArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::OpenCl => write!(f, "opencl"),
        }
    }
}

/// Create a file name displaying the backend used.
pub fn generate_filename(opt: &crate::args::Opt) -> Result<String, Box<dyn std::error::Error>> {
    let mut filename = opt
        .input
        .file_stem()
        .ok_or("No file stem")?
        .to_str()
        .ok_or("Could not convert file stem to string")?
        .to_string();

    let format =
        if opt.format.eq_ignore_ascii_case("jpg") || opt.format.eq_ignore_ascii_case("jpeg") {
            "jpg"
        } else {
            opt.format.as_str()
        };

    use std::fmt::Write;
    write!(&mut filename, "-edt-{backend}", backend = opt.backend)?;
    write!(&mut filename, ".{format}")?;

    Ok(filename)
}

/// Saves a single-channel distance image buffer to file.
pub fn save_image(
    output: &std::path::Path,
    imgbuf: &[u8],
    width: u32,
    height: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let w = std::io::BufWriter::new(std::fs::File::create(output)?);

    if let Some(ext) = output.extension() {
        if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") {
            let mut encoder = JpegEncoder::new_with_quality(w, 90);

            if let Err(err) = encoder.encode(imgbuf, width, height, ColorType::L8) {
                eprintln!("edt: {}", err);
                std::fs::remove_file(output)?;
            }

            return Ok(());
        }
    }

    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, FilterType::Sub);

    if let Err(err) = encoder.write_image(imgbuf, width, height, ColorType::L8) {
        eprintln!("edt: {}", err);
        std::fs::remove_file(output)?;
    }

    Ok(())
}
