mod args;
mod utils;

use crate::args::Opt;
use crate::utils::{generate_filename, save_image};

use clap::Parser;
use std::fmt::Write;

fn main() {
    if let Err(e) = try_main() {
        eprintln!("edt: {}", e);
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = Opt::parse();

    let output_image = if let Some(output) = opt.output.clone() {
        output
    } else {
        generate_filename(&opt)?.into()
    };

    let input_image = image::open(&opt.input)?.into_luma8();
    let (width, height) = input_image.dimensions();
    let input_buffer = input_image.as_raw();

    let mut display_string = String::new();

    let t0 = std::time::Instant::now();
    let output_buffer = edt::transform::transform(width, height, input_buffer, opt.backend.into())?;
    let t1 = t0.elapsed();
    if opt.verbose {
        write!(&mut display_string, "backend: {}, {:?}", opt.backend, t1)?;
    }

    if opt.reference {
        let input_view = edt::ImageView::new(width, height, input_buffer)?;
        let reference_buffer = edt::brute_force::materialize(&input_view);
        if reference_buffer != output_buffer {
            return Err("brute-force reference transform disagrees with chosen backend".into());
        }
        if opt.verbose {
            write!(&mut display_string, ", reference check passed")?;
        }
    }

    save_image(output_image.as_ref(), &output_buffer, width, height)?;

    if opt.verbose {
        println!("{display_string}");
    }

    Ok(())
}
