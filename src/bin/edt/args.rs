use clap::Parser;

#[derive(Debug, Parser)]
#[clap(version, about, long_about = None)]
pub struct Opt {
    /// Input image file.
    #[clap(short, long, parse(from_os_str))]
    pub input: std::path::PathBuf,

    /// Output file, defaults to PNG image output.
    #[clap(short, long, parse(from_os_str))]
    pub output: Option<std::path::PathBuf>,

    /// Compute backend driving the propagation engine.
    #[clap(short, long, default_value = "cpu")]
    pub backend: crate::utils::BackendArg,

    /// Also run the O(n^2) brute-force reference transform and fail if it
    /// disagrees with the chosen backend's output.
    #[clap(long)]
    pub reference: bool,

    /// Print the backend used and the time taken.
    #[clap(short, long)]
    pub verbose: bool,

    /// Save as a JPG or PNG file.
    #[clap(long, default_value = "png")]
    pub format: String,
}
