/// firfilt: design a windowed-sinc FIR kernel and apply it to a signal.
///
/// The input is the `signal` tensor of a safetensors file (`[T]` or `[C, T]`,
/// F32 or F64). Without `--input` a demo mixture of three sinusoids is used.
///
/// Output keys (all F64):
///   signal     [C, T]   input
///   filtered   [C, T]   filtered input
///   kernel     [N]      taps used
///   response   [F]      |H(f)| from DC to Nyquist
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use ndarray::Array2;
use std::path::PathBuf;

use sincfir::{
    auto_order, filter_channels, frequency_response, resolve_kernel,
    io::{SignalFile, StWriter},
    signal::{sinusoids, symmetric_time},
    BoundaryPolicy, FilterSpec, FilterType, WindowSpec,
};

#[derive(Parser, Debug)]
#[command(name = "firfilt", about = "Windowed-sinc FIR design and filtering")]
struct Args {
    /// lowpass, highpass, bandpass, bandstop (bandreject, notch) or window.
    #[arg(long, default_value = "lowpass")]
    kind: String,

    /// Cutoff for lowpass/highpass, fraction of Nyquist.
    #[arg(long)]
    fc: Option<f64>,

    /// Lower band edge for bandpass/bandstop.
    #[arg(long)]
    fclo: Option<f64>,

    /// Upper band edge for bandpass/bandstop.
    #[arg(long)]
    fchi: Option<f64>,

    /// Number of taps (0: signal length).
    #[arg(long, default_value_t = 0)]
    order: usize,

    /// Derive the order from a transition bandwidth instead.
    #[arg(long, conflicts_with = "order")]
    trans_bw: Option<f64>,

    /// Taper, e.g. `hamming` or `kaiser:beta=6`.
    #[arg(long, default_value = "hamming")]
    window: String,

    /// extend, truncate or periodic.
    #[arg(long, default_value = "extend")]
    boundary: String,

    /// Input safetensors with a `signal` tensor.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Length of the demo signal when no input is given.
    #[arg(long, default_value_t = 1001)]
    samples: usize,

    /// Points of the reported magnitude response.
    #[arg(long, default_value_t = 512)]
    response_points: usize,

    /// Output safetensors path.
    #[arg(long)]
    output: PathBuf,
}

/// Turn the string-typed arguments into a validated spec and boundary policy.
fn build_spec(args: &Args) -> Result<(FilterSpec, BoundaryPolicy)> {
    let kind: FilterType = args.kind.parse()?;
    let window: WindowSpec = args.window.parse()?;
    let boundary: BoundaryPolicy = args.boundary.parse()?;
    let order = match args.trans_bw {
        Some(tb) => auto_order(tb)?,
        None => args.order,
    };
    let spec = FilterSpec::from_kind(kind, args.fc, args.fclo, args.fchi)?
        .with_order(order)
        .with_window(window);
    Ok((spec, boundary))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (spec, boundary) = build_spec(&args)?;
    let kind = spec.kind();

    let data: Array2<f64> = match &args.input {
        Some(path) => SignalFile::load(path)?.data,
        None => {
            let t = symmetric_time(args.samples);
            let x = sinusoids(&[0.01, 0.1, 0.4], &[1.0, 0.1, 0.05], &t)?;
            Array2::from_shape_vec((1, x.len()), x)?
        }
    };
    info!("signal: {} ch × {} samples", data.nrows(), data.ncols());

    let kernel = resolve_kernel(spec.into(), data.ncols())
        .context("designing kernel")?;
    info!("kernel: {kind} N={} window={} boundary={boundary}", kernel.len(), args.window);

    let filtered = filter_channels(&data, kernel.as_slice(), boundary)
        .context("filtering signal")?;
    let response = frequency_response(&kernel, args.response_points)?;

    let mut w = StWriter::new();
    w.add_f64_arr2("signal", &data);
    w.add_f64_arr2("filtered", &filtered);
    w.add_f64("kernel", &kernel, &[kernel.len()]);
    w.add_f64("response", &response, &[response.len()]);
    w.write(&args.output)?;

    info!("written → {}", args.output.display());
    Ok(())
}
