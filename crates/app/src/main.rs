use std::{
    f32::consts::TAU,
    path::{Path, PathBuf},
    time::Duration,
};

use clap::{Parser, Subcommand};
use equalizer_core::{
    render_layers, to_svg_path_data, AppConfig, EqualizerError, PathLayer, RawCapture, TunnelPhase,
    Viewport, Visualization,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

const SYNTHETIC_SAMPLING_RATE: u32 = 44_100;

fn main() -> equalizer_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Sample { input, resolution } => run_sample(&config, input.as_deref(), resolution),
        Commands::Render {
            visualization,
            width,
            height,
            input,
            time_ms,
            svg,
        } => run_render(
            &config,
            visualization,
            Viewport::new(width, height),
            input.as_deref(),
            Duration::from_millis(time_ms),
            svg,
        ),
    }
}

fn run_sample(
    config: &AppConfig,
    input: Option<&Path>,
    resolution: Option<usize>,
) -> equalizer_core::Result<()> {
    let resolution = resolution.unwrap_or(config.sampler.resolution);
    let capture = load_capture(config, input)?;
    tracing::info!(resolution, samples = capture.samples.len(), "sampling capture");

    let amplitudes = capture.resample(resolution);
    let report = serde_json::json!({
        "resolution": resolution,
        "peak": capture.peak(),
        "amplitudes": amplitudes,
    });
    println!("{}", to_pretty_json(&report)?);
    Ok(())
}

fn run_render(
    config: &AppConfig,
    visualization: Visualization,
    viewport: Viewport,
    input: Option<&Path>,
    elapsed: Duration,
    svg: bool,
) -> equalizer_core::Result<()> {
    tracing::info!(%visualization, ?viewport, ?elapsed, "rendering frame");

    let capture = load_capture(config, input)?;
    let amplitudes = capture.resample(config.sampler.resolution);
    let phase = TunnelPhase::at(elapsed);
    let layers = render_layers(visualization, &amplitudes, viewport, config, &phase)?;

    if svg {
        println!("{}", svg_document(&layers, viewport));
    } else {
        println!("{}", to_pretty_json(&layers)?);
    }
    Ok(())
}

/// Reads a raw signed 8-bit waveform dump, or synthesises one when no input
/// is given.
fn load_capture(config: &AppConfig, input: Option<&Path>) -> equalizer_core::Result<RawCapture> {
    let capture_size = config.capture.capture_size;
    match input {
        Some(path) => {
            let bytes = std::fs::read(path)?;
            tracing::debug!(?path, bytes = bytes.len(), "loaded capture");
            Ok(RawCapture::from_bytes(
                &bytes,
                SYNTHETIC_SAMPLING_RATE,
                capture_size.min(bytes.len()),
            ))
        }
        None => Ok(synthetic_capture(capture_size)),
    }
}

fn synthetic_capture(capture_size: usize) -> RawCapture {
    let samples = (0..capture_size)
        .map(|i| {
            let t = i as f32 / capture_size.max(1) as f32;
            let value = 70.0 * (TAU * 3.0 * t).sin() + 40.0 * (TAU * 11.0 * t).sin();
            value.clamp(i8::MIN as f32, i8::MAX as f32) as i8
        })
        .collect();
    RawCapture::new(samples, SYNTHETIC_SAMPLING_RATE)
}

/// Output serialisation failures are not configuration errors, so they are
/// kept out of the `serde_json::Error` conversion.
fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> equalizer_core::Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| EqualizerError::msg(format!("failed to serialise output: {err}")))
}

fn svg_document(layers: &[PathLayer], viewport: Viewport) -> String {
    let paths: String = layers
        .iter()
        .map(|layer| {
            format!(
                "  <path id=\"{}\" fill-opacity=\"{}\" d=\"{}\"/>\n",
                layer.name,
                layer.opacity,
                to_svg_path_data(&layer.nodes)
            )
        })
        .collect();
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{paths}</svg>",
        w = viewport.width,
        h = viewport.height,
    )
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Waveform equalizer geometry", long_about = None)]
struct Cli {
    /// Optional JSON configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reduce a capture to its amplitude vector.
    Sample {
        /// Raw signed 8-bit waveform dump. A synthetic waveform is used when omitted.
        input: Option<PathBuf>,
        /// Number of amplitude buckets, defaults to the configured resolution.
        #[arg(short, long)]
        resolution: Option<usize>,
    },
    /// Render one frame of an equalizer style as path layers.
    Render {
        /// Style to draw, e.g. `bars` or `tubular-stacked-bars`.
        visualization: Visualization,
        /// Raw signed 8-bit waveform dump. A synthetic waveform is used when omitted.
        input: Option<PathBuf>,
        #[arg(long, default_value_t = 480.0)]
        width: f32,
        #[arg(long, default_value_t = 480.0)]
        height: f32,
        /// Animation clock for time-driven styles, in milliseconds.
        #[arg(long, default_value_t = 0)]
        time_ms: u64,
        /// Print an SVG document instead of JSON.
        #[arg(long)]
        svg: bool,
    },
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn output_failures_are_reported_as_serialisation_errors() {
        let unkeyable = HashMap::from([((1u8, 2u8), 3u8)]);
        let err = to_pretty_json(&unkeyable).unwrap_err();

        assert!(matches!(err, EqualizerError::Message(_)));
        assert!(format!("{err}").starts_with("failed to serialise output"));
    }

    #[test]
    fn renders_layers_as_json() {
        let layers = render_layers(
            Visualization::Bars,
            &synthetic_capture(128).resample(4),
            Viewport::new(40.0, 40.0),
            &AppConfig::default(),
            &TunnelPhase::default(),
        )
        .unwrap();

        let json = to_pretty_json(&layers).unwrap();
        assert!(json.contains("\"op\": \"move_to\""));
    }
}
